//! Full refresh of the parks store from an upstream source.
//!
//! All records are fetched and normalized first. Only then is the store
//! cleared and filled inside a single transaction, so a failing run leaves the
//! previous contents in place.

use std::{env, error, fmt};

use async_trait::async_trait;
use itertools::Itertools;
use log::{error, info, warn};
use parks::{
    client::{Client, Snapshot},
    database::Database,
    RequestError,
};

use crate::{
    extract::{to_event, to_park, to_visitor_center},
    model::{NpsEvent, NpsPark, NpsVisitorCenter},
    ApiError,
};

pub const DEFAULT_PARK_CODES: [&str; 10] = [
    "grca", // Grand Canyon
    "yose", // Yosemite
    "zion", // Zion
    "yell", // Yellowstone
    "seki", // Sequoia & Kings Canyon
    "romo", // Rocky Mountain
    "arch", // Arches
    "brca", // Bryce Canyon
    "lavo", // Lassen Volcanic
    "jotr", // Joshua Tree
];

/// Where raw park records come from.
#[async_trait]
pub trait ParkSource: Sync {
    /// The park's metadata, `None` if the source does not know the code.
    async fn park(&self, park_code: &str) -> Result<Option<NpsPark>, ApiError>;

    async fn visitor_centers(
        &self,
        park_code: &str,
        limit: u32,
    ) -> Result<Vec<NpsVisitorCenter>, ApiError>;

    async fn events(&self, park_code: &str, limit: u32) -> Result<Vec<NpsEvent>, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub park_codes: Vec<String>,
    pub visitor_center_limit: u32,
    pub event_limit: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            park_codes: DEFAULT_PARK_CODES.iter().map(|code| code.to_string()).collect(),
            visitor_center_limit: 50,
            event_limit: 50,
        }
    }
}

impl LoaderConfig {
    /// Default limits, park codes from the comma separated `NPS_PARK_CODES` if
    /// set.
    pub fn from_env() -> Self {
        match env::var("NPS_PARK_CODES") {
            Ok(codes) => Self::default().with_park_codes(&codes),
            Err(_) => Self::default(),
        }
    }

    /// Comma separated, case-insensitive. Repeated codes are kept once, at their
    /// first position.
    pub fn with_park_codes(mut self, codes: &str) -> Self {
        self.park_codes = codes
            .split(',')
            .map(|code| code.trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .unique()
            .collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub parks: u64,
    pub visitor_centers: u64,
    pub events: u64,
    /// Configured codes that could not be loaded, in configuration order.
    pub skipped_parks: Vec<String>,
}

#[derive(Debug)]
pub enum LoadError {
    Configuration(ApiError),
    Storage(RequestError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(why) => write!(f, "{}", why),
            Self::Storage(why) => write!(f, "could not store parks: {}", why),
        }
    }
}

impl error::Error for LoadError {}

impl From<RequestError> for LoadError {
    fn from(value: RequestError) -> Self {
        Self::Storage(value)
    }
}

/// Fetches all configured parks with their visitor centers and events.
/// Upstream failures only cost the affected park (or its centers/events).
pub async fn stage<S: ParkSource>(
    source: &S,
    config: &LoaderConfig,
) -> Result<(Snapshot, Vec<String>), LoadError> {
    if config.park_codes.is_empty() {
        return Err(LoadError::Configuration(ApiError::Configuration(
            "no park codes configured".to_owned(),
        )));
    }

    let mut snapshot = Snapshot::default();
    let mut skipped = vec![];
    let mut staged = vec![];

    info!("Fetching details of {} parks...", config.park_codes.len());
    for code in &config.park_codes {
        match source.park(code).await {
            Ok(Some(park)) => {
                let park = to_park(code, &park);
                info!("Staged park '{}': {}", code, park.name);
                snapshot.parks.push(park);
                staged.push(code);
            }
            Ok(None) => {
                warn!("No park data returned for code '{}', skipping.", code);
                skipped.push(code.clone());
            }
            Err(why) if why.is_configuration() => {
                return Err(LoadError::Configuration(why));
            }
            Err(why) => {
                error!("Could not fetch park '{}', skipping: {}", code, why);
                skipped.push(code.clone());
            }
        }
    }

    for code in &staged {
        match source.visitor_centers(code, config.visitor_center_limit).await {
            Ok(centers) => {
                info!("Staged {} visitor centers of '{}'.", centers.len(), code);
                snapshot
                    .visitor_centers
                    .extend(centers.iter().map(|center| to_visitor_center(code, center)));
            }
            Err(why) => error!("Could not fetch visitor centers of '{}': {}", code, why),
        }
    }

    for code in &staged {
        match source.events(code, config.event_limit).await {
            Ok(events) => {
                let before = snapshot.events.len();
                snapshot
                    .events
                    .extend(events.iter().filter_map(|event| to_event(code, event)));
                info!(
                    "Staged {} of {} events of '{}'.",
                    snapshot.events.len() - before,
                    events.len(),
                    code
                );
            }
            Err(why) => error!("Could not fetch events of '{}': {}", code, why),
        }
    }

    Ok((snapshot, skipped))
}

/// One complete ingestion run: stage, then replace the store contents.
pub async fn load<S, D>(
    source: &S,
    client: &Client<D>,
    config: &LoaderConfig,
) -> Result<LoadReport, LoadError>
where
    S: ParkSource,
    D: Database,
{
    let (snapshot, skipped_parks) = stage(source, config).await?;
    let summary = client.replace_all(&snapshot).await?;

    let report = LoadReport {
        parks: summary.parks,
        visitor_centers: summary.visitor_centers,
        events: summary.events,
        skipped_parks,
    };
    info!(
        "Loaded {} parks, {} visitor centers and {} events.",
        report.parks, report.visitor_centers, report.events
    );
    if !report.skipped_parks.is_empty() {
        warn!("Skipped parks: {}", report.skipped_parks.join(", "));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;
    use database::{DatabaseConnectionInfo, SqliteDatabase};
    use model::{event::Event, park::Park, visitor_center::VisitorCenter};
    use parks::{client::Client, database::EventFilter, database::ParkFilter};
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct FixtureSource {
        parks: HashMap<String, NpsPark>,
        visitor_centers: HashMap<String, Vec<NpsVisitorCenter>>,
        events: HashMap<String, Vec<NpsEvent>>,
        failing: HashSet<String>,
    }

    impl FixtureSource {
        fn fail_for(&self, park_code: &str) -> Result<(), ApiError> {
            if self.failing.contains(park_code) {
                Err(ApiError::InvalidResponse {
                    status_code: reqwest::StatusCode::BAD_GATEWAY,
                    url: format!("fixture/{park_code}"),
                    response: None,
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ParkSource for FixtureSource {
        async fn park(&self, park_code: &str) -> Result<Option<NpsPark>, ApiError> {
            self.fail_for(park_code)?;
            Ok(self.parks.get(park_code).cloned())
        }

        async fn visitor_centers(
            &self,
            park_code: &str,
            limit: u32,
        ) -> Result<Vec<NpsVisitorCenter>, ApiError> {
            let centers = self.visitor_centers.get(park_code).cloned().unwrap_or_default();
            Ok(centers.into_iter().take(limit as usize).collect())
        }

        async fn events(&self, park_code: &str, limit: u32) -> Result<Vec<NpsEvent>, ApiError> {
            let events = self.events.get(park_code).cloned().unwrap_or_default();
            Ok(events.into_iter().take(limit as usize).collect())
        }
    }

    fn fixture() -> FixtureSource {
        let mut source = FixtureSource::default();
        source.parks.insert(
            "zion".to_owned(),
            serde_json::from_value(json!({
                "fullName": "Zion National Park",
                "states": "UT",
                "entranceFees": [
                    { "title": "Entrance - Private Vehicle", "cost": "35.00" }
                ],
                "activities": [{ "name": "Hiking" }, { "name": "Stargazing" }]
            }))
            .unwrap(),
        );
        source.parks.insert(
            "jotr".to_owned(),
            serde_json::from_value(json!({
                "fullName": "Joshua Tree National Park",
                "states": "CA",
                "entranceFees": [
                    { "title": "Entrance - Private Vehicle", "cost": "30.00" }
                ]
            }))
            .unwrap(),
        );
        source.visitor_centers.insert(
            "zion".to_owned(),
            serde_json::from_value(json!([
                { "name": "Zion Canyon Visitor Center" },
                {}
            ]))
            .unwrap(),
        );
        source.events.insert(
            "zion".to_owned(),
            serde_json::from_value(json!([
                { "title": "Star Party", "datestart": "2025-03-15" },
                { "title": "Geology Talk", "datestart": "2025-03-16", "feeInfo": "$5" },
                { "datestart": "2025-03-17" },
                { "title": "Someday", "datestart": "tbd" }
            ]))
            .unwrap(),
        );
        source
    }

    fn config(codes: &str) -> LoaderConfig {
        LoaderConfig::default().with_park_codes(codes)
    }

    async fn memory_client() -> Client<SqliteDatabase> {
        let database = SqliteDatabase::connect(DatabaseConnectionInfo::in_memory())
            .await
            .unwrap();
        Client::new(database)
    }

    async fn contents(
        client: &Client<SqliteDatabase>,
    ) -> (Vec<Park>, Vec<VisitorCenter>, Vec<Event>) {
        let parks = client.list_parks(&ParkFilter::default()).await.unwrap();
        let centers = client
            .list_visitor_centers(None)
            .await
            .unwrap()
            .into_iter()
            .map(|center| center.content)
            .collect();
        let events = client
            .list_events(&EventFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|event| event.content)
            .collect();
        (parks, centers, events)
    }

    #[test]
    fn parses_configured_park_codes() {
        assert_eq!(LoaderConfig::default().park_codes.len(), 10);
        assert_eq!(config(" ZION, ,jotr ").park_codes, ["zion", "jotr"]);
        assert_eq!(config("zion,jotr,ZION").park_codes, ["zion", "jotr"]);
    }

    #[tokio::test]
    async fn repeated_park_codes_load_once() {
        let client = memory_client().await;
        let report = load(&fixture(), &client, &config("zion,ZION,jotr"))
            .await
            .unwrap();
        assert_eq!(report.parks, 2);
        assert_eq!(report.visitor_centers, 2);
        assert_eq!(report.events, 2);

        let (parks, _, _) = contents(&client).await;
        assert_eq!(parks.len(), 2);
    }

    #[tokio::test]
    async fn loads_parks_with_derived_fields() {
        let client = memory_client().await;
        let report = load(&fixture(), &client, &config("zion,jotr")).await.unwrap();

        assert_eq!(
            report,
            LoadReport {
                parks: 2,
                visitor_centers: 2,
                events: 2,
                skipped_parks: vec![],
            }
        );

        let zion = client.get_park("ZION").await.unwrap();
        assert_eq!(zion.entrance_fee, 35);
        assert_eq!(zion.total_activities, 2);
        assert_eq!(zion.state_code, "UT");

        let (_, centers, events) = contents(&client).await;
        assert!(centers
            .iter()
            .any(|center| center.center_name == "Unknown Visitor Center"));
        assert_eq!(events[0].event_title, "Star Party");
        assert_eq!(events[0].end_date, Some(events[0].start_date));
        assert!(events[0].is_free);
        assert!(!events[1].is_free);
    }

    #[tokio::test]
    async fn skips_missing_and_failing_parks() {
        let client = memory_client().await;
        let mut source = fixture();
        source.failing.insert("jotr".to_owned());

        let report = load(&source, &client, &config("grca,zion,jotr")).await.unwrap();
        assert_eq!(report.parks, 1);
        assert_eq!(report.skipped_parks, ["grca", "jotr"]);

        let (parks, _, _) = contents(&client).await;
        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].park_code.raw(), "zion");
    }

    #[tokio::test]
    async fn rerun_replaces_previous_contents() {
        let client = memory_client().await;
        let source = fixture();

        load(&source, &client, &config("zion,jotr")).await.unwrap();
        let first = contents(&client).await;
        load(&source, &client, &config("zion,jotr")).await.unwrap();
        let second = contents(&client).await;
        assert_eq!(first, second);

        load(&source, &client, &config("jotr")).await.unwrap();
        let (parks, centers, events) = contents(&client).await;
        assert_eq!(parks.len(), 1);
        assert!(centers.is_empty());
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn empty_configuration_leaves_store_untouched() {
        let client = memory_client().await;
        load(&fixture(), &client, &config("zion")).await.unwrap();

        let result = load(&fixture(), &client, &config(" , ")).await;
        assert!(matches!(result, Err(LoadError::Configuration(_))));

        let (parks, _, _) = contents(&client).await;
        assert_eq!(parks.len(), 1);
    }
}
