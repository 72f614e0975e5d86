use log::info;
use model::{
    event::Event,
    park::Park,
    stats::{EventCountPerPark, VisitorCenterCountPerPark},
    visitor_center::VisitorCenter,
    WithId,
};

use crate::{
    database::{
        Database, DatabaseTransaction, EventFilter, EventRepo, ParkFilter, ParkRepo,
        StatsRepo, VisitorCenterRepo,
    },
    stats::{select_event_counts, select_visitor_center_counts, EventCountSelection},
    RequestResult,
};

/// Parameters of the events-per-park rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStatsQuery {
    pub year: i32,
    pub selection: EventCountSelection,
}

/// A complete set of rows, replacing everything currently in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub parks: Vec<Park>,
    pub visitor_centers: Vec<VisitorCenter>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub parks: u64,
    pub visitor_centers: u64,
    pub events: u64,
}

/// Read access to the parks database, plus the replace-all used by ingestion.
/// Every call acquires its own connection or transaction and releases it
/// before returning.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database,
{
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub async fn list_parks(&self, filter: &ParkFilter) -> RequestResult<Vec<Park>> {
        Ok(self.database.auto().parks(filter).await?)
    }

    pub async fn get_park(&self, park_code: &str) -> RequestResult<Park> {
        Ok(self.database.auto().park_by_code(park_code).await?)
    }

    pub async fn list_visitor_centers(
        &self,
        park_code: Option<&str>,
    ) -> RequestResult<Vec<WithId<VisitorCenter>>> {
        Ok(self.database.auto().visitor_centers(park_code).await?)
    }

    pub async fn list_events(
        &self,
        filter: &EventFilter,
    ) -> RequestResult<Vec<WithId<Event>>> {
        Ok(self.database.auto().events(filter).await?)
    }

    pub async fn events_per_park(
        &self,
        query: EventStatsQuery,
    ) -> RequestResult<Vec<EventCountPerPark>> {
        let counts = self.database.auto().event_counts_per_park(query.year).await?;
        Ok(select_event_counts(counts, query.selection))
    }

    pub async fn visitor_centers_per_park(
        &self,
        min_centers: Option<i64>,
    ) -> RequestResult<Vec<VisitorCenterCountPerPark>> {
        let counts = self.database.auto().visitor_center_counts_per_park().await?;
        Ok(select_visitor_center_counts(counts, min_centers))
    }

    /// Clears all three tables (events, visitor centers, parks, in that order)
    /// and inserts the snapshot, all inside one transaction. On error nothing
    /// is committed and the previous contents stay in place.
    pub async fn replace_all(&self, snapshot: &Snapshot) -> RequestResult<ReplaceSummary> {
        let mut tx = self.database.transaction().await?;

        let deleted_events = tx.delete_events().await?;
        let deleted_centers = tx.delete_visitor_centers().await?;
        let deleted_parks = tx.delete_parks().await?;
        info!(
            "Cleared {} events, {} visitor centers and {} parks.",
            deleted_events, deleted_centers, deleted_parks
        );

        let mut summary = ReplaceSummary::default();
        for chunk in snapshot.parks.chunks(D::BULK_INSERT_MAX) {
            summary.parks += tx.insert_parks(chunk).await?;
        }
        for chunk in snapshot.visitor_centers.chunks(D::BULK_INSERT_MAX) {
            summary.visitor_centers += tx.insert_visitor_centers(chunk).await?;
        }
        for chunk in snapshot.events.chunks(D::BULK_INSERT_MAX) {
            summary.events += tx.insert_events(chunk).await?;
        }

        tx.commit().await?;
        Ok(summary)
    }
}
