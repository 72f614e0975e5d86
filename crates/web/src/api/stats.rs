use axum::{
    extract::State,
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use model::stats::{EventCountPerPark, VisitorCenterCountPerPark};
use parks::{client::EventStatsQuery, stats::EventCountSelection};
use serde::Deserialize;
use utility::serde::{empty_as_none, flag};

use crate::{
    common::{schema, JsonResult, Params, RouteErrorResponse},
    WebState,
};

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/stats/events-per-park", get(get_events_per_park))
        .route(
            "/stats/events-per-park/schema",
            get(schema::<EventCountPerPark>),
        )
        .route(
            "/stats/visitor-centers-per-park",
            get(get_visitor_centers_per_park),
        )
        .route(
            "/stats/visitor-centers-per-park/schema",
            get(schema::<VisitorCenterCountPerPark>),
        )
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsPerParkQuery {
    year: i32,

    #[serde(default, deserialize_with = "flag::deserialize_option")]
    above_avg: Option<bool>,

    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    top_n: Option<usize>,

    #[serde(default, deserialize_with = "flag::deserialize_option")]
    include_zero_only: Option<bool>,
}

impl EventsPerParkQuery {
    fn stats_query(&self) -> EventStatsQuery {
        EventStatsQuery {
            year: self.year,
            selection: EventCountSelection::from_flags(
                self.above_avg.unwrap_or(false),
                self.include_zero_only.unwrap_or(false),
                self.top_n,
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VisitorCentersPerParkQuery {
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    min_centers: Option<i64>,
}

async fn get_events_per_park(
    uri: Uri,
    State(WebState { parks_client }): State<WebState>,
    Params(params): Params<EventsPerParkQuery>,
) -> JsonResult<Vec<EventCountPerPark>> {
    parks_client
        .events_per_park(params.stats_query())
        .await
        .map(Json)
        .map_err(|why| RouteErrorResponse::from(why).for_request(&Method::GET, &uri))
}

async fn get_visitor_centers_per_park(
    uri: Uri,
    State(WebState { parks_client }): State<WebState>,
    Params(params): Params<VisitorCentersPerParkQuery>,
) -> JsonResult<Vec<VisitorCenterCountPerPark>> {
    parks_client
        .visitor_centers_per_park(params.min_centers)
        .await
        .map(Json)
        .map_err(|why| RouteErrorResponse::from(why).for_request(&Method::GET, &uri))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::api::tests::get;

    fn counts(body: &Value, field: &str) -> Vec<(String, i64)> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|row| {
                (
                    row["park_code"].as_str().unwrap().to_owned(),
                    row[field].as_i64().unwrap(),
                )
            })
            .collect()
    }

    fn events(body: &Value) -> Vec<(String, i64)> {
        counts(body, "event_count")
    }

    #[tokio::test]
    async fn counts_events_per_park_of_the_year() {
        let (status, body) = get("/stats/events-per-park?year=2025").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "park_code": "zion", "name": "Zion National Park", "event_count": 2 },
                { "park_code": "yose", "name": "Yosemite National Park", "event_count": 1 },
                { "park_code": "jotr", "name": "Joshua Tree National Park", "event_count": 0 }
            ])
        );
    }

    #[tokio::test]
    async fn top_n_truncates_ranking() {
        let (_, body) = get("/stats/events-per-park?year=2025&top_n=2").await;
        assert_eq!(
            events(&body),
            [("zion".to_owned(), 2), ("yose".to_owned(), 1)]
        );

        let (_, body) = get("/stats/events-per-park?year=2025&top_n=0").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn above_average_ignores_top_n() {
        // mean = 1
        let (_, body) =
            get("/stats/events-per-park?year=2025&above_avg=true&top_n=0").await;
        assert_eq!(events(&body), [("zion".to_owned(), 2)]);
    }

    #[tokio::test]
    async fn zero_only_lists_idle_parks() {
        let (_, body) =
            get("/stats/events-per-park?year=2025&include_zero_only=true&top_n=0").await;
        assert_eq!(events(&body), [("jotr".to_owned(), 0)]);
    }

    #[tokio::test]
    async fn quiet_year_counts_zero_everywhere() {
        let (_, body) = get("/stats/events-per-park?year=1990").await;
        assert_eq!(events(&body).len(), 3);
        assert!(events(&body).iter().all(|(_, count)| *count == 0));

        let (_, body) = get("/stats/events-per-park?year=1990&above_avg=1").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn year_is_required() {
        let (status, body) = get("/stats/events-per-park").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["requestedUri"], "/stats/events-per-park");

        let (status, _) = get("/stats/events-per-park?year=soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn counts_visitor_centers_per_park() {
        let (status, body) = get("/stats/visitor-centers-per-park").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            counts(&body, "center_count"),
            [
                ("zion".to_owned(), 2),
                ("yose".to_owned(), 1),
                ("jotr".to_owned(), 0),
            ]
        );

        let (_, body) = get("/stats/visitor-centers-per-park?min_centers=1").await;
        assert_eq!(
            counts(&body, "center_count"),
            [("zion".to_owned(), 2), ("yose".to_owned(), 1)]
        );
    }

    #[tokio::test]
    async fn serves_stats_schemas() {
        let (status, body) = get("/stats/events-per-park/schema").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["properties"]["event_count"].is_object());

        let (status, body) = get("/stats/visitor-centers-per-park/schema").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["properties"]["center_count"].is_object());
    }
}
