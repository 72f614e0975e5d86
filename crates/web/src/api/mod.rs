use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

mod events;
mod parks;
mod stats;
mod visitor_centers;

use crate::{common::route_not_found, WebState};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/ping", get(ping))
        .merge(parks::routes())
        .merge(visitor_centers::routes())
        .merge(events::routes())
        .merge(stats::routes())
        .fallback(route_not_found)
        .with_state(state)
}

async fn info() -> impl IntoResponse {
    Json(json!({
        "project": "NPS Visitor Information & Event Planning",
        "description": "NPS parks, visitor centers, and events of the configured parks.",
        "status": "backend running"
    }))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use database::{DatabaseConnectionInfo, SqliteDatabase};
    use model::{event::Event, park::Park, visitor_center::VisitorCenter};
    use parks::client::{Client, Snapshot};
    use serde_json::Value;
    use tower::ServiceExt;
    use utility::id::Id;

    use crate::{router, WebState};

    fn park(code: &str, name: &str, state: &str, fee: i64) -> Park {
        Park {
            park_code: Id::new(code.to_owned()),
            name: name.to_owned(),
            state_code: state.to_owned(),
            entrance_fee: fee,
            total_activities: 12,
        }
    }

    fn center(code: &str, name: &str) -> VisitorCenter {
        VisitorCenter {
            park_code: Id::new(code.to_owned()),
            center_name: name.to_owned(),
        }
    }

    fn event(code: &str, title: &str, start: &str, is_free: bool) -> Event {
        let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        Event {
            park_code: Id::new(code.to_owned()),
            event_title: title.to_owned(),
            start_date,
            end_date: Some(start_date),
            is_free,
        }
    }

    /// zion (UT, $35): 2 centers, 2 events in 2025 and 1 in 2024,
    /// yose (CA, $35): 1 center, 1 event in 2025,
    /// jotr (CA, $30): nothing.
    pub(crate) async fn test_state() -> WebState {
        let database = SqliteDatabase::connect(DatabaseConnectionInfo::in_memory())
            .await
            .unwrap();
        let parks_client = Client::new(database);
        parks_client
            .replace_all(&Snapshot {
                parks: vec![
                    park("zion", "Zion National Park", "UT", 35),
                    park("yose", "Yosemite National Park", "CA", 35),
                    park("jotr", "Joshua Tree National Park", "CA", 30),
                ],
                visitor_centers: vec![
                    center("zion", "Zion Canyon Visitor Center"),
                    center("zion", "Kolob Canyons Visitor Center"),
                    center("yose", "Yosemite Valley Visitor Center"),
                ],
                events: vec![
                    event("zion", "Star Party", "2025-06-10", true),
                    event("zion", "Geology Talk", "2025-06-10", false),
                    event("zion", "Old Hike", "2024-12-31", true),
                    event("yose", "Full Moon Walk", "2025-07-01", true),
                ],
            })
            .await
            .unwrap();
        WebState { parks_client }
    }

    pub(crate) async fn get(uri: &str) -> (StatusCode, Value) {
        let response = router(test_state().await)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn ping_pongs() {
        let (status, body) = get("/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong!");
    }

    #[tokio::test]
    async fn root_reports_status() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "backend running");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, body) = get("/trails").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["httpMethod"], "GET");
        assert_eq!(body["requestedUri"], "/trails");
        assert_eq!(body["message"], "Not Found");
    }
}
