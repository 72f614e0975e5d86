use axum::{
    extract::{Path, State},
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use model::park::Park;
use parks::database::ParkFilter;
use serde::Deserialize;
use utility::serde::empty_as_none;

use crate::{
    common::{schema, JsonResult, Params, RouteErrorResponse},
    WebState,
};

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/parks", get(get_parks))
        .route("/parks/schema", get(schema::<Park>))
        .route("/parks/:park_code", get(get_park))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParksQuery {
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    state_code: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    max_fee: Option<i64>,
}

async fn get_parks(
    uri: Uri,
    State(WebState { parks_client }): State<WebState>,
    Params(params): Params<ParksQuery>,
) -> JsonResult<Vec<Park>> {
    let filter = ParkFilter {
        state_code: params.state_code,
        max_fee: params.max_fee,
    };
    parks_client
        .list_parks(&filter)
        .await
        .map(Json)
        .map_err(|why| RouteErrorResponse::from(why).for_request(&Method::GET, &uri))
}

async fn get_park(
    uri: Uri,
    Path(park_code): Path<String>,
    State(WebState { parks_client }): State<WebState>,
) -> JsonResult<Park> {
    parks_client
        .get_park(&park_code)
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .for_request(&Method::GET, &uri)
                .with_detailed_information(format!("No park with code '{}'.", park_code))
        })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::tests::get;

    fn codes(body: &serde_json::Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|park| park["park_code"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn lists_all_parks_by_code() {
        let (status, body) = get("/parks").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(codes(&body), ["jotr", "yose", "zion"]);
        assert_eq!(
            body[2],
            json!({
                "park_code": "zion",
                "name": "Zion National Park",
                "state_code": "UT",
                "entrance_fee": 35,
                "total_activities": 12
            })
        );
    }

    #[tokio::test]
    async fn filters_by_state_and_fee() {
        let (_, body) = get("/parks?state_code=ca&max_fee=35").await;
        assert_eq!(codes(&body), ["jotr"]);

        let (_, body) = get("/parks?state_code=CA").await;
        assert_eq!(codes(&body), ["jotr", "yose"]);

        let (_, body) = get("/parks?state_code=&max_fee=").await;
        assert_eq!(codes(&body).len(), 3);

        let (_, body) = get("/parks?state_code=NV").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn rejects_malformed_fee() {
        let (status, body) = get("/parks?max_fee=cheap").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["requestedUri"], "/parks");
    }

    #[tokio::test]
    async fn looks_up_park_case_insensitively() {
        let (status, body) = get("/parks/ZiOn").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["park_code"], "zion");
    }

    #[tokio::test]
    async fn unknown_park_is_not_found() {
        let (status, body) = get("/parks/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["requestedUri"], "/parks/nope");
        assert_eq!(body["message"], "The requested item does not exist.");
    }

    #[tokio::test]
    async fn serves_park_schema() {
        let (status, body) = get("/parks/schema").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["properties"]["entrance_fee"].is_object());

        let (status, _) = get("/parks/schema?exampleData=true").await;
        assert_eq!(status, StatusCode::OK);
    }
}
