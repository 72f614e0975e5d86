use axum::{
    extract::State,
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use model::{visitor_center::VisitorCenter, WithId};
use serde::Deserialize;
use utility::serde::empty_as_none;

use crate::{
    common::{schema, JsonResult, Params, RouteErrorResponse},
    WebState,
};

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/visitor-centers", get(get_visitor_centers))
        .route("/visitor-centers/schema", get(schema::<VisitorCenter>))
}

#[derive(Debug, Deserialize)]
pub(crate) struct VisitorCentersQuery {
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    park_code: Option<String>,
}

async fn get_visitor_centers(
    uri: Uri,
    State(WebState { parks_client }): State<WebState>,
    Params(params): Params<VisitorCentersQuery>,
) -> JsonResult<Vec<WithId<VisitorCenter>>> {
    parks_client
        .list_visitor_centers(params.park_code.as_deref())
        .await
        .map(Json)
        .map_err(|why| RouteErrorResponse::from(why).for_request(&Method::GET, &uri))
}
