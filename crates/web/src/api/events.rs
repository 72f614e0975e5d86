use axum::{
    extract::State,
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use model::{event::Event, WithId};
use parks::database::EventFilter;
use serde::Deserialize;
use utility::serde::{date, empty_as_none, flag};

use crate::{
    common::{schema, JsonResult, Params, RouteErrorResponse},
    WebState,
};

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/events", get(get_events))
        .route("/events/schema", get(schema::<Event>))
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsQuery {
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    park_code: Option<String>,

    /// `false` and omitted both mean "free and paid events".
    #[serde(default, deserialize_with = "flag::deserialize_option")]
    free_only: Option<bool>,

    #[serde(default, deserialize_with = "date::deserialize_option")]
    start: Option<NaiveDate>,

    #[serde(default, deserialize_with = "date::deserialize_option")]
    end: Option<NaiveDate>,
}

async fn get_events(
    uri: Uri,
    State(WebState { parks_client }): State<WebState>,
    Params(params): Params<EventsQuery>,
) -> JsonResult<Vec<WithId<Event>>> {
    let filter = EventFilter {
        park_code: params.park_code,
        free_only: params.free_only.unwrap_or(false),
        start: params.start,
        end: params.end,
    };
    parks_client
        .list_events(&filter)
        .await
        .map(Json)
        .map_err(|why| RouteErrorResponse::from(why).for_request(&Method::GET, &uri))
}
