pub use crate::common::RouteResult;

use axum::{extract::FromRef, Router};
use database::SqliteDatabase;
use log::info;
use parks::client::Client;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod common;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

#[derive(Clone, FromRef)]
pub struct WebState {
    pub parks_client: Client<SqliteDatabase>,
}

/// All routes, with request tracing.
pub fn router(state: WebState) -> Router {
    api::routes(state).layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(state: WebState, bind_address: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    info!("Listening on {}.", listener.local_addr()?);

    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}
