use std::env;

use database::{DatabaseConnectionInfo, SqliteDatabase};
use parks::client::Client;
use tracing_subscriber::EnvFilter;
use web::{start_web_server, WebState, DEFAULT_BIND_ADDRESS};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // database
    let database = SqliteDatabase::connect(DatabaseConnectionInfo::from_env())
        .await
        .expect("could not connect to database.");

    // web server
    let bind_address =
        env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());
    let web_future = start_web_server(
        WebState {
            parks_client: Client::new(database),
        },
        &bind_address,
    );

    if let Err(why) = web_future.await {
        tracing::error!("web server stopped: {}", why);
    }
}
