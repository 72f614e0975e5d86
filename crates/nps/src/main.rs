use std::process::ExitCode;

use database::{DatabaseConnectionInfo, SqliteDatabase};
use log::{error, info};
use nps::{
    client::{NpsApiClient, NpsApiCredentials},
    loader::{load, LoadError, LoaderConfig},
};
use parks::client::Client;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            error!("Data loading failed: {}", why);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // the credential is checked before the store is touched
    let credentials = NpsApiCredentials::from_env().map_err(LoadError::Configuration)?;
    let source = NpsApiClient::new(&credentials)?;
    let config = LoaderConfig::from_env();

    info!("Initializing database...");
    let database = SqliteDatabase::connect(DatabaseConnectionInfo::from_env()).await?;
    let client = Client::new(database);

    let report = load(&source, &client, &config).await?;
    info!(
        "Data loading complete ({} parks, {} skipped).",
        report.parks,
        report.skipped_parks.len()
    );
    Ok(())
}
