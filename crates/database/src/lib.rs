use std::{env, error::Error, str::FromStr};

use async_trait::async_trait;
use log::info;
use parks::database::{
    Database, DatabaseAutocommit, DatabaseOperations, DatabaseTransaction,
};
use queries::convert_error;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Transaction,
};

pub mod data_model;
pub mod queries;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub const DEFAULT_DATABASE_URL: &str = "sqlite://database/nps.db";

pub struct DatabaseConnectionInfo {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Self {
        let url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());
        Self {
            url,
            max_connections: 5,
        }
    }

    /// A private database living as long as the pool. Limited to a single
    /// connection, as every sqlite connection would open its own in-memory
    /// database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    connection: sqlx::SqlitePool,
}

pub struct SqliteDatabaseTransaction {
    tx: Transaction<'static, sqlx::Sqlite>,
}

#[async_trait]
impl DatabaseTransaction for SqliteDatabaseTransaction {
    async fn commit(self) -> parks::database::Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

impl DatabaseOperations for SqliteDatabaseTransaction {}

pub struct SqliteDatabaseAutocommit {
    pool: sqlx::SqlitePool,
}

impl DatabaseAutocommit for SqliteDatabaseAutocommit {}

impl DatabaseOperations for SqliteDatabaseAutocommit {}

impl SqliteDatabase {
    /// Opens (and if necessary creates) the database and brings its schema up
    /// to date.
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let options = SqliteConnectOptions::from_str(&database_connection_info.url)?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(database_connection_info.max_connections);
        if database_connection_info.is_in_memory() {
            // closing the last connection would drop the whole database
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            let filename = options.clone().get_filename();
            if let Some(parent) = filename.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let pool = pool_options.connect_with(options).await?;
        let database = Self { connection: pool };
        database.initialize().await?;

        info!("Connected to database at '{}'.", database_connection_info.url);
        Ok(database)
    }

    /// Creates missing tables. Safe to run on every start.
    pub async fn initialize(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        MIGRATOR.run(&self.connection).await?;
        Ok(())
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    type Transaction = SqliteDatabaseTransaction;
    type Autocommit = SqliteDatabaseAutocommit;

    // sqlite allows 999 bound parameters per statement, the widest table
    // binds 5 per row.
    const BULK_INSERT_MAX: usize = 150;

    fn auto(&self) -> Self::Autocommit {
        SqliteDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(&self) -> parks::database::Result<Self::Transaction> {
        let tx = self.connection.begin().await.map_err(convert_error)?;
        Ok(SqliteDatabaseTransaction { tx })
    }
}
