use async_trait::async_trait;
use model::park::Park;
use parks::database::{ParkFilter, ParkRepo, Result};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::park::{delete, get_all, get_by_code, insert};
use crate::{SqliteDatabaseAutocommit, SqliteDatabaseTransaction};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct ParkRow {
    pub park_code: String,
    pub name: String,
    pub state_code: String,
    pub entrance_fee: i64,
    pub total_activities: i64,
}

impl DatabaseRow for ParkRow {
    type Model = Park;

    fn to_model(self) -> Self::Model {
        Park {
            park_code: Id::new(self.park_code),
            name: self.name,
            state_code: self.state_code,
            entrance_fee: self.entrance_fee,
            total_activities: self.total_activities,
        }
    }
}

#[async_trait]
impl ParkRepo for SqliteDatabaseAutocommit {
    async fn parks(&mut self, filter: &ParkFilter) -> Result<Vec<Park>> {
        get_all(&self.pool, filter).await
    }

    async fn park_by_code(&mut self, park_code: &str) -> Result<Park> {
        get_by_code(&self.pool, park_code).await
    }

    async fn insert_parks(&mut self, parks: &[Park]) -> Result<u64> {
        insert(&self.pool, parks).await
    }

    async fn delete_parks(&mut self) -> Result<u64> {
        delete(&self.pool).await
    }
}

#[async_trait]
impl ParkRepo for SqliteDatabaseTransaction {
    async fn parks(&mut self, filter: &ParkFilter) -> Result<Vec<Park>> {
        get_all(&mut *self.tx, filter).await
    }

    async fn park_by_code(&mut self, park_code: &str) -> Result<Park> {
        get_by_code(&mut *self.tx, park_code).await
    }

    async fn insert_parks(&mut self, parks: &[Park]) -> Result<u64> {
        insert(&mut *self.tx, parks).await
    }

    async fn delete_parks(&mut self) -> Result<u64> {
        delete(&mut *self.tx).await
    }
}

#[cfg(test)]
mod tests {
    use parks::{client::Client, database::ParkFilter, RequestError};

    use crate::test_support::{memory_database, snapshot};

    fn codes(parks: &[model::park::Park]) -> Vec<String> {
        parks.iter().map(|park| park.park_code.raw()).collect()
    }

    #[tokio::test]
    async fn lists_parks_ordered_by_code() {
        let client = Client::new(memory_database().await);
        client.replace_all(&snapshot()).await.unwrap();

        let parks = client.list_parks(&ParkFilter::default()).await.unwrap();
        assert_eq!(codes(&parks), ["jotr", "yose", "zion"]);
    }

    #[tokio::test]
    async fn filters_by_state_ignoring_case_and_strict_fee() {
        let client = Client::new(memory_database().await);
        client.replace_all(&snapshot()).await.unwrap();

        let filter = ParkFilter {
            state_code: Some("ca".to_owned()),
            max_fee: Some(35),
        };
        let parks = client.list_parks(&filter).await.unwrap();
        assert_eq!(codes(&parks), ["jotr"]);

        let filter = ParkFilter {
            state_code: None,
            max_fee: Some(36),
        };
        let parks = client.list_parks(&filter).await.unwrap();
        assert_eq!(codes(&parks), ["jotr", "yose", "zion"]);
    }

    #[tokio::test]
    async fn unknown_state_is_an_empty_list() {
        let client = Client::new(memory_database().await);
        client.replace_all(&snapshot()).await.unwrap();

        let filter = ParkFilter {
            state_code: Some("AK".to_owned()),
            max_fee: None,
        };
        assert!(client.list_parks(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_park_ignores_case() {
        let client = Client::new(memory_database().await);
        client.replace_all(&snapshot()).await.unwrap();

        let park = client.get_park("ZION").await.unwrap();
        assert_eq!(park.name, "Zion National Park");
        assert_eq!(park.entrance_fee, 35);
    }

    #[tokio::test]
    async fn get_unknown_park_is_not_found() {
        let client = Client::new(memory_database().await);
        client.replace_all(&snapshot()).await.unwrap();

        let result = client.get_park("nope").await;
        assert!(matches!(result, Err(RequestError::NotFound)));
    }
}
