use async_trait::async_trait;
use model::{visitor_center::VisitorCenter, WithId};
use parks::database::{Result, VisitorCenterRepo};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::visitor_center::{delete, get_all, insert};
use crate::{SqliteDatabaseAutocommit, SqliteDatabaseTransaction};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct VisitorCenterRow {
    pub id: i64,
    pub park_code: String,
    pub center_name: String,
}

impl DatabaseRow for VisitorCenterRow {
    type Model = WithId<VisitorCenter>;

    fn to_model(self) -> Self::Model {
        WithId::new(
            Id::new(self.id),
            VisitorCenter {
                park_code: Id::new(self.park_code),
                center_name: self.center_name,
            },
        )
    }
}

#[async_trait]
impl VisitorCenterRepo for SqliteDatabaseAutocommit {
    async fn visitor_centers(
        &mut self,
        park_code: Option<&str>,
    ) -> Result<Vec<WithId<VisitorCenter>>> {
        get_all(&self.pool, park_code).await
    }

    async fn insert_visitor_centers(
        &mut self,
        visitor_centers: &[VisitorCenter],
    ) -> Result<u64> {
        insert(&self.pool, visitor_centers).await
    }

    async fn delete_visitor_centers(&mut self) -> Result<u64> {
        delete(&self.pool).await
    }
}

#[async_trait]
impl VisitorCenterRepo for SqliteDatabaseTransaction {
    async fn visitor_centers(
        &mut self,
        park_code: Option<&str>,
    ) -> Result<Vec<WithId<VisitorCenter>>> {
        get_all(&mut *self.tx, park_code).await
    }

    async fn insert_visitor_centers(
        &mut self,
        visitor_centers: &[VisitorCenter],
    ) -> Result<u64> {
        insert(&mut *self.tx, visitor_centers).await
    }

    async fn delete_visitor_centers(&mut self) -> Result<u64> {
        delete(&mut *self.tx).await
    }
}

#[cfg(test)]
mod tests {
    use parks::client::Client;

    use crate::test_support::{memory_database, snapshot};

    #[tokio::test]
    async fn lists_centers_ordered_by_name() {
        let client = Client::new(memory_database().await);
        client.replace_all(&snapshot()).await.unwrap();

        let names = client
            .list_visitor_centers(None)
            .await
            .unwrap()
            .into_iter()
            .map(|center| center.content.center_name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "Kolob Canyons Visitor Center",
                "Yosemite Valley Visitor Center",
                "Zion Canyon Visitor Center",
            ]
        );
    }

    #[tokio::test]
    async fn filters_centers_by_park_ignoring_case() {
        let client = Client::new(memory_database().await);
        client.replace_all(&snapshot()).await.unwrap();

        let centers = client.list_visitor_centers(Some("YOSE")).await.unwrap();
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].content.park_code.raw(), "yose");

        let centers = client.list_visitor_centers(Some("jotr")).await.unwrap();
        assert!(centers.is_empty());
    }
}
