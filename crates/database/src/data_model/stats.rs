use async_trait::async_trait;
use model::stats::{EventCountPerPark, VisitorCenterCountPerPark};
use parks::database::{Result, StatsRepo};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::stats::{event_counts_per_park, visitor_center_counts_per_park};
use crate::{SqliteDatabaseAutocommit, SqliteDatabaseTransaction};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventCountRow {
    pub park_code: String,
    pub name: String,
    pub event_count: i64,
}

impl DatabaseRow for EventCountRow {
    type Model = EventCountPerPark;

    fn to_model(self) -> Self::Model {
        EventCountPerPark {
            park_code: Id::new(self.park_code),
            name: self.name,
            event_count: self.event_count,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct VisitorCenterCountRow {
    pub park_code: String,
    pub name: String,
    pub center_count: i64,
}

impl DatabaseRow for VisitorCenterCountRow {
    type Model = VisitorCenterCountPerPark;

    fn to_model(self) -> Self::Model {
        VisitorCenterCountPerPark {
            park_code: Id::new(self.park_code),
            name: self.name,
            center_count: self.center_count,
        }
    }
}

#[async_trait]
impl StatsRepo for SqliteDatabaseAutocommit {
    async fn event_counts_per_park(
        &mut self,
        year: i32,
    ) -> Result<Vec<EventCountPerPark>> {
        event_counts_per_park(&self.pool, year).await
    }

    async fn visitor_center_counts_per_park(
        &mut self,
    ) -> Result<Vec<VisitorCenterCountPerPark>> {
        visitor_center_counts_per_park(&self.pool).await
    }
}

#[async_trait]
impl StatsRepo for SqliteDatabaseTransaction {
    async fn event_counts_per_park(
        &mut self,
        year: i32,
    ) -> Result<Vec<EventCountPerPark>> {
        event_counts_per_park(&mut *self.tx, year).await
    }

    async fn visitor_center_counts_per_park(
        &mut self,
    ) -> Result<Vec<VisitorCenterCountPerPark>> {
        visitor_center_counts_per_park(&mut *self.tx).await
    }
}
