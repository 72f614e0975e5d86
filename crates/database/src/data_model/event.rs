use async_trait::async_trait;
use chrono::NaiveDate;
use model::{event::Event, WithId};
use parks::database::{EventFilter, EventRepo, Result};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::event::{delete, get_all, insert};
use crate::{SqliteDatabaseAutocommit, SqliteDatabaseTransaction};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub park_code: String,
    pub event_title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_free: bool,
}

impl DatabaseRow for EventRow {
    type Model = WithId<Event>;

    fn to_model(self) -> Self::Model {
        WithId::new(
            Id::new(self.id),
            Event {
                park_code: Id::new(self.park_code),
                event_title: self.event_title,
                start_date: self.start_date,
                end_date: self.end_date,
                is_free: self.is_free,
            },
        )
    }
}

#[async_trait]
impl EventRepo for SqliteDatabaseAutocommit {
    async fn events(&mut self, filter: &EventFilter) -> Result<Vec<WithId<Event>>> {
        get_all(&self.pool, filter).await
    }

    async fn insert_events(&mut self, events: &[Event]) -> Result<u64> {
        insert(&self.pool, events).await
    }

    async fn delete_events(&mut self) -> Result<u64> {
        delete(&self.pool).await
    }
}

#[async_trait]
impl EventRepo for SqliteDatabaseTransaction {
    async fn events(&mut self, filter: &EventFilter) -> Result<Vec<WithId<Event>>> {
        get_all(&mut *self.tx, filter).await
    }

    async fn insert_events(&mut self, events: &[Event]) -> Result<u64> {
        insert(&mut *self.tx, events).await
    }

    async fn delete_events(&mut self) -> Result<u64> {
        delete(&mut *self.tx).await
    }
}
