use model::{event::Event, WithId};
use parks::database::{EventFilter, Result};
use sqlx::{Executor, QueryBuilder, Sqlite};
use utility::let_also::LetAlso;

use crate::data_model::{event::EventRow, to_models};

use super::{convert_error, delete_all, insert_all};

const TABLE: &str = "events";
const COLUMNS: &[&str] = &[
    "park_code",
    "event_title",
    "start_date",
    "end_date",
    "is_free",
];

pub async fn get_all<'c, E>(executor: E, filter: &EventFilter) -> Result<Vec<WithId<Event>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "
        SELECT id, park_code, event_title, start_date, end_date, is_free
        FROM events
        WHERE 1 = 1
        ",
    );
    if let Some(park_code) = &filter.park_code {
        query
            .push(" AND UPPER(park_code) = UPPER(")
            .push_bind(park_code.clone())
            .push(")");
    }
    if filter.free_only {
        query.push(" AND is_free = ").push_bind(true);
    }
    if let Some(start) = filter.start {
        query.push(" AND start_date >= ").push_bind(start);
    }
    // only the start date is compared, events reaching into the range from
    // before `start` are not included.
    if let Some(end) = filter.end {
        query.push(" AND start_date <= ").push_bind(end);
    }
    query.push(" ORDER BY start_date ASC, event_title ASC, id ASC;");

    query
        .build_query_as::<EventRow>()
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|events| Ok(to_models(events)))
}

pub async fn insert<'c, E>(executor: E, events: &[Event]) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    insert_all(executor, TABLE, COLUMNS, events, |mut row, event| {
        row.push_bind(event.park_code.raw())
            .push_bind(event.event_title.clone())
            .push_bind(event.start_date)
            .push_bind(event.end_date)
            .push_bind(event.is_free);
    })
    .await
}

pub async fn delete<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    delete_all(executor, TABLE).await
}
