use model::park::Park;
use parks::database::{ParkFilter, Result};
use sqlx::{Executor, QueryBuilder, Sqlite};
use utility::let_also::LetAlso;

use crate::data_model::{park::ParkRow, to_models, DatabaseRow};

use super::{convert_error, delete_all, insert_all};

const TABLE: &str = "parks";
const COLUMNS: &[&str] = &[
    "park_code",
    "name",
    "state_code",
    "entrance_fee",
    "total_activities",
];

pub async fn get_all<'c, E>(executor: E, filter: &ParkFilter) -> Result<Vec<Park>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "
        SELECT park_code, name, state_code, entrance_fee, total_activities
        FROM parks
        WHERE 1 = 1
        ",
    );
    if let Some(state_code) = &filter.state_code {
        query
            .push(" AND UPPER(state_code) = UPPER(")
            .push_bind(state_code.clone())
            .push(")");
    }
    if let Some(max_fee) = filter.max_fee {
        query.push(" AND entrance_fee < ").push_bind(max_fee);
    }
    query.push(" ORDER BY park_code ASC;");

    query
        .build_query_as::<ParkRow>()
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|parks| Ok(to_models(parks)))
}

pub async fn get_by_code<'c, E>(executor: E, park_code: &str) -> Result<Park>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT park_code, name, state_code, entrance_fee, total_activities
        FROM parks
        WHERE UPPER(park_code) = UPPER(?)
        ORDER BY park_code ASC
        LIMIT 1;
        ",
    )
    .bind(park_code)
    .fetch_one(executor)
    .await
    .map(|row: ParkRow| row.to_model())
    .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, parks: &[Park]) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    insert_all(executor, TABLE, COLUMNS, parks, |mut row, park| {
        row.push_bind(park.park_code.raw())
            .push_bind(park.name.clone())
            .push_bind(park.state_code.clone())
            .push_bind(park.entrance_fee)
            .push_bind(park.total_activities);
    })
    .await
}

pub async fn delete<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    delete_all(executor, TABLE).await
}
