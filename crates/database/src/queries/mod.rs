use parks::database::DatabaseError;
use sqlx::{query_builder::Separated, Executor, QueryBuilder, Sqlite};

pub mod event;
pub mod park;
pub mod stats;
pub mod visitor_center;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}

// bulk insert

/// Inserts all `values` with a single multi-row `INSERT` statement and returns
/// the number of inserted rows. `push_row` binds exactly one value per column.
pub(crate) async fn insert_all<'c, 'args, E, T, B>(
    executor: E,
    table: &str,
    columns: &[&str],
    values: &'args [T],
    push_row: B,
) -> parks::database::Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
    B: FnMut(Separated<'_, 'args, Sqlite, &'static str>, &'args T),
{
    if values.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<'args, Sqlite> =
        QueryBuilder::new(format!("INSERT INTO {} ({}) ", table, columns.join(", ")));
    builder.push_values(values, push_row);

    builder
        .build()
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(convert_error)
}

pub(crate) async fn delete_all<'c, E>(
    executor: E,
    table: &str,
) -> parks::database::Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(&format!("DELETE FROM {};", table))
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(convert_error)
}
