use model::{visitor_center::VisitorCenter, WithId};
use parks::database::Result;
use sqlx::{Executor, QueryBuilder, Sqlite};
use utility::let_also::LetAlso;

use crate::data_model::{to_models, visitor_center::VisitorCenterRow};

use super::{convert_error, delete_all, insert_all};

const TABLE: &str = "visitor_centers";
const COLUMNS: &[&str] = &["park_code", "center_name"];

pub async fn get_all<'c, E>(
    executor: E,
    park_code: Option<&str>,
) -> Result<Vec<WithId<VisitorCenter>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "
        SELECT id, park_code, center_name
        FROM visitor_centers
        ",
    );
    if let Some(park_code) = park_code {
        query
            .push(" WHERE UPPER(park_code) = UPPER(")
            .push_bind(park_code.to_owned())
            .push(")");
    }
    query.push(" ORDER BY center_name ASC, id ASC;");

    query
        .build_query_as::<VisitorCenterRow>()
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|centers| Ok(to_models(centers)))
}

pub async fn insert<'c, E>(executor: E, visitor_centers: &[VisitorCenter]) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    insert_all(executor, TABLE, COLUMNS, visitor_centers, |mut row, center| {
        row.push_bind(center.park_code.raw())
            .push_bind(center.center_name.clone());
    })
    .await
}

pub async fn delete<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    delete_all(executor, TABLE).await
}
