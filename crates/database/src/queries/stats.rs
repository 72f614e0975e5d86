use chrono::NaiveDate;
use model::stats::{EventCountPerPark, VisitorCenterCountPerPark};
use parks::database::Result;
use sqlx::{Executor, Sqlite};
use utility::let_also::LetAlso;

use crate::data_model::{
    stats::{EventCountRow, VisitorCenterCountRow},
    to_models,
};

use super::convert_error;

pub async fn event_counts_per_park<'c, E>(
    executor: E,
    year: i32,
) -> Result<Vec<EventCountPerPark>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let first_day = NaiveDate::from_ymd_opt(year, 1, 1);
    let last_day = NaiveDate::from_ymd_opt(year, 12, 31);

    let rows: Vec<EventCountRow> = match (first_day, last_day) {
        (Some(first_day), Some(last_day)) => {
            sqlx::query_as(
                "
                SELECT
                    parks.park_code AS park_code,
                    parks.name AS name,
                    COUNT(events.id) AS event_count
                FROM parks
                LEFT JOIN events
                    ON events.park_code = parks.park_code
                    AND events.start_date >= ?
                    AND events.start_date <= ?
                GROUP BY parks.park_code, parks.name;
                ",
            )
            .bind(first_day)
            .bind(last_day)
            .fetch_all(executor)
            .await
        }
        // no event can start in a year outside of the representable date range
        _ => {
            sqlx::query_as(
                "
                SELECT park_code, name, 0 AS event_count
                FROM parks;
                ",
            )
            .fetch_all(executor)
            .await
        }
    }
    .map_err(convert_error)?;

    Ok(to_models(rows))
}

pub async fn visitor_center_counts_per_park<'c, E>(
    executor: E,
) -> Result<Vec<VisitorCenterCountPerPark>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT
            parks.park_code AS park_code,
            parks.name AS name,
            COUNT(visitor_centers.id) AS center_count
        FROM parks
        LEFT JOIN visitor_centers
            ON visitor_centers.park_code = parks.park_code
        GROUP BY parks.park_code, parks.name;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<VisitorCenterCountRow>| Ok(to_models(rows)))
}
