pub mod event;
pub mod park;
pub mod stats;
pub mod visitor_center;

/// A row as it is read from the database, convertible into its model type.
pub trait DatabaseRow {
    type Model;

    fn to_model(self) -> Self::Model;
}

pub fn to_models<R: DatabaseRow>(rows: Vec<R>) -> Vec<R::Model> {
    rows.into_iter().map(DatabaseRow::to_model).collect::<Vec<_>>()
}
