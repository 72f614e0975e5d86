use std::{error, fmt, result};

use async_trait::async_trait;
use chrono::NaiveDate;
use model::{
    event::Event,
    park::Park,
    stats::{EventCountPerPark, VisitorCenterCountPerPark},
    visitor_center::VisitorCenter,
    WithId,
};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "row not found"),
            Self::Other(why) => write!(f, "database error: {}", why),
        }
    }
}

impl error::Error for DatabaseError {}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Filters for listing parks. Unset fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParkFilter {
    /// Matched case-insensitively against the park's state code.
    pub state_code: Option<String>,
    /// Only parks with an entrance fee strictly below this value.
    pub max_fee: Option<i64>,
}

/// Filters for listing events. Unset fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Matched case-insensitively against the event's park code.
    pub park_code: Option<String>,
    /// `true` restricts to free events, `false` does not filter at all.
    pub free_only: bool,
    /// Earliest accepted start date (inclusive).
    pub start: Option<NaiveDate>,
    /// Latest accepted start date (inclusive). The end date of an event is not
    /// taken into account.
    pub end: Option<NaiveDate>,
}

#[async_trait]
pub trait ParkRepo {
    /// Parks matching the filter, ordered by park code.
    async fn parks(&mut self, filter: &ParkFilter) -> Result<Vec<Park>>;

    /// Case-insensitive lookup. Fails with `DatabaseError::NotFound`.
    async fn park_by_code(&mut self, park_code: &str) -> Result<Park>;

    async fn insert_parks(&mut self, parks: &[Park]) -> Result<u64>;

    async fn delete_parks(&mut self) -> Result<u64>;
}

#[async_trait]
pub trait VisitorCenterRepo {
    /// Visitor centers ordered by name, optionally restricted to one park
    /// (case-insensitive).
    async fn visitor_centers(
        &mut self,
        park_code: Option<&str>,
    ) -> Result<Vec<WithId<VisitorCenter>>>;

    async fn insert_visitor_centers(
        &mut self,
        visitor_centers: &[VisitorCenter],
    ) -> Result<u64>;

    async fn delete_visitor_centers(&mut self) -> Result<u64>;
}

#[async_trait]
pub trait EventRepo {
    /// Events matching the filter, ordered by start date and then title.
    async fn events(&mut self, filter: &EventFilter) -> Result<Vec<WithId<Event>>>;

    async fn insert_events(&mut self, events: &[Event]) -> Result<u64>;

    async fn delete_events(&mut self) -> Result<u64>;
}

/// Grouped counts. Every park is part of the result, including parks without
/// any matching rows. No ordering is guaranteed.
#[async_trait]
pub trait StatsRepo {
    /// Number of events per park, starting within the given calendar year.
    async fn event_counts_per_park(&mut self, year: i32)
        -> Result<Vec<EventCountPerPark>>;

    async fn visitor_center_counts_per_park(
        &mut self,
    ) -> Result<Vec<VisitorCenterCountPerPark>>;
}

pub trait DatabaseOperations:
    ParkRepo + VisitorCenterRepo + EventRepo + StatsRepo + Send
{
}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// trait to implement a park database.
/// multiple concurrent accesses should be possible by e.g. cloning the database object.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized + 'static {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    /// Maximum number of rows passed to a single bulk insert.
    const BULK_INSERT_MAX: usize;

    /// Begins a transaction. Dropping it without committing rolls back.
    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;
}
