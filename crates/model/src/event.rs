use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{park::Park, ExampleData};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Event {
    pub park_code: Id<Park>,
    pub event_title: String,
    pub start_date: NaiveDate,
    /// Never before `start_date`. Ingestion fills it with the start date when the
    /// source has none.
    pub end_date: Option<NaiveDate>,
    pub is_free: bool,
}

impl HasId for Event {
    type IdType = i64;
}

impl ExampleData for Event {
    fn example_data() -> Self {
        let start_date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap_or_default();
        Self {
            park_code: Id::new("zion".to_owned()),
            event_title: "Ranger-Led Geology Talk".to_owned(),
            start_date,
            end_date: Some(start_date),
            is_free: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Event;
    use crate::ExampleData;

    #[test]
    fn serializes_dates_as_calendar_days() {
        let event = Event::example_data();
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "park_code": "zion",
                "event_title": "Ranger-Led Geology Talk",
                "start_date": "2025-03-15",
                "end_date": "2025-03-15",
                "is_free": true,
            })
        );
    }

    #[test]
    fn serializes_missing_end_as_null() {
        let mut event = Event::example_data();
        event.end_date = None;
        let value = serde_json::to_value(&event).unwrap();
        assert!(value["end_date"].is_null());
    }
}
