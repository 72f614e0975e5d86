//! Normalization of raw NPS records into stored rows.

use chrono::{DateTime, NaiveDate};
use log::debug;
use model::{
    event::Event,
    park::Park,
    visitor_center::{VisitorCenter, UNKNOWN_VISITOR_CENTER},
};
use serde_json::Value;
use utility::id::Id;

use crate::model::{NpsEvent, NpsPark, NpsVisitorCenter};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// The first private vehicle fee with a usable cost, rounded to whole dollars
/// (ties to even). `0` if there is none.
pub fn vehicle_entrance_fee(park: &NpsPark) -> i64 {
    park.entrance_fees
        .iter()
        .flatten()
        .filter(|fee| {
            fee.title
                .as_deref()
                .is_some_and(|title| title.to_lowercase().contains("vehicle"))
        })
        .find_map(|fee| fee.cost.as_ref().and_then(parse_cost))
        .map(|cost| cost.round_ties_even() as i64)
        .unwrap_or(0)
}

fn parse_cost(cost: &Value) -> Option<f64> {
    let cost = match cost {
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Number(number) => number.as_f64()?,
        _ => return None,
    };
    (cost.is_finite() && cost >= 0.0).then_some(cost)
}

/// First entry of the comma separated state list, empty if there is none.
pub fn state_code(park: &NpsPark) -> String {
    park.states
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .find(|state| !state.is_empty())
        .unwrap_or_default()
        .to_owned()
}

pub fn park_name(park: &NpsPark, park_code: &str) -> String {
    non_empty(park.full_name.as_deref())
        .or_else(|| non_empty(park.name.as_deref()))
        .map(str::to_owned)
        .unwrap_or_else(|| park_code.to_uppercase())
}

/// Accepts `YYYY-MM-DD` and timestamps with an offset (`+0000`, `+00:00`,
/// `Z`). For timestamps, the calendar day in their own offset is kept.
pub fn parse_event_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = non_empty(raw.map(str::trim))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_str(raw, DATE_TIME_FORMAT)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

fn parse_free_token(token: &str) -> Option<bool> {
    match token.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Decided in this order: an explicit boolean, a string (or non-zero number)
/// token, a non-empty fee info meaning "not free", otherwise free.
pub fn is_free(event: &NpsEvent) -> bool {
    let token = match &event.is_free {
        Some(Value::Bool(is_free)) => return *is_free,
        Some(Value::String(text)) => parse_free_token(text),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => {
            parse_free_token(&number.to_string())
        }
        _ => None,
    };

    token.unwrap_or_else(|| {
        event
            .fee_info
            .as_deref()
            .map_or(true, |fee_info| fee_info.trim().is_empty())
    })
}

pub fn to_park(park_code: &str, park: &NpsPark) -> Park {
    Park {
        park_code: Id::new(park_code.to_owned()),
        name: park_name(park, park_code),
        state_code: state_code(park),
        entrance_fee: vehicle_entrance_fee(park),
        total_activities: park.activities.as_ref().map_or(0, Vec::len) as i64,
    }
}

pub fn to_visitor_center(park_code: &str, center: &NpsVisitorCenter) -> VisitorCenter {
    VisitorCenter {
        park_code: Id::new(park_code.to_owned()),
        center_name: non_empty(center.name.as_deref())
            .unwrap_or(UNKNOWN_VISITOR_CENTER)
            .to_owned(),
    }
}

/// `None` for events without a title or a parseable start date. A missing
/// `datestart` falls back to `dateend`, a missing end to the start.
pub fn to_event(park_code: &str, event: &NpsEvent) -> Option<Event> {
    let Some(title) = non_empty(event.title.as_deref()) else {
        debug!("Dropping untitled event of park '{}'.", park_code);
        return None;
    };

    let raw_start = non_empty(event.datestart.as_deref())
        .or_else(|| non_empty(event.dateend.as_deref()));
    let raw_end = non_empty(event.dateend.as_deref()).or(raw_start);

    let Some(start_date) = parse_event_date(raw_start) else {
        debug!(
            "Dropping event '{}' of park '{}' without a valid start date ({:?}).",
            title, park_code, raw_start
        );
        return None;
    };
    let end_date = parse_event_date(raw_end).unwrap_or(start_date);

    Some(Event {
        park_code: Id::new(park_code.to_owned()),
        event_title: title.to_owned(),
        start_date,
        end_date: Some(end_date),
        is_free: is_free(event),
    })
}
