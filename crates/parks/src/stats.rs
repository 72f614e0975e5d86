//! In-memory refinement of the per-park count rollups.
//!
//! The store only produces the raw count of every park. Averaging, thresholds,
//! ranking and truncation happen here on the materialized list, so the rules do
//! not depend on what the storage engine can express.

use std::cmp::Ordering;

use itertools::Itertools;
use model::stats::ParkCount;

/// How the events-per-park rollup is narrowed down after counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCountSelection {
    /// Every park, optionally truncated to the first `top_n` after ranking.
    Ranked { top_n: Option<usize> },
    /// Parks whose count strictly exceeds the mean count of all parks.
    AboveAverage,
    /// Parks without a single event.
    ZeroOnly,
}

impl EventCountSelection {
    /// `above_avg` takes precedence over `include_zero_only`. Either of them
    /// discards `top_n`.
    pub fn from_flags(
        above_avg: bool,
        include_zero_only: bool,
        top_n: Option<usize>,
    ) -> Self {
        if above_avg {
            Self::AboveAverage
        } else if include_zero_only {
            Self::ZeroOnly
        } else {
            Self::Ranked { top_n }
        }
    }
}

impl Default for EventCountSelection {
    fn default() -> Self {
        Self::Ranked { top_n: None }
    }
}

/// Ranking order: count descending, then name ascending, then park code.
pub fn compare_counts<C: ParkCount>(a: &C, b: &C) -> Ordering {
    b.count()
        .cmp(&a.count())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.park_code().cmp(b.park_code()))
}

/// Arithmetic mean over all counts, `None` for an empty list.
pub fn mean_count<C: ParkCount>(counts: &[C]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }
    let sum: i64 = counts.iter().map(ParkCount::count).sum();
    Some(sum as f64 / counts.len() as f64)
}

pub fn select_event_counts<C: ParkCount>(
    counts: Vec<C>,
    selection: EventCountSelection,
) -> Vec<C> {
    let ranked = counts.into_iter().sorted_by(compare_counts).collect::<Vec<_>>();
    match selection {
        EventCountSelection::Ranked { top_n } => match top_n {
            Some(top_n) => ranked.into_iter().take(top_n).collect(),
            None => ranked,
        },
        EventCountSelection::AboveAverage => match mean_count(&ranked) {
            Some(mean) => ranked
                .into_iter()
                .filter(|count| count.count() as f64 > mean)
                .collect(),
            None => ranked,
        },
        EventCountSelection::ZeroOnly => ranked
            .into_iter()
            .filter(|count| count.count() == 0)
            .collect(),
    }
}

pub fn select_visitor_center_counts<C: ParkCount>(
    counts: Vec<C>,
    min_centers: Option<i64>,
) -> Vec<C> {
    counts
        .into_iter()
        .filter(|count| min_centers.map_or(true, |min| count.count() >= min))
        .sorted_by(compare_counts)
        .collect()
}
