use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{park::Park, ExampleData};

/// A per-park count produced by one of the statistics rollups.
pub trait ParkCount {
    fn park_code(&self) -> &Id<Park>;
    fn name(&self) -> &str;
    fn count(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EventCountPerPark {
    pub park_code: Id<Park>,
    pub name: String,
    pub event_count: i64,
}

impl ParkCount for EventCountPerPark {
    fn park_code(&self) -> &Id<Park> {
        &self.park_code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> i64 {
        self.event_count
    }
}

impl ExampleData for EventCountPerPark {
    fn example_data() -> Self {
        Self {
            park_code: Id::new("yose".to_owned()),
            name: "Yosemite National Park".to_owned(),
            event_count: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisitorCenterCountPerPark {
    pub park_code: Id<Park>,
    pub name: String,
    pub center_count: i64,
}

impl ParkCount for VisitorCenterCountPerPark {
    fn park_code(&self) -> &Id<Park> {
        &self.park_code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> i64 {
        self.center_count
    }
}

impl ExampleData for VisitorCenterCountPerPark {
    fn example_data() -> Self {
        Self {
            park_code: Id::new("yell".to_owned()),
            name: "Yellowstone National Park".to_owned(),
            center_count: 9,
        }
    }
}
