use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::ExampleData;

/// A national park, identified by its short park code (e.g. `zion`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Park {
    pub park_code: Id<Park>,
    pub name: String,
    /// First state the park is located in.
    pub state_code: String,
    /// Private vehicle entrance fee in whole dollars, `0` if unknown.
    pub entrance_fee: i64,
    pub total_activities: i64,
}

impl HasId for Park {
    type IdType = String;
}

impl ExampleData for Park {
    fn example_data() -> Self {
        Self {
            park_code: Id::new("zion".to_owned()),
            name: "Zion National Park".to_owned(),
            state_code: "UT".to_owned(),
            entrance_fee: 35,
            total_activities: 29,
        }
    }
}
