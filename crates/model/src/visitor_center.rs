use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{park::Park, ExampleData};

pub const UNKNOWN_VISITOR_CENTER: &str = "Unknown Visitor Center";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisitorCenter {
    pub park_code: Id<Park>,
    pub center_name: String,
}

impl HasId for VisitorCenter {
    type IdType = i64;
}

impl ExampleData for VisitorCenter {
    fn example_data() -> Self {
        Self {
            park_code: Id::new("zion".to_owned()),
            center_name: "Zion Canyon Visitor Center".to_owned(),
        }
    }
}
