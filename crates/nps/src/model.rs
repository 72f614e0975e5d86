//! Raw records as returned by the NPS data API. Only the fields the loader
//! looks at are declared, everything else is ignored.

use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Envelope around every list endpoint. Records stay untyped until
/// [`NpsResponse::records`], so one malformed record does not cost the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpsResponse {
    #[serde(default)]
    pub data: Vec<Value>,
}

impl NpsResponse {
    /// Every record that deserializes into `T`. The rest are logged and skipped.
    pub fn records<T: DeserializeOwned>(self) -> Vec<T> {
        self.data
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(record) => Some(record),
                Err(why) => {
                    warn!("Skipping malformed record #{}: {}", index, why);
                    None
                }
            })
            .collect()
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsPark {
    pub park_code: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    /// Comma separated, e.g. `"CA,NV"`.
    pub states: Option<String>,
    pub entrance_fees: Option<Vec<NpsEntranceFee>>,
    pub activities: Option<Vec<Value>>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsEntranceFee {
    pub title: Option<String>,
    /// Usually a decimal string like `"35.00"`, occasionally a number.
    pub cost: Option<Value>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsVisitorCenter {
    pub name: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsEvent {
    pub title: Option<String>,
    pub datestart: Option<String>,
    pub dateend: Option<String>,
    /// A boolean, a string token like `"true"`/`"yes"`, or anything else.
    #[serde(alias = "isfree")]
    pub is_free: Option<Value>,
    #[serde(alias = "feeinfo")]
    pub fee_info: Option<String>,
}
