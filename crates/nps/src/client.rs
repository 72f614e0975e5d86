use std::{env, fmt, time::Duration};

use async_trait::async_trait;
use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::{
    loader::ParkSource,
    model::{NpsEvent, NpsPark, NpsResponse, NpsVisitorCenter},
    ApiError,
};

pub const NPS_API_URL: &str = "https://developer.nps.gov/api/v1";

const USER_AGENT: &str = concat!("nps-parks-dashboard/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct NpsApiCredentials {
    pub api_key: String,
    pub base_url: String,
}

impl NpsApiCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: NPS_API_URL.to_owned(),
        }
    }

    /// Reads `NPS_API_KEY` and the optional `NPS_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_vars(env::var("NPS_API_KEY").ok(), env::var("NPS_BASE_URL").ok())
    }

    /// A missing or blank key is a configuration error. A missing or blank base
    /// url falls back to the public NPS api.
    pub fn from_vars(
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ApiError> {
        let api_key = api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ApiError::Configuration(
                    "NPS_API_KEY is not set. Create a .env file or export it.".to_owned(),
                )
            })?;

        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| NPS_API_URL.to_owned());

        Ok(Self { api_key, base_url })
    }
}

impl fmt::Debug for NpsApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NpsApiCredentials")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct NpsApiClient {
    pub credentials: NpsApiCredentials,
    client: reqwest::Client,
}

impl NpsApiClient {
    pub fn new(credentials: &NpsApiCredentials) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            credentials: credentials.clone(),
            client,
        })
    }

    /// Fetch up to `limit` records of one park from a list endpoint.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        park_code: &str,
        limit: u32,
    ) -> Result<Vec<T>, ApiError> {
        debug!("Requesting endpoint '{endpoint}' for park '{park_code}'.");

        /* perform get-request */
        let url = format!("{}/{}", self.credentials.base_url, endpoint);
        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.credentials.api_key.as_str()),
                ("parkCode", park_code),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        /* parse response */
        match response.status() {
            reqwest::StatusCode::OK => {
                let text = response.text().await?;
                let payload: NpsResponse = serde_json::from_str(&text)?;
                Ok(payload.records())
            }
            other => match response.text().await {
                Ok(val) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: Some(val),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: None,
                }),
            },
        }
    }
}

#[async_trait]
impl ParkSource for NpsApiClient {
    async fn park(&self, park_code: &str) -> Result<Option<NpsPark>, ApiError> {
        let parks = self.get::<NpsPark>("parks", park_code, 1).await?;
        Ok(parks.into_iter().next())
    }

    async fn visitor_centers(
        &self,
        park_code: &str,
        limit: u32,
    ) -> Result<Vec<NpsVisitorCenter>, ApiError> {
        self.get("visitorcenters", park_code, limit).await
    }

    async fn events(&self, park_code: &str, limit: u32) -> Result<Vec<NpsEvent>, ApiError> {
        self.get("events", park_code, limit).await
    }
}
