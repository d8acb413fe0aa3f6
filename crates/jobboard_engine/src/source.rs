use std::time::Duration;

use futures_util::StreamExt;
use jobboard_core::{FilterCriteria, FilterOptions, ListingPage};
use jobboard_logging::{jobboard_debug, jobboard_warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{FailureKind, ListingError};

pub const DEFAULT_PAGE_SIZE: u32 = 12;

const INVALID_RESPONSE: &str = "Received an invalid response from the server.";
const ERROR_TEXT_LIMIT: usize = 500;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// API root, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` leaves the request unbounded.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Provider of paginated job data and filter facets.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn list(
        &self,
        filters: &FilterCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<ListingPage, ListingError>;

    async fn filter_options(&self) -> Result<FilterOptions, ListingError>;
}

#[derive(Debug, Clone)]
pub struct HttpListingSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl HttpListingSource {
    pub fn new(settings: FetchSettings) -> Result<Self, ListingError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ListingError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// `GET {base}/jobs?page=&limit=` plus one parameter per active filter.
    pub fn listing_url(
        &self,
        filters: &FilterCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<Url, ListingError> {
        let mut url = self.endpoint("/jobs")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("limit", &page_size.to_string());
            for (key, value) in filters.active() {
                pairs.append_pair(key.param_name(), value);
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ListingError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|err| ListingError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ListingError> {
        jobboard_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = self.read_error_body(response).await;
            let message = error_message(status.as_u16(), &body);
            jobboard_warn!("Listing API error status={}: {}", status.as_u16(), message);
            return Err(ListingError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = self.read_body(response).await?;
        // An empty success body is read as an empty object.
        let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(text).map_err(|err| {
            jobboard_warn!("Failed to parse listing response: {}", err);
            ListingError::new(FailureKind::InvalidBody, INVALID_RESPONSE)
        })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, ListingError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads at most `max_bytes` of an error body. Oversized or broken bodies
    /// are cut short rather than failing, so the status message survives.
    async fn read_error_body(&self, response: reqwest::Response) -> String {
        let max_bytes = usize::try_from(self.settings.max_bytes).unwrap_or(usize::MAX);
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let Ok(chunk) = chunk else {
                break;
            };
            let room = max_bytes - bytes.len();
            if chunk.len() >= room {
                bytes.extend_from_slice(&chunk[..room]);
                break;
            }
            bytes.extend_from_slice(&chunk);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[async_trait::async_trait]
impl ListingSource for HttpListingSource {
    async fn list(
        &self,
        filters: &FilterCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<ListingPage, ListingError> {
        let url = self.listing_url(filters, page, page_size)?;
        self.get_json(url).await
    }

    async fn filter_options(&self) -> Result<FilterOptions, ListingError> {
        let url = self.endpoint("/jobs/filters")?;
        self.get_json(url).await
    }
}

/// Message for a non-success response: the JSON `detail`, else the JSON body,
/// else the start of the text body, else the bare status.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return match value.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(detail @ (Value::Array(_) | Value::Object(_))) => detail.to_string(),
            // A zero or `false` detail counts as missing.
            Some(detail @ Value::Number(number)) if number.as_f64() != Some(0.0) => {
                detail.to_string()
            }
            Some(Value::Bool(true)) => "true".to_string(),
            _ => value.to_string(),
        };
    }
    let text: String = body.chars().take(ERROR_TEXT_LIMIT).collect();
    if text.is_empty() {
        format!("Request failed with status: {status}")
    } else {
        text
    }
}

fn too_large(max_bytes: u64, actual: u64) -> ListingError {
    ListingError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ListingError {
    if err.is_timeout() {
        return ListingError::new(FailureKind::Timeout, err.to_string());
    }
    ListingError::new(FailureKind::Network, err.to_string())
}
