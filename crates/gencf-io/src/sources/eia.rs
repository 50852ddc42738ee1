use gencf_core::{FetchError, RawGenerationRow, ReportingPeriod};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.eia.gov/v2";
pub const DEFAULT_PAGE_LENGTH: usize = 5000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Monthly facility-fuel generation fetcher for the EIA v2 API.
///
/// One request per run: rows for a single reporting month, newest period
/// first, capped at `page_length`. No pagination is performed.
#[derive(Debug, Clone)]
pub struct EiaGenerationFetcher {
    /// EIA API key (from https://www.eia.gov/opendata/)
    api_key: String,
    base_url: String,
    page_length: usize,
    timeout: Duration,
}

impl EiaGenerationFetcher {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_length: DEFAULT_PAGE_LENGTH,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_length(mut self, page_length: usize) -> Self {
        self.page_length = page_length;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/electricity/facility-fuel/data/", self.base_url)
    }

    /// Fetch every facility-fuel row for `period`.
    pub fn fetch_generation(
        &self,
        period: &ReportingPeriod,
    ) -> Result<Vec<RawGenerationRow>, FetchError> {
        let month = period.api_value();
        let page_length = self.page_length.to_string();
        info!(period = %month, endpoint = %self.endpoint(), "fetching generation data");

        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .get(&self.endpoint())
            .query("api_key", &self.api_key)
            .query("frequency", "monthly")
            .query("data[0]", "gross-generation")
            .query("start", &month)
            .query("end", &month)
            .query("sort[0][column]", "period")
            .query("sort[0][direction]", "desc")
            .query("offset", "0")
            .query("length", &page_length)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => FetchError::Status(code),
                ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
            })?;

        let body: Value = response
            .into_json()
            .map_err(|err| FetchError::Decode(err.to_string()))?;

        let rows = parse_generation_body(&body)?;
        info!(rows = rows.len(), "fetched generation rows");
        Ok(rows)
    }
}

/// Extract rows from a `{"response": {"data": [...]}}` body.
///
/// Individual rows that do not deserialize are skipped with a warning; a body
/// without the data array is a decode error and an empty array is
/// [`FetchError::Empty`].
pub fn parse_generation_body(body: &Value) -> Result<Vec<RawGenerationRow>, FetchError> {
    let data = body
        .get("response")
        .and_then(|response| response.get("data"))
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Decode("missing response.data array".to_string()))?;

    let mut rows = Vec::with_capacity(data.len());
    let mut skipped = 0usize;
    for (index, item) in data.iter().enumerate() {
        match serde_json::from_value::<RawGenerationRow>(item.clone()) {
            Ok(row) => rows.push(row),
            Err(err) => {
                skipped += 1;
                debug!(index, error = %err, "skipping malformed generation row");
            }
        }
    }
    if skipped > 0 {
        warn!(skipped, "generation rows could not be decoded");
    }

    if rows.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(rows)
}
