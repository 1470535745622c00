use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;

use courtside_core::Table;

use crate::endpoints::{Endpoint, Shape};
use crate::error::ApiError;
use crate::parse;

const BASE_URL: &str = "https://stats.nba.com/stats";
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(600);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Blocking client for the statistics API with request spacing.
pub struct StatsClient {
    http: reqwest::blocking::Client,
    base_url: String,
    last_request: Mutex<Instant>,
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(header::REFERER, HeaderValue::from_static("https://www.nba.com/"));
    headers.insert(header::ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
    headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));
    headers
}

impl StatsClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            last_request: Mutex::new(Instant::now() - MIN_REQUEST_INTERVAL),
        })
    }

    /// Point the client at a different host (e.g. a local mirror).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Wait until at least [`MIN_REQUEST_INTERVAL`] has passed since the
    /// previous request.
    fn rate_limit(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let elapsed = last.elapsed();
        if elapsed < MIN_REQUEST_INTERVAL {
            std::thread::sleep(MIN_REQUEST_INTERVAL - elapsed);
        }
        *last = Instant::now();
    }

    /// GET `path` under the base URL and decode the body as JSON.
    pub fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        self.rate_limit();

        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, params);
        let resp = self.http.get(&url).query(params).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch `endpoint` and normalise its response into a table.
    pub fn table(&self, endpoint: &Endpoint, params: &[(&str, String)]) -> Result<Table, ApiError> {
        let body = self.get_json(endpoint.path, params)?;
        match endpoint.shape {
            Shape::ResultSet(name) => parse::result_set(&body, name),
            Shape::NestedBoxscore => parse::nested_boxscore(&body),
            Shape::Schedule => parse::schedule(&body),
        }
    }
}
