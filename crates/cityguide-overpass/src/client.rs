//! The Overpass mirror-failover client and the public fetch entry point.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use cityguide_core::{AppConfig, Poi};

use crate::error::OverpassError;
use crate::normalize::normalize_elements;
use crate::query::build_query;

/// Longest response-body prefix included in failure logs.
const LOG_SNIPPET_LEN: usize = 500;

const FORM_URLENCODED_UTF8: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// HTTP client that runs Overpass QL queries against an ordered list of
/// mirrors.
///
/// Mirrors are attempted strictly in order, one request per mirror, no
/// retries and no parallel probing; the first structurally valid JSON
/// response wins and later mirrors are never contacted. Worst case latency
/// is therefore the sum of the per-attempt timeouts.
pub struct OverpassClient {
    client: Client,
    endpoints: Vec<String>,
}

impl OverpassClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// [`OverpassError::NoEndpoints`] when the configured endpoint list is
    /// empty, [`OverpassError::Http`] when the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, OverpassError> {
        Self::with_endpoints(
            config.overpass_endpoints.clone(),
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit mirror list. Tests point this at
    /// mock servers.
    ///
    /// # Errors
    ///
    /// Same conditions as [`OverpassClient::new`].
    pub fn with_endpoints(
        endpoints: Vec<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OverpassError> {
        if endpoints.is_empty() {
            return Err(OverpassError::NoEndpoints);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoints })
    }

    /// Fetches and normalizes points of interest for a city.
    ///
    /// This surface never fails: mirror exhaustion is logged and degrades
    /// to an empty list, so callers cannot distinguish "nothing matched"
    /// from "service unreachable" without reading the logs.
    pub async fn fetch_pois(&self, city: &str, filters: &[&str]) -> Vec<Poi> {
        let query = build_query(city, filters);
        match self.execute(&query).await {
            Ok(elements) => {
                let pois = normalize_elements(elements);
                tracing::debug!(city, count = pois.len(), "normalized Overpass elements");
                pois
            }
            Err(error) => {
                tracing::error!(city, error = %error, "Overpass fetch failed on all mirrors");
                Vec::new()
            }
        }
    }

    /// Runs a raw Overpass QL query against the configured mirrors in order
    /// and returns the response's `elements` array.
    ///
    /// Each mirror gets exactly one attempt. A transport error, non-success
    /// status, non-JSON content type, or unparsable body advances to the
    /// next mirror; the first parsed response returns immediately, even
    /// when its element list is empty.
    ///
    /// # Errors
    ///
    /// [`OverpassError::Exhausted`] when every mirror fails, wrapping the
    /// final attempt's error.
    pub async fn execute(&self, query: &str) -> Result<Vec<serde_json::Value>, OverpassError> {
        let body = format!("data={}", utf8_percent_encode(query, NON_ALPHANUMERIC));
        let mut last_error = None;

        for url in &self.endpoints {
            match self.attempt(url, &body).await {
                Ok(elements) => return Ok(elements),
                Err(error) => last_error = Some(error),
            }
        }

        Err(OverpassError::Exhausted {
            attempts: self.endpoints.len(),
            last: Box::new(last_error.unwrap_or(OverpassError::NoEndpoints)),
        })
    }

    /// One POST against one mirror. Every failure is logged here, where the
    /// response body is still at hand for the snippet.
    async fn attempt(
        &self,
        url: &str,
        body: &str,
    ) -> Result<Vec<serde_json::Value>, OverpassError> {
        tracing::debug!(url, "querying Overpass mirror");

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_URLENCODED_UTF8)
            .header(ACCEPT, "application/json")
            .body(body.to_string());

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(url, error = %error, "Overpass request failed");
                return Err(error.into());
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        // Read the body as text before parsing, so an HTML error page from
        // a misbehaving mirror shows up in the logs instead of surfacing as
        // an opaque parse error.
        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(url, error = %error, "failed to read Overpass response body");
                return Err(error.into());
            }
        };

        if !status.is_success() {
            tracing::warn!(
                url,
                status = status.as_u16(),
                body = snippet(&text),
                "Overpass mirror returned an error status"
            );
            return Err(OverpassError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if !content_type.contains("application/json") {
            tracing::warn!(
                url,
                content_type,
                body = snippet(&text),
                "Overpass mirror returned non-JSON"
            );
            return Err(OverpassError::NotJson {
                content_type,
                url: url.to_string(),
            });
        }

        let payload: serde_json::Value = match serde_json::from_str(&text) {
            Ok(payload) => payload,
            Err(source) => {
                tracing::warn!(url, body = snippet(&text), "Overpass response is not valid JSON");
                return Err(OverpassError::Parse {
                    url: url.to_string(),
                    source,
                });
            }
        };

        Ok(extract_elements(payload))
    }
}

/// Pulls the `elements` array out of a parsed response. Any other shape,
/// including a JSON body without the key, reads as an empty result rather
/// than a failure.
fn extract_elements(payload: serde_json::Value) -> Vec<serde_json::Value> {
    match payload {
        serde_json::Value::Object(mut object) => match object.remove("elements") {
            Some(serde_json::Value::Array(elements)) => elements,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Truncates a body for logging without splitting a UTF-8 character.
fn snippet(body: &str) -> &str {
    if body.len() <= LOG_SNIPPET_LEN {
        return body;
    }
    let mut end = LOG_SNIPPET_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
