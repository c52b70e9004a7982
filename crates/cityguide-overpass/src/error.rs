use thiserror::Error;

/// Errors from the Overpass acquisition pipeline.
///
/// Per-mirror failures are recovered by failover inside
/// [`crate::OverpassClient::execute`]; the only error that escapes it is
/// [`OverpassError::Exhausted`], carrying the last attempt's cause.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The mirror answered with a non-success status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The mirror answered with something other than JSON, usually an HTML
    /// error page from a proxy or an overloaded instance.
    #[error("non-JSON content type {content_type:?} from {url}")]
    NotJson { content_type: String, url: String },

    /// The body claimed to be JSON but did not parse.
    #[error("JSON parse error for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client was constructed with an empty endpoint list.
    #[error("no Overpass endpoints configured")]
    NoEndpoints,

    /// Every configured mirror failed for the same request.
    #[error("all {attempts} Overpass endpoints failed")]
    Exhausted {
        attempts: usize,
        #[source]
        last: Box<OverpassError>,
    },
}
