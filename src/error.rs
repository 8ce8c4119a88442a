/// All errors that can occur while talking to the SHOWROOM endpoints.
///
/// These stay internal to the fetch layer for the most part: the aggregate
/// operations degrade to empty or fallback values instead of surfacing them.
#[derive(thiserror::Error, Debug)]
pub enum ShowroomError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to decode the response body as JSON.
    #[error("failed to decode JSON from {url}: {source}")]
    Json {
        url: String,
        source: reqwest::Error,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// Failed to parse the backup CSV archive.
    #[error("failed to parse backup CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ShowroomError>;
