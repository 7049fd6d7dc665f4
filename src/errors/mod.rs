use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregatorError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    // Request errors
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed responded with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed returned an empty body: {0}")]
    EmptyBody(String),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("Feed has no items: {0}")]
    EmptyFeed(String),

    // Aggregation errors
    #[error("Aggregation failed: {0}")]
    Orchestration(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AggregatorError {
    /// True for errors caused by the caller's parameters rather than by us
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AggregatorError::UnknownCategory(_) | AggregatorError::InvalidLimit(_)
        )
    }
}

pub type AggregatorResult<T> = Result<T, AggregatorError>;
