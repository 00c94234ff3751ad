use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("issue {0} not found")]
    IssueNotFound(i64),

    #[error("invalid filter token '{0}': {1}")]
    InvalidToken(String, String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DeskError>;
