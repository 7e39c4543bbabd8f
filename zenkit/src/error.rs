use http::Method;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZenkitError {

    #[error("Primary key not set for collection '{collection}'! Please call populate once before creating entries.")]
    SchemaNotFetched { collection: String },

    #[error("Collection '{collection}' has no primary element")]
    MissingPrimaryKey { collection: String },

    #[error("Passed primary key value '{value}' is not valid for primary key '{element}' with type '{expected}' (got '{actual}')")]
    PrimaryTypeMismatch {
        value: String,
        element: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Primary element '{element}' is a {kind} field, only primitive value fields are supported as primary keys")]
    PrimaryKeyNotScalar { element: String, kind: &'static str },

    #[error("Something went wrong: {0}")]
    Malformed(String),

    #[error("Return code '{actual}' is not '{expected}'")]
    UnexpectedStatus { expected: u16, actual: u16 },

    #[error("{method} {url} failed with status {status}: {body}")]
    Status {
        method: Method,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid header: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("Role {0} cannot be granted")]
    UnassignableRole(String),

    #[error("User probably not logged in")]
    NotLoggedIn,

    #[error("Code generation failed: {0}")]
    Codegen(String),
}

impl ZenkitError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        ZenkitError::Malformed(msg.into())
    }

    /// True for failures reported by the remote side or the network, as opposed to local precondition violations.
    pub fn is_transport(&self) -> bool {
        matches!(self, ZenkitError::Status { .. } | ZenkitError::Reqwest(_) | ZenkitError::UnexpectedStatus { .. })
    }
}
