use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtriumError {
    #[error("Not an atrium workspace. Run 'atrium init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .atrium/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AtriumError>;
