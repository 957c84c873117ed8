use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid response headers: {0}")]
    Headers(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
