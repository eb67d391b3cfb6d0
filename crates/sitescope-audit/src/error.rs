use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("browser error: {0}")]
    Browser(#[from] sitescope_browser::BrowserError),

    #[error("malformed phase result: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
