use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("sensor not ready")]
    NotReady,
    #[error("http status {0}")]
    Status(u16),
    #[error("transport: {0}")]
    Transport(String),
    #[error("catalog parse: {0}")]
    Parse(String),
    #[error("invalid utc offset: {0}s")]
    InvalidOffset(i32),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
