use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrogError {
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("timed out waiting for the server")]
    Timeout,

    #[error("server closed the connection")]
    ConnectionClosed,

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("malformed record line {line:?}: {reason}")]
    MalformedRecord { line: String, reason: String },

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("session is no longer usable after a previous connection failure")]
    SessionPoisoned,
}

impl FrogError {
    /// True for errors that leave the underlying connection unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FrogError::Connection(_)
                | FrogError::Timeout
                | FrogError::ConnectionClosed
                | FrogError::SessionPoisoned
        )
    }
}

pub type Result<T> = std::result::Result<T, FrogError>;
