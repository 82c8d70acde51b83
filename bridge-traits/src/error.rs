use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// DNS, connect, TLS or transport failure while talking to a remote host.
    #[error("{0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Response body exceeds the configured limit of {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
