use thiserror::Error;

#[derive(Error, Debug)]
pub enum SisaguaError {
    #[error("remote request failed with HTTP status {status}")]
    RemoteRequest { status: u16 },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("page cap of {requests} requests reached before the server signalled end of data")]
    PageCapReached { requests: usize },

    #[error("display columns missing from the API response: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("data processing error: {message}")]
    Processing { message: String },
}

pub type Result<T> = std::result::Result<T, SisaguaError>;
