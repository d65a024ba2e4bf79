use crate::transport::TransportError;
use std::path::PathBuf;
use thiserror::Error;

pub const NETWORK_NOT_OK: &str = "network response was not ok";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("please select a PowerPoint file to upload.")]
    NoFileSelected,

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("an upload is already in progress")]
    Busy,

    #[error("network response was not ok")]
    Status(u16),

    #[error("network response was not ok")]
    Network(#[source] TransportError),

    /// Message reported by the backend in its `error` field.
    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("response did not include an image folder")]
    MissingFolder,
}

impl UploadError {
    /// Detail for the log; the user only ever sees `Display`.
    pub fn detail(&self) -> String {
        match self {
            UploadError::Status(status) => format!("{NETWORK_NOT_OK} (status {status})"),
            UploadError::Network(source) => format!("{NETWORK_NOT_OK} ({source})"),
            other => other.to_string(),
        }
    }
}
