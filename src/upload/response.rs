use crate::upload::error::UploadError;
use crate::upload::slides::folder_id;
use serde::Deserialize;
use serde_json::Value;

/// Body returned by `POST /upload`.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub image_folder: Option<String>,
    #[serde(default)]
    pub slides: Option<Vec<Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What a successful body asks the client to do.
#[derive(Debug, PartialEq)]
pub enum Reply {
    Render { folder: String, count: usize },
    Acknowledge { message: String },
}

impl UploadResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, UploadError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.as_ref().map_or(0, Vec::len)
    }

    pub fn into_reply(self) -> Result<Reply, UploadError> {
        if let Some(error) = self.error {
            return Err(UploadError::Server(error));
        }

        let count = self.slide_count();
        match (self.image_folder, self.message) {
            (Some(path), _) => {
                let folder = folder_id(&path).ok_or(UploadError::MissingFolder)?;
                Ok(Reply::Render {
                    folder: folder.to_string(),
                    count,
                })
            }
            (None, Some(message)) => Ok(Reply::Acknowledge { message }),
            (None, None) => Err(UploadError::MissingFolder),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct StopResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
