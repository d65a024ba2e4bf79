use crate::page::FileSource;
use crate::transport::SelectedFile;
use crate::upload::error::UploadError;
use async_trait::async_trait;
use std::path::PathBuf;

/// File picked on the command line, read when the submission starts.
#[derive(Debug, Clone, Default)]
pub struct PathFileSource {
    path: Option<PathBuf>,
}

impl PathFileSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FileSource for PathFileSource {
    async fn selected(&self) -> Result<Option<SelectedFile>, UploadError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::ReadFile {
                path: path.clone(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "presentation".to_string());

        Ok(Some(SelectedFile::new(file_name, bytes)))
    }
}
