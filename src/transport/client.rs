use crate::config::config::{ClientConfig, ConfigError};
use crate::transport::{SelectedFile, TransportError, TransportResponse, UploadTransport};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use url::Url;

pub const PRESENTATION_FIELD: &str = "presentation";

/// Talks to the presentation backend over HTTP.
pub struct HttpTransport {
    client: Client,
    upload_url: Url,
    stop_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, HttpTransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            upload_url: config.upload_url()?,
            stop_url: config.stop_url()?,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }
}

#[derive(thiserror::Error, Debug)]
pub enum HttpTransportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

async fn collect(resp: Response) -> Result<TransportResponse, TransportError> {
    let status = resp.status().as_u16();
    let body = resp.bytes().await?.to_vec();
    log::debug!("response {} with {} bytes", status, body.len());
    Ok(TransportResponse { status, body })
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn upload(&self, file: SelectedFile) -> Result<TransportResponse, TransportError> {
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part(PRESENTATION_FIELD, part);

        log::info!("POST {} ({} bytes)", self.upload_url, size);
        let resp = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;

        collect(resp).await
    }

    async fn stop(&self) -> Result<TransportResponse, TransportError> {
        log::info!("POST {}", self.stop_url);
        let resp = self.client.post(self.stop_url.clone()).send().await?;

        collect(resp).await
    }
}
