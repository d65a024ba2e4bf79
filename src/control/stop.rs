use crate::page::Notifier;
use crate::transport::UploadTransport;
use crate::upload::error::UploadError;
use crate::upload::response::StopResponse;

pub const DEFAULT_STOP_MESSAGE: &str = "processing stopped.";

/// Asks the backend to stop processing the current presentation.
pub struct StopControl<T, N> {
    transport: T,
    notifier: N,
}

impl<T, N> StopControl<T, N>
where
    T: UploadTransport,
    N: Notifier,
{
    pub fn new(transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the message shown to the user.
    pub async fn stop(&self) -> Result<String, UploadError> {
        match self.request().await {
            Ok(message) => {
                log::info!("stop acknowledged: {message}");
                self.notifier.notify(&message);
                Ok(message)
            }
            Err(e) => {
                log::error!("error during stop: {}", e.detail());
                self.notifier.notify(&e.to_string());
                Err(e)
            }
        }
    }

    async fn request(&self) -> Result<String, UploadError> {
        let resp = self.transport.stop().await.map_err(UploadError::Network)?;
        if !resp.is_success() {
            return Err(UploadError::Status(resp.status));
        }

        let body: StopResponse = serde_json::from_slice(&resp.body)?;
        if let Some(error) = body.error {
            return Err(UploadError::Server(error));
        }
        Ok(body
            .message
            .unwrap_or_else(|| DEFAULT_STOP_MESSAGE.to_string()))
    }
}
