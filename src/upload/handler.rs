use crate::config::config::{ClientConfig, DEFAULT_IMAGE_PREFIX};
use crate::page::{FileSource, Notifier, RenderTarget};
use crate::transport::UploadTransport;
use crate::upload::error::UploadError;
use crate::upload::response::{Reply, UploadResponse};
use crate::upload::slides::slide_images;
use tokio::sync::Semaphore;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The container now holds `count` slides from `folder`.
    Rendered { folder: String, count: usize },
    /// The backend only acknowledged the upload.
    Acknowledged { message: String },
}

/// Sends the selected presentation to the backend and renders the slides it reports.
///
/// At most one submission is in flight per handler; a second one made while the
/// first is still awaiting its response is rejected with [`UploadError::Busy`].
/// Every failure is logged and shown through the notifier before `submit` returns.
pub struct UploadHandler<T, F, R, N> {
    transport: T,
    files: F,
    target: R,
    notifier: N,
    image_prefix: String,
    in_flight: Semaphore,
}

impl<T, F, R, N> UploadHandler<T, F, R, N>
where
    T: UploadTransport,
    F: FileSource,
    R: RenderTarget,
    N: Notifier,
{
    pub fn new(transport: T, files: F, target: R, notifier: N) -> Self {
        Self {
            transport,
            files,
            target,
            notifier,
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            in_flight: Semaphore::new(1),
        }
    }

    pub fn with_config(mut self, config: &ClientConfig) -> Self {
        self.image_prefix = config.image_prefix.clone();
        self
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, UploadError> {
        let submission = Uuid::new_v4();

        let result = match self.in_flight.try_acquire() {
            Ok(_permit) => self.run(submission).await,
            Err(_) => Err(UploadError::Busy),
        };

        if let Err(e) = &result {
            self.report(submission, e);
        }
        result
    }

    async fn run(&self, submission: Uuid) -> Result<SubmitOutcome, UploadError> {
        let file = self
            .files
            .selected()
            .await?
            .ok_or(UploadError::NoFileSelected)?;
        log::info!(
            "[{submission}] uploading {} ({} bytes)",
            file.file_name,
            file.bytes.len()
        );

        let resp = self
            .transport
            .upload(file)
            .await
            .map_err(UploadError::Network)?;
        if !resp.is_success() {
            return Err(UploadError::Status(resp.status));
        }

        match UploadResponse::from_slice(&resp.body)?.into_reply()? {
            Reply::Render { folder, count } => {
                self.target.clear();
                for image in slide_images(&self.image_prefix, &folder, count) {
                    self.target.append(image);
                }
                log::info!("[{submission}] rendered {count} slides from {folder}");
                Ok(SubmitOutcome::Rendered { folder, count })
            }
            Reply::Acknowledge { message } => {
                log::info!("[{submission}] upload acknowledged: {message}");
                self.notifier.notify(&message);
                Ok(SubmitOutcome::Acknowledged { message })
            }
        }
    }

    fn report(&self, submission: Uuid, e: &UploadError) {
        match e {
            UploadError::Busy => log::warn!("[{submission}] rejected: {e}"),
            _ => log::error!("[{submission}] error during upload: {}", e.detail()),
        }
        self.notifier.notify(&e.to_string());
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::{FakeTransport, RecordingNotifier, StaticFile, json};
    use super::*;
    use crate::page::Gallery;
    use crate::transport::TransportError;
    use crate::upload::slides::SlideImage;
    use std::sync::Arc;
    use tokio::sync::Notify;

    type TestHandler = UploadHandler<FakeTransport, StaticFile, Gallery, RecordingNotifier>;

    fn handler(transport: FakeTransport, file: StaticFile) -> TestHandler {
        UploadHandler::new(transport, file, Gallery::new(), RecordingNotifier::default())
    }

    fn seeded(handler: &TestHandler) {
        handler.target().append(SlideImage::new("/images", "old", 0));
    }

    #[tokio::test]
    async fn no_file_notifies_once_without_network() {
        let h = handler(FakeTransport::default(), StaticFile(None));

        let err = h.submit().await.unwrap_err();

        assert!(matches!(err, UploadError::NoFileSelected));
        assert_eq!(h.transport.upload_calls(), 0);
        assert_eq!(
            h.notifier().messages(),
            vec!["please select a PowerPoint file to upload.".to_string()]
        );
    }

    #[tokio::test]
    async fn renders_one_image_per_slide_in_order() {
        let transport = FakeTransport::replying([json(
            200,
            r#"{"image_folder": "images/abc123", "slides": [{}, {}, {}, {}]}"#,
        )]);
        let h = handler(transport, StaticFile::deck());

        let outcome = h.submit().await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Rendered {
                folder: "abc123".into(),
                count: 4
            }
        );
        let images = h.target().images();
        assert_eq!(images.len(), 4);
        for (i, image) in images.iter().enumerate() {
            assert_eq!(image.src, format!("/images/abc123/slide_{i}.png"));
            assert_eq!(image.alt, format!("slide {}", i + 1));
        }
        assert!(h.notifier().messages().is_empty());

        let sent = h.transport.sent.lock().unwrap();
        assert_eq!(sent[0].file_name, "deck.pptx");
    }

    #[tokio::test]
    async fn zero_slides_clears_container_silently() {
        let transport = FakeTransport::replying([json(
            200,
            r#"{"image_folder": "images/abc123", "slides": []}"#,
        )]);
        let h = handler(transport, StaticFile::deck());
        seeded(&h);

        h.submit().await.unwrap();

        assert!(h.target().is_empty());
        assert!(h.notifier().messages().is_empty());
    }

    #[tokio::test]
    async fn server_error_leaves_container_untouched() {
        let transport = FakeTransport::replying([json(
            200,
            r#"{"error": "failed to process presentation for OCR."}"#,
        )]);
        let h = handler(transport, StaticFile::deck());
        seeded(&h);

        let err = h.submit().await.unwrap_err();

        assert!(matches!(err, UploadError::Server(_)));
        assert_eq!(h.target().len(), 1);
        assert_eq!(
            h.notifier().messages(),
            vec!["failed to process presentation for OCR.".to_string()]
        );
    }

    #[tokio::test]
    async fn bad_status_skips_the_body() {
        // the body would be a valid gallery, but a 400 must never be parsed
        let transport = FakeTransport::replying([json(
            400,
            r#"{"image_folder": "images/abc123", "slides": [{}]}"#,
        )]);
        let h = handler(transport, StaticFile::deck());
        seeded(&h);

        let err = h.submit().await.unwrap_err();

        assert!(matches!(err, UploadError::Status(400)));
        assert_eq!(h.target().images()[0].src, "/images/old/slide_0.png");
        assert_eq!(
            h.notifier().messages(),
            vec!["network response was not ok".to_string()]
        );
    }

    #[tokio::test]
    async fn unreachable_backend_uses_generic_message() {
        let transport =
            FakeTransport::replying([Err(TransportError::Other("connection refused".into()))]);
        let h = handler(transport, StaticFile::deck());

        let err = h.submit().await.unwrap_err();

        assert!(matches!(err, UploadError::Network(_)));
        assert_eq!(
            h.notifier().messages(),
            vec!["network response was not ok".to_string()]
        );
    }

    #[tokio::test]
    async fn malformed_json_reports_parse_message() {
        let transport = FakeTransport::replying([json(200, "<html>502 Bad Gateway</html>")]);
        let h = handler(transport, StaticFile::deck());
        seeded(&h);

        let err = h.submit().await.unwrap_err();

        assert!(matches!(err, UploadError::Parse(_)));
        assert_eq!(h.target().len(), 1);
        assert_eq!(h.notifier().messages(), vec![err.to_string()]);
    }

    #[tokio::test]
    async fn resubmission_replaces_previous_slides() {
        let transport = FakeTransport::replying([
            json(200, r#"{"image_folder": "images/first", "slides": [1, 2, 3]}"#),
            json(200, r#"{"image_folder": "images/second", "slides": [1, 2]}"#),
        ]);
        let h = handler(transport, StaticFile::deck());

        h.submit().await.unwrap();
        h.submit().await.unwrap();

        let srcs: Vec<_> = h.target().images().into_iter().map(|img| img.src).collect();
        assert_eq!(
            srcs,
            vec![
                "/images/second/slide_0.png".to_string(),
                "/images/second/slide_1.png".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn acknowledgement_is_shown_without_rendering() {
        let transport = FakeTransport::replying([json(
            200,
            r#"{"message": "file uploaded successfully, processing started."}"#,
        )]);
        let h = handler(transport, StaticFile::deck());
        seeded(&h);

        let outcome = h.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Acknowledged { .. }));
        assert_eq!(h.target().len(), 1);
        assert_eq!(
            h.notifier().messages(),
            vec!["file uploaded successfully, processing started.".to_string()]
        );
    }

    #[tokio::test]
    async fn overlapping_submission_is_rejected() {
        let gate = Arc::new(Notify::new());
        let transport = FakeTransport::replying([json(
            200,
            r#"{"image_folder": "images/abc123", "slides": [1]}"#,
        )])
        .gated(gate.clone());
        let h = handler(transport, StaticFile::deck());

        let second = async {
            while h.transport.upload_calls() == 0 {
                tokio::task::yield_now().await;
            }
            let result = h.submit().await;
            gate.notify_one();
            result
        };
        let (first, second) = tokio::join!(h.submit(), second);

        assert!(matches!(second, Err(UploadError::Busy)));
        assert_eq!(
            first.unwrap(),
            SubmitOutcome::Rendered {
                folder: "abc123".into(),
                count: 1
            }
        );
        assert_eq!(h.transport.upload_calls(), 1);
        assert_eq!(h.target().len(), 1);
        assert_eq!(
            h.notifier().messages(),
            vec!["an upload is already in progress".to_string()]
        );
    }

    #[tokio::test]
    async fn slot_is_released_after_failure() {
        let transport = FakeTransport::replying([
            json(500, ""),
            json(200, r#"{"image_folder": "images/ok", "slides": [1]}"#),
        ]);
        let h = handler(transport, StaticFile::deck());

        assert!(h.submit().await.is_err());
        assert!(h.submit().await.is_ok());
        assert_eq!(h.transport.upload_calls(), 2);
    }

    #[tokio::test]
    async fn image_prefix_comes_from_config() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "SLIDES_IMAGE_PREFIX").then(|| "https://cdn.example.com/images".to_string())
        })
        .unwrap();
        let transport = FakeTransport::replying([json(
            200,
            r#"{"image_folder": "images/abc", "slides": [1]}"#,
        )]);
        let h = handler(transport, StaticFile::deck()).with_config(&config);

        h.submit().await.unwrap();

        assert_eq!(
            h.target().images()[0].src,
            "https://cdn.example.com/images/abc/slide_0.png"
        );
    }
}
