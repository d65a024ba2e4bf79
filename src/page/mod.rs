//! The page the handler works against: where the file comes from, where slides go,
//! and how the user is told about problems.

use crate::transport::SelectedFile;
use crate::upload::error::UploadError;
use crate::upload::slides::SlideImage;
use async_trait::async_trait;

pub mod file;
pub mod gallery;
pub mod notifier;

pub use file::PathFileSource;
pub use gallery::Gallery;
pub use notifier::ConsoleNotifier;

#[async_trait]
pub trait FileSource: Send + Sync {
    /// First selected file, or `None` when nothing was picked.
    async fn selected(&self) -> Result<Option<SelectedFile>, UploadError>;
}

pub trait RenderTarget: Send + Sync {
    fn clear(&self);

    fn append(&self, image: SlideImage);
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
