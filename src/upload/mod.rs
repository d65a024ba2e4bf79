pub mod error;
pub mod handler;
pub mod response;
pub mod slides;

pub use error::UploadError;
pub use handler::{SubmitOutcome, UploadHandler};
