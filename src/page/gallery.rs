use crate::page::RenderTarget;
use crate::upload::slides::SlideImage;
use html_escape::encode_double_quoted_attribute;
use std::sync::Mutex;

pub const CONTAINER_ID: &str = "slides-container";

/// In-memory slides container.
#[derive(Debug, Default)]
pub struct Gallery {
    images: Mutex<Vec<SlideImage>>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> Vec<SlideImage> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn to_html(&self) -> String {
        let images = self.lock();
        let mut html = format!("<div id=\"{CONTAINER_ID}\">\n");
        for image in images.iter() {
            html.push_str(&format!(
                "  <img src=\"{}\" alt=\"{}\" class=\"{}\">\n",
                encode_double_quoted_attribute(&image.src),
                encode_double_quoted_attribute(&image.alt),
                encode_double_quoted_attribute(&image.class)
            ));
        }
        html.push_str("</div>\n");
        html
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SlideImage>> {
        // every mutation is a single Vec call, so a poisoned list is still whole
        self.images.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderTarget for Gallery {
    fn clear(&self) {
        self.lock().clear();
    }

    fn append(&self, image: SlideImage) {
        self.lock().push(image);
    }
}
