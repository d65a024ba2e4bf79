pub const SLIDE_IMAGE_CLASS: &str = "slide-image";

/// One `<img>` in the slides container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideImage {
    pub src: String,
    pub alt: String,
    pub class: String,
}

impl SlideImage {
    pub fn new(prefix: &str, folder: &str, index: usize) -> Self {
        Self {
            src: format!("{prefix}/{folder}/slide_{index}.png"),
            alt: format!("slide {}", index + 1),
            class: SLIDE_IMAGE_CLASS.to_string(),
        }
    }
}

/// Last non-empty segment of a server-side folder path.
///
/// Backends on Windows report paths like `images\3f2a9c`, so both separators count.
pub fn folder_id(path: &str) -> Option<&str> {
    path.rsplit(['/', '\\']).find(|segment| !segment.is_empty())
}

/// Images for `count` slides, in index order.
pub fn slide_images(prefix: &str, folder: &str, count: usize) -> impl Iterator<Item = SlideImage> {
    (0..count).map(move |index| SlideImage::new(prefix, folder, index))
}
