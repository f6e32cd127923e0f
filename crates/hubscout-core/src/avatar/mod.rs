mod loader;
mod store;

pub use loader::{AvatarFetcher, AvatarLoadHandle, AvatarLoader, HttpAvatarFetcher};
pub use store::{AvatarStore, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_TOTAL_BYTES};

use std::sync::Arc;

use image::ImageFormat;

/// A fetched avatar: the raw encoded bytes plus the sniffed format. Clones
/// share the byte buffer, so cache hits never copy image data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvatarImage {
    format: ImageFormat,
    bytes: Arc<[u8]>,
}

impl AvatarImage {
    pub fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
