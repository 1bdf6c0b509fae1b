// SPDX-License-Identifier: MPL-2.0
//! Image decoding for display: bounded previews and full-size images.

pub mod image;
pub mod preview;
pub mod preview_cache;

pub use image::ImageData;
pub use preview::{Preview, PreviewOutcome, PreviewSpec};
pub use preview_cache::PreviewCache;

/// File extensions offered by the file dialogs.
pub mod extensions {
    /// Images the upload picker accepts.
    pub const UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"];

    /// `true` if `path` has one of [`UPLOAD_EXTENSIONS`], case-insensitively.
    pub fn is_uploadable(path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                UPLOAD_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}
