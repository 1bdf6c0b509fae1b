// SPDX-License-Identifier: MPL-2.0
//! Full-size images for the viewer and slideshow.

use super::preview::{apply_orientation, read_orientation};
use crate::error::Result;
use iced::widget::image;
use image_rs::GenericImageView;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Decodes an encoded image into upright RGBA pixels.
///
/// # Errors
///
/// Returns [`crate::error::Error::Decode`] when the bytes are not a supported
/// image format.
pub fn decode(bytes: &[u8]) -> Result<ImageData> {
    let decoded = image_rs::load_from_memory(bytes)?;
    let upright = apply_orientation(decoded, read_orientation(bytes));
    let (width, height) = upright.dimensions();
    Ok(ImageData::from_rgba(width, height, upright.to_rgba8().into_vec()))
}

/// Off-thread wrapper around [`decode`].
pub async fn decode_async(bytes: Vec<u8>) -> Result<ImageData> {
    tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|e| crate::error::Error::Decode(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image_rs::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn decode_keeps_natural_size() {
        let data = decode(&png(64, 48)).expect("decode");
        assert_eq!((data.width, data.height), (64, 48));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode(b"definitely not an image"), Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn async_decode_matches_sync() {
        let data = decode_async(png(8, 4)).await.expect("decode");
        assert_eq!((data.width, data.height), (8, 4));
    }
}
