// SPDX-License-Identifier: MPL-2.0
//! Bounded JPEG previews for local picks and remote album images.
//!
//! A preview is decoded, turned upright according to its EXIF orientation,
//! shrunk into a bounding box while keeping its aspect ratio, then re-encoded
//! as an in-memory JPEG. Every call is independent; callers tag results with
//! their own identity before handing them back to a store.
//!
//! When decoding fails the outcome is [`PreviewOutcome::Fallback`] carrying
//! the original source location, so the caller still has something to show.

use crate::error::{Error, Result};
use iced::widget::image::Handle;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{imageops::FilterType, DynamicImage, GenericImageView};
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Bounding box and JPEG quality for one kind of preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSpec {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality, 1–100.
    pub quality: u8,
}

impl PreviewSpec {
    /// Previews of files picked from disk before upload.
    pub const LOCAL: PreviewSpec = PreviewSpec {
        max_width: 200,
        max_height: 200,
        quality: 50,
    };

    /// Regenerated thumbnails of images already on the server.
    pub const REMOTE: PreviewSpec = PreviewSpec {
        max_width: 100,
        max_height: 100,
        quality: 30,
    };

    /// Creates a spec, clamping every field into its valid range.
    pub fn new(max_width: u32, max_height: u32, quality: u8) -> Self {
        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
            quality: quality.clamp(1, 100),
        }
    }
}

/// Computes the preview size for an image of `width`×`height`.
///
/// The result never upscales, never exceeds the box, and keeps the aspect
/// ratio to within one pixel of rounding. Landscape and square images are
/// constrained by width first; portrait images by height first.
pub fn scaled_dimensions(width: u32, height: u32, spec: PreviewSpec) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (
            width.clamp(1, spec.max_width),
            height.clamp(1, spec.max_height),
        );
    }

    let by_width = f64::from(spec.max_width) / f64::from(width);
    let by_height = f64::from(spec.max_height) / f64::from(height);
    if by_width >= 1.0 && by_height >= 1.0 {
        return (width, height);
    }

    let width_bound = if width >= height {
        by_width <= by_height
    } else {
        by_width < by_height
    };

    if width_bound {
        let scaled = (f64::from(height) * by_width).round().max(1.0) as u32;
        (spec.max_width, scaled.min(spec.max_height))
    } else {
        let scaled = (f64::from(width) * by_height).round().max(1.0) as u32;
        (scaled.min(spec.max_width), spec.max_height)
    }
}

/// An encoded preview held entirely in memory.
#[derive(Clone)]
pub struct Preview {
    width: u32,
    height: u32,
    jpeg: Vec<u8>,
    handle: Handle,
}

impl Preview {
    fn new(width: u32, height: u32, jpeg: Vec<u8>) -> Self {
        let handle = Handle::from_bytes(jpeg.clone());
        Self {
            width,
            height,
            jpeg,
            handle,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded JPEG bytes.
    pub fn jpeg(&self) -> &[u8] {
        &self.jpeg
    }

    /// Size of the encoded preview in bytes.
    pub fn size_bytes(&self) -> usize {
        self.jpeg.len()
    }

    /// Renderable handle. Cloning it is cheap and keeps the GPU texture shared.
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.jpeg.len())
            .finish()
    }
}

/// Result of generating a preview for one source.
#[derive(Debug, Clone)]
pub enum PreviewOutcome {
    Encoded(Preview),
    /// Decoding failed; the original location is returned untouched.
    Fallback(String),
}

impl PreviewOutcome {
    pub fn preview(&self) -> Option<&Preview> {
        match self {
            PreviewOutcome::Encoded(preview) => Some(preview),
            PreviewOutcome::Fallback(_) => None,
        }
    }

    pub fn into_preview(self) -> Option<Preview> {
        match self {
            PreviewOutcome::Encoded(preview) => Some(preview),
            PreviewOutcome::Fallback(_) => None,
        }
    }
}

/// Decodes `bytes`, applies EXIF orientation and encodes a bounded JPEG.
///
/// The decoded pixel buffers are dropped before returning, on success and
/// failure alike.
pub fn downscale_bytes(bytes: &[u8], spec: PreviewSpec) -> Result<Preview> {
    let decoded = image_rs::load_from_memory(bytes)?;
    let upright = apply_orientation(decoded, read_orientation(bytes));

    let (natural_width, natural_height) = upright.dimensions();
    let (width, height) = scaled_dimensions(natural_width, natural_height, spec);
    let resized = if (width, height) == (natural_width, natural_height) {
        upright
    } else {
        upright.resize_exact(width, height, FilterType::Triangle)
    };

    // JPEG has no alpha channel.
    let rgb = resized.to_rgb8();
    drop(resized);

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, spec.quality)
        .encode_image(&rgb)
        .map_err(|e| Error::Decode(e.to_string()))?;

    Ok(Preview::new(width, height, jpeg))
}

/// Builds a preview from a file on disk.
pub fn preview_file(path: &Path, spec: PreviewSpec) -> PreviewOutcome {
    let result = std::fs::read(path)
        .map_err(Error::from)
        .and_then(|bytes| downscale_bytes(&bytes, spec));

    match result {
        Ok(preview) => PreviewOutcome::Encoded(preview),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "preview generation failed");
            PreviewOutcome::Fallback(path.display().to_string())
        }
    }
}

/// Async wrapper around [`preview_file`] that keeps decoding off the UI thread.
pub async fn load_local(path: PathBuf, spec: PreviewSpec) -> PreviewOutcome {
    let fallback = path.display().to_string();
    tokio::task::spawn_blocking(move || preview_file(&path, spec))
        .await
        .unwrap_or(PreviewOutcome::Fallback(fallback))
}

/// Fetches `url` and builds a preview from the response body.
///
/// Any failure, network or decode, yields [`PreviewOutcome::Fallback`] with
/// the URL so the caller can render the full image instead.
pub async fn load_remote(http: reqwest::Client, url: String, spec: PreviewSpec) -> PreviewOutcome {
    let bytes = match fetch(&http, &url).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(%url, error = %err, "thumbnail download failed");
            return PreviewOutcome::Fallback(url);
        }
    };

    let fallback = url.clone();
    let outcome = tokio::task::spawn_blocking(move || match downscale_bytes(&bytes, spec) {
        Ok(preview) => PreviewOutcome::Encoded(preview),
        Err(err) => {
            tracing::warn!(%url, error = %err, "thumbnail decode failed");
            PreviewOutcome::Fallback(url)
        }
    })
    .await;

    outcome.unwrap_or(PreviewOutcome::Fallback(fallback))
}

async fn fetch(http: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = http.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Reads the EXIF orientation tag (1–8), defaulting to 1 (upright).
pub(crate) fn read_orientation(bytes: &[u8]) -> u32 {
    exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|exif| {
            exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

pub(crate) fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}
