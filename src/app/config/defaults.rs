// SPDX-License-Identifier: MPL-2.0
//! Default values for every configurable setting.

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Origin of the album REST API; routes live under `/api`.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Origin serving uploaded images under `/uploads/<album>/<file>`.
pub const DEFAULT_UPLOAD_URL: &str = "http://localhost:3000";

// ==========================================================================
// Slideshow Defaults
// ==========================================================================

/// Time each image stays on screen during a slideshow (milliseconds).
pub const DEFAULT_TRANSITION_MS: u64 = 3000;

/// Shortest accepted slideshow transition (milliseconds).
pub const MIN_TRANSITION_MS: u64 = 1000;

/// Pointer stillness before overlay controls hide (milliseconds).
pub const DEFAULT_OVERLAY_TIMEOUT_MS: u64 = 3000;

pub const MIN_OVERLAY_TIMEOUT_MS: u64 = 500;
pub const MAX_OVERLAY_TIMEOUT_MS: u64 = 30_000;

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Bounding box edge for previews of local files picked for upload.
pub const DEFAULT_LOCAL_PREVIEW_EDGE: u32 = 200;

/// JPEG quality (percent) for local previews.
pub const DEFAULT_LOCAL_PREVIEW_QUALITY: u8 = 50;

/// Bounding box edge for previews of images already on the server.
pub const DEFAULT_REMOTE_PREVIEW_EDGE: u32 = 100;

/// JPEG quality (percent) for remote previews.
pub const DEFAULT_REMOTE_PREVIEW_QUALITY: u8 = 30;

/// Maximum number of remote previews kept in memory.
pub const DEFAULT_PREVIEW_CACHE_ENTRIES: usize = 256;

/// Memory budget for cached previews (megabytes).
pub const DEFAULT_PREVIEW_CACHE_MB: u32 = 8;

pub const MAX_PREVIEW_CACHE_MB: u32 = 256;

// Compile-time sanity checks.
const _: () = {
    assert!(DEFAULT_TRANSITION_MS >= MIN_TRANSITION_MS);
    assert!(MIN_OVERLAY_TIMEOUT_MS < MAX_OVERLAY_TIMEOUT_MS);
    assert!(DEFAULT_OVERLAY_TIMEOUT_MS >= MIN_OVERLAY_TIMEOUT_MS);
    assert!(DEFAULT_OVERLAY_TIMEOUT_MS <= MAX_OVERLAY_TIMEOUT_MS);
    assert!(DEFAULT_LOCAL_PREVIEW_QUALITY >= 1 && DEFAULT_LOCAL_PREVIEW_QUALITY <= 100);
    assert!(DEFAULT_REMOTE_PREVIEW_QUALITY >= 1 && DEFAULT_REMOTE_PREVIEW_QUALITY <= 100);
    assert!(DEFAULT_REMOTE_PREVIEW_EDGE <= DEFAULT_LOCAL_PREVIEW_EDGE);
    assert!(DEFAULT_PREVIEW_CACHE_MB <= MAX_PREVIEW_CACHE_MB);
};
