// SPDX-License-Identifier: MPL-2.0
//! Memory-bounded LRU cache of regenerated server thumbnails.
//!
//! Editing an album regenerates a small preview for every existing image.
//! Keeping them keyed by URL means closing and reopening the edit dialog
//! does not download and decode the same images again.
//!
//! # Design
//!
//! - **LRU eviction**: least recently used previews are evicted first
//! - **Memory-bounded**: total encoded bytes are capped
//! - **URL-keyed**: one entry per static image URL

use crate::media::preview::Preview;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of cached thumbnails.
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Default byte budget (8 MB of encoded JPEG).
pub const DEFAULT_MAX_BYTES: usize = 8 * 1024 * 1024;

pub struct PreviewCache {
    cache: LruCache<String, Preview>,
    max_bytes: usize,
    current_bytes: usize,
}

impl PreviewCache {
    /// Creates a cache holding at most `max_entries` previews and `max_bytes`
    /// encoded bytes. A zero entry count falls back to the default.
    #[must_use]
    pub fn new(max_entries: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries)
            .or(NonZeroUsize::new(DEFAULT_MAX_ENTRIES))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            max_bytes,
            current_bytes: 0,
        }
    }

    /// Inserts a preview, evicting older entries until it fits.
    ///
    /// Returns `false` when the preview alone exceeds the byte budget.
    pub fn insert(&mut self, url: String, preview: Preview) -> bool {
        let size = preview.size_bytes();
        if size > self.max_bytes {
            return false;
        }

        if let Some(existing) = self.cache.pop(&url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + size > self.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
            }
        }

        self.current_bytes += size;
        if let Some((_, evicted)) = self.cache.push(url, preview) {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
        }
        true
    }

    /// Looks up a preview, refreshing its LRU position.
    pub fn get(&mut self, url: &str) -> Option<Preview> {
        self.cache.get(url).cloned()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Total encoded bytes currently held.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::preview::{downscale_bytes, PreviewSpec};
    use image_rs::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn sample_preview(width: u32, height: u32) -> Preview {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        downscale_bytes(&bytes, PreviewSpec::REMOTE).expect("preview")
    }

    #[test]
    fn get_returns_inserted_preview() {
        let mut cache = PreviewCache::default();
        assert!(cache.insert("a".into(), sample_preview(40, 30)));

        let hit = cache.get("a").expect("cached");
        assert_eq!((hit.width(), hit.height()), (40, 30));
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn entry_limit_evicts_least_recently_used() {
        let mut cache = PreviewCache::new(2, DEFAULT_MAX_BYTES);
        cache.insert("a".into(), sample_preview(10, 10));
        cache.insert("b".into(), sample_preview(10, 10));
        let _ = cache.get("a");
        cache.insert("c".into(), sample_preview(10, 10));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn byte_budget_is_respected() {
        let preview = sample_preview(50, 50);
        let size = preview.size_bytes();
        let mut cache = PreviewCache::new(16, size * 2);

        cache.insert("a".into(), preview.clone());
        cache.insert("b".into(), preview.clone());
        cache.insert("c".into(), preview);

        assert_eq!(cache.len(), 2);
        assert!(cache.memory_usage() <= size * 2);
    }

    #[test]
    fn oversized_preview_is_rejected() {
        let preview = sample_preview(50, 50);
        let mut cache = PreviewCache::new(16, preview.size_bytes() - 1);
        assert!(!cache.insert("a".into(), preview));
        assert!(cache.is_empty());
    }

    #[test]
    fn reinserting_same_url_does_not_double_count() {
        let preview = sample_preview(20, 20);
        let size = preview.size_bytes();
        let mut cache = PreviewCache::default();

        cache.insert("a".into(), preview.clone());
        cache.insert("a".into(), preview);
        assert_eq!(cache.memory_usage(), size);

        cache.clear();
        assert_eq!(cache.memory_usage(), 0);
    }
}
