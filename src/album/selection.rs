// SPDX-License-Identifier: MPL-2.0
//! Ordered set of files picked for upload.
//!
//! Each pending upload gets a [`UploadId`] that is never reused by the store.
//! Preview generation runs elsewhere and reports back with that id, so a
//! preview that finishes after its item was removed simply finds nothing to
//! attach to.

use crate::media::preview::Preview;
use std::path::{Path, PathBuf};

/// Identity of one pending upload, stable across removals of other items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadId(u64);

/// Reference to the original file on disk. The bytes are read at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHandle {
    path: PathBuf,
}

impl SourceHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name sent in the multipart body.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }

    /// MIME type guessed from the extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("tif" | "tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PendingUpload {
    id: UploadId,
    source: SourceHandle,
    preview: Option<Preview>,
    preview_ready: bool,
}

impl PendingUpload {
    pub fn id(&self) -> UploadId {
        self.id
    }

    pub fn source(&self) -> &SourceHandle {
        &self.source
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// True once generation finished, whether or not it produced a preview.
    pub fn is_preview_ready(&self) -> bool {
        self.preview_ready
    }
}

/// Work item handed to the preview generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewJob {
    pub id: UploadId,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct FileSelectionStore {
    items: Vec<PendingUpload>,
    next_id: u64,
}

impl FileSelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `sources` in order and returns one preview job per new item.
    pub fn add(&mut self, sources: impl IntoIterator<Item = SourceHandle>) -> Vec<PreviewJob> {
        let mut jobs = Vec::new();
        for source in sources {
            let id = UploadId(self.next_id);
            self.next_id += 1;
            jobs.push(PreviewJob {
                id,
                path: source.path().to_path_buf(),
            });
            self.items.push(PendingUpload {
                id,
                source,
                preview: None,
                preview_ready: false,
            });
        }
        jobs
    }

    /// Removes the item at `index`, dropping its preview.
    pub fn remove(&mut self, index: usize) -> Option<PendingUpload> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Drops every item and preview.
    pub fn remove_all(&mut self) {
        self.items.clear();
    }

    /// Attaches a finished preview to the item with `id`.
    ///
    /// `None` records a failed generation. Returns `false` when the item is
    /// gone, in which case nothing changes.
    pub fn on_preview_ready(&mut self, id: UploadId, preview: Option<Preview>) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.preview = preview;
                item.preview_ready = true;
                true
            }
            None => {
                tracing::debug!(?id, "discarding preview for removed upload");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingUpload> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PendingUpload> {
        self.items.get(index)
    }

    /// Original files, in selection order.
    pub fn sources(&self) -> Vec<SourceHandle> {
        self.items.iter().map(|item| item.source.clone()).collect()
    }

    /// Number of items still waiting for their preview.
    pub fn pending_previews(&self) -> usize {
        self.items.iter().filter(|item| !item.preview_ready).count()
    }

    /// Encoded preview bytes currently held by the store.
    pub fn preview_bytes(&self) -> usize {
        self.items
            .iter()
            .filter_map(|item| item.preview.as_ref())
            .map(Preview::size_bytes)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::preview::{downscale_bytes, PreviewSpec};
    use image_rs::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn preview() -> Preview {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(64, 48))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        downscale_bytes(&bytes, PreviewSpec::LOCAL).expect("preview")
    }

    fn handles(names: &[&str]) -> Vec<SourceHandle> {
        names.iter().map(|n| SourceHandle::new(format!("/photos/{n}"))).collect()
    }

    #[test]
    fn add_preserves_order_and_returns_jobs() {
        let mut store = FileSelectionStore::new();
        let jobs = store.add(handles(&["a.jpg", "b.jpg", "c.jpg"]));

        assert_eq!(jobs.len(), 3);
        let names: Vec<_> = store.iter().map(|i| i.source().file_name()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(store.pending_previews(), 3);
        assert!(jobs.iter().zip(store.iter()).all(|(job, item)| job.id == item.id()));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = FileSelectionStore::new();
        let first = store.add(handles(&["a.jpg"]));
        store.remove_all();
        let second = store.add(handles(&["a.jpg"]));
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn preview_ready_marks_item() {
        let mut store = FileSelectionStore::new();
        let jobs = store.add(handles(&["a.jpg", "b.jpg"]));

        assert!(store.on_preview_ready(jobs[1].id, Some(preview())));
        assert!(store.get(1).expect("item").is_preview_ready());
        assert!(store.get(1).expect("item").preview().is_some());
        assert!(!store.get(0).expect("item").is_preview_ready());
    }

    #[test]
    fn failed_preview_is_ready_without_encoding() {
        let mut store = FileSelectionStore::new();
        let jobs = store.add(handles(&["broken.jpg"]));
        assert!(store.on_preview_ready(jobs[0].id, None));
        let item = store.get(0).expect("item");
        assert!(item.is_preview_ready());
        assert!(item.preview().is_none());
    }

    #[test]
    fn preview_for_removed_item_is_noop() {
        let mut store = FileSelectionStore::new();
        let jobs = store.add(handles(&["a.jpg", "b.jpg", "c.jpg"]));
        store.remove(0);

        assert!(!store.on_preview_ready(jobs[0].id, Some(preview())));
        assert_eq!(store.len(), 2);
        assert_eq!(store.preview_bytes(), 0);
    }

    #[test]
    fn removal_does_not_misroute_other_previews() {
        let mut store = FileSelectionStore::new();
        let jobs = store.add(handles(&["a.jpg", "b.jpg", "c.jpg"]));
        store.remove(1);

        // c.jpg shifted to index 1 but keeps its identity.
        assert!(store.on_preview_ready(jobs[2].id, Some(preview())));
        let shifted = store.get(1).expect("item");
        assert_eq!(shifted.source().file_name(), "c.jpg");
        assert!(shifted.is_preview_ready());
        assert!(!store.get(0).expect("item").is_preview_ready());
    }

    #[test]
    fn preview_ready_is_idempotent() {
        let mut store = FileSelectionStore::new();
        let jobs = store.add(handles(&["a.jpg"]));
        let p = preview();
        store.on_preview_ready(jobs[0].id, Some(p.clone()));
        let bytes = store.preview_bytes();
        store.on_preview_ready(jobs[0].id, Some(p));
        assert_eq!(store.preview_bytes(), bytes);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_releases_preview_bytes() {
        let mut store = FileSelectionStore::new();
        let jobs = store.add(handles(&["a.jpg", "b.jpg"]));
        store.on_preview_ready(jobs[0].id, Some(preview()));
        store.on_preview_ready(jobs[1].id, Some(preview()));
        let both = store.preview_bytes();

        store.remove(0);
        assert!(store.preview_bytes() < both);

        store.remove_all();
        assert!(store.is_empty());
        assert_eq!(store.preview_bytes(), 0);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut store = FileSelectionStore::new();
        store.add(handles(&["a.jpg"]));
        assert!(store.remove(5).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn source_handle_guesses_mime() {
        assert_eq!(SourceHandle::new("x/IMG_1.JPG").mime_type(), "image/jpeg");
        assert_eq!(SourceHandle::new("x/scan.tiff").mime_type(), "image/tiff");
        assert_eq!(SourceHandle::new("x/notes").mime_type(), "application/octet-stream");
    }
}
