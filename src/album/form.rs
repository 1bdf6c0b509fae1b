// SPDX-License-Identifier: MPL-2.0
//! Create/Edit album form.
//!
//! Both modes share the same metadata fields, file selection and submit
//! lifecycle. Edit mode additionally knows the album id and its existing
//! images, any of which can be marked for deletion before submitting.
//!
//! The form never talks to the network. [`AlbumEditForm::begin_submit`] hands
//! out a [`SubmitPayload`] and flips the in-flight guard; the caller reports
//! back with [`AlbumEditForm::submit_succeeded`] or
//! [`AlbumEditForm::submit_failed`].

use super::selection::{FileSelectionStore, PreviewJob, SourceHandle, UploadId};
use crate::api::{Album, AlbumId, AlbumImage, ImageId};
use crate::error::{Error, Result};
use crate::media::preview::{Preview, PreviewOutcome};
use reqwest::multipart::{Form, Part};
use std::collections::HashSet;
use std::fmt;

/// Today's date as `YYYY-MM-DD` in local time.
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumMeta {
    pub name: String,
    pub description: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
}

impl AlbumMeta {
    fn blank() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            date: today(),
        }
    }
}

/// An image already stored on the server, shown while editing.
#[derive(Debug, Clone)]
pub struct ExistingImage {
    pub id: ImageId,
    pub file_name: String,
    /// Static URL of the full image.
    pub url: String,
    preview: Option<Preview>,
    preview_ready: bool,
}

impl ExistingImage {
    pub fn new(image: &AlbumImage, url: String) -> Self {
        Self {
            id: image.id.clone(),
            file_name: image.file_name.clone(),
            url,
            preview: None,
            preview_ready: false,
        }
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn is_preview_ready(&self) -> bool {
        self.preview_ready
    }
}

#[derive(Debug, Clone)]
pub enum FormMode {
    Create,
    Edit {
        album_id: AlbumId,
        existing: Vec<ExistingImage>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    MissingDescription,
    MissingDate,
    NoImages,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName => write!(f, "Album name is required"),
            ValidationError::MissingDescription => write!(f, "Description is required"),
            ValidationError::MissingDate => write!(f, "Date is required"),
            ValidationError::NoImages => write!(f, "Select at least one image"),
        }
    }
}

/// Where a payload is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(AlbumId),
}

/// One multipart field, before file contents are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(SourceHandle),
}

/// Everything needed to send one create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPayload {
    pub target: SubmitTarget,
    pub meta: AlbumMeta,
    /// Original files in selection order. Previews are never uploaded.
    pub images: Vec<SourceHandle>,
    pub images_to_delete: Vec<ImageId>,
}

impl SubmitPayload {
    /// Multipart fields in send order: `name`, `description`, `date`, one
    /// `images` per file, then `imagesToDelete` as a JSON array when any image
    /// is marked.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut fields = vec![
            ("name", FieldValue::Text(self.meta.name.trim().to_string())),
            (
                "description",
                FieldValue::Text(self.meta.description.trim().to_string()),
            ),
            ("date", FieldValue::Text(self.meta.date.trim().to_string())),
        ];
        fields.extend(
            self.images
                .iter()
                .map(|source| ("images", FieldValue::File(source.clone()))),
        );
        if !self.images_to_delete.is_empty() {
            let ids = serde_json::Value::from(self.images_to_delete.clone()).to_string();
            fields.push(("imagesToDelete", FieldValue::Text(ids)));
        }
        fields
    }

    /// Reads every original file and builds the request body.
    pub async fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields() {
            form = match value {
                FieldValue::Text(text) => form.text(name, text),
                FieldValue::File(source) => {
                    let bytes = tokio::fs::read(source.path()).await.map_err(|e| {
                        Error::Io(format!("{}: {}", source.path().display(), e))
                    })?;
                    let part = Part::bytes(bytes)
                        .file_name(source.file_name())
                        .mime_str(source.mime_type())
                        .map_err(Error::from)?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[derive(Debug)]
pub struct AlbumEditForm {
    mode: FormMode,
    meta: AlbumMeta,
    selection: FileSelectionStore,
    marked_for_deletion: HashSet<ImageId>,
    state: SubmitState,
    error: Option<String>,
}

impl AlbumEditForm {
    /// Empty form for a new album, dated today.
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create, AlbumMeta::blank())
    }

    /// Form prefilled from an existing album. A missing date becomes today.
    pub fn edit(album: &Album, existing: Vec<ExistingImage>) -> Self {
        let meta = AlbumMeta {
            name: album.name.clone(),
            description: album.description.clone(),
            date: album
                .date
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(today),
        };
        Self::with_mode(
            FormMode::Edit {
                album_id: album.id.clone(),
                existing,
            },
            meta,
        )
    }

    fn with_mode(mode: FormMode, meta: AlbumMeta) -> Self {
        Self {
            mode,
            meta,
            selection: FileSelectionStore::new(),
            marked_for_deletion: HashSet::new(),
            state: SubmitState::Idle,
            error: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn album_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { album_id, .. } => Some(album_id),
        }
    }

    pub fn meta(&self) -> &AlbumMeta {
        &self.meta
    }

    pub fn set_name(&mut self, name: String) {
        self.meta.name = name;
    }

    pub fn set_description(&mut self, description: String) {
        self.meta.description = description;
    }

    pub fn set_date(&mut self, date: String) {
        self.meta.date = date;
    }

    pub fn selection(&self) -> &FileSelectionStore {
        &self.selection
    }

    /// Adds picked files and returns the preview jobs to start.
    pub fn add_files(&mut self, sources: Vec<SourceHandle>) -> Vec<PreviewJob> {
        self.selection.add(sources)
    }

    pub fn remove_file(&mut self, index: usize) {
        self.selection.remove(index);
    }

    pub fn remove_all_files(&mut self) {
        self.selection.remove_all();
    }

    pub fn on_preview_ready(&mut self, id: UploadId, preview: Option<Preview>) -> bool {
        self.selection.on_preview_ready(id, preview)
    }

    pub fn existing_images(&self) -> &[ExistingImage] {
        match &self.mode {
            FormMode::Create => &[],
            FormMode::Edit { existing, .. } => existing,
        }
    }

    /// Stores a regenerated thumbnail for an existing image. Unknown ids are ignored.
    pub fn set_existing_preview(&mut self, image_id: &str, outcome: PreviewOutcome) -> bool {
        let FormMode::Edit { existing, .. } = &mut self.mode else {
            return false;
        };
        match existing.iter_mut().find(|image| image.id == image_id) {
            Some(image) => {
                image.preview = outcome.into_preview();
                image.preview_ready = true;
                true
            }
            None => false,
        }
    }

    /// Flips the deletion mark of an existing image.
    pub fn toggle_deletion(&mut self, image_id: &str) {
        if !self.existing_images().iter().any(|image| image.id == image_id) {
            return;
        }
        if !self.marked_for_deletion.remove(image_id) {
            self.marked_for_deletion.insert(image_id.to_string());
        }
    }

    pub fn is_marked(&self, image_id: &str) -> bool {
        self.marked_for_deletion.contains(image_id)
    }

    pub fn marked_count(&self) -> usize {
        self.marked_for_deletion.len()
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.meta.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.meta.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.meta.date.trim().is_empty() {
            return Err(ValidationError::MissingDate);
        }
        if matches!(self.mode, FormMode::Create) && self.selection.is_empty() {
            return Err(ValidationError::NoImages);
        }
        Ok(())
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.validate().is_ok()
    }

    /// Last submit failure, shown inline until the next attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enters `Submitting` and returns the payload to send.
    ///
    /// Returns `None`, without changing state, when the form is invalid or a
    /// submit is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitPayload> {
        if !self.can_submit() {
            return None;
        }

        let (target, images_to_delete) = match &self.mode {
            FormMode::Create => (SubmitTarget::Create, Vec::new()),
            FormMode::Edit { album_id, existing } => (
                SubmitTarget::Update(album_id.clone()),
                existing
                    .iter()
                    .filter(|image| self.marked_for_deletion.contains(&image.id))
                    .map(|image| image.id.clone())
                    .collect(),
            ),
        };

        self.state = SubmitState::Submitting;
        self.error = None;

        Some(SubmitPayload {
            target,
            meta: self.meta.clone(),
            images: self.selection.sources(),
            images_to_delete,
        })
    }

    /// Returns to `Idle`, dropping previews and resetting local state.
    pub fn submit_succeeded(&mut self) {
        self.state = SubmitState::Idle;
        self.error = None;
        self.selection.remove_all();

        match &mut self.mode {
            FormMode::Create => self.meta = AlbumMeta::blank(),
            FormMode::Edit { existing, .. } => {
                let marked = std::mem::take(&mut self.marked_for_deletion);
                existing.retain(|image| !marked.contains(&image.id));
            }
        }
    }

    /// Returns to `Idle` keeping every field, file and mark for a retry.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.state = SubmitState::Idle;
        self.error = Some(message.into());
    }
}
