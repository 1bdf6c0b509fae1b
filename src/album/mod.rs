// SPDX-License-Identifier: MPL-2.0
//! Album data held by the client: the browsable catalog, files selected for
//! upload, and the create/edit form that bundles them for submission.

pub mod catalog;
pub mod form;
pub mod selection;

pub use catalog::{Catalog, CatalogEntry, SortKey};
pub use form::{AlbumEditForm, AlbumMeta, ExistingImage, FormMode, SubmitPayload, SubmitState};
pub use selection::{FileSelectionStore, PendingUpload, PreviewJob, SourceHandle, UploadId};
