// SPDX-License-Identifier: MPL-2.0
//! Info panel state: which image's metadata is wanted and what arrived.
//!
//! Only the response for the most recently requested image is applied; a
//! response for any other id is stale and dropped.

use crate::api::{ImageId, ImageMetadata};

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Loading,
    Loaded(ImageMetadata),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct State {
    visible: bool,
    requested: Option<ImageId>,
    content: Option<Content>,
}

impl State {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Flips visibility. Returns the id to fetch when opening.
    pub fn toggle(&mut self, current: Option<&str>) -> Option<ImageId> {
        if self.visible {
            self.hide();
            None
        } else {
            self.visible = true;
            self.request(current)
        }
    }

    /// Called when the displayed image changes. Returns the id to fetch when
    /// the panel is open.
    pub fn follow(&mut self, current: Option<&str>) -> Option<ImageId> {
        if !self.visible || self.requested.as_deref() == current {
            return None;
        }
        self.request(current)
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.requested = None;
        self.content = None;
    }

    /// Applies a fetch result. Returns `false` if it was stale and ignored.
    pub fn apply(&mut self, image_id: &str, result: Result<ImageMetadata, String>) -> bool {
        if !self.visible || self.requested.as_deref() != Some(image_id) {
            tracing::debug!(image = %image_id, "discarding stale metadata response");
            return false;
        }
        self.content = Some(match result {
            Ok(metadata) => Content::Loaded(metadata),
            Err(message) => Content::Failed(message),
        });
        true
    }

    fn request(&mut self, current: Option<&str>) -> Option<ImageId> {
        let id = current?.to_string();
        self.requested = Some(id.clone());
        self.content = Some(Content::Loading);
        Some(id)
    }
}
