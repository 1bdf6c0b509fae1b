// SPDX-License-Identifier: MPL-2.0
//! JSON shapes exchanged with the gallery server.

use serde::{Deserialize, Serialize};

pub type AlbumId = String;
pub type ImageId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub number_of_images: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumImage {
    pub id: ImageId,
    pub album_id: AlbumId,
    pub file_name: String,
}

/// Body of `GET /api/albums/:id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlbumDetail {
    pub album: Album,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

/// EXIF summary stored server-side for one image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageMetadata {
    pub image_id: ImageId,
    #[serde(default)]
    pub camera_make: Option<String>,
    #[serde(default)]
    pub camera_model: Option<String>,
    #[serde(default)]
    pub lens_model: Option<String>,
    #[serde(default)]
    pub iso: Option<u32>,
    #[serde(default)]
    pub aperture: Option<f64>,
    #[serde(default)]
    pub shutter_speed: Option<String>,
    #[serde(default)]
    pub focal_length: Option<f64>,
    #[serde(default)]
    pub light_source: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl ImageMetadata {
    /// File size in kilobytes with two decimals, e.g. `"512.00 KB"`.
    pub fn file_size_label(&self) -> Option<String> {
        self.file_size
            .map(|bytes| format!("{:.2} KB", bytes as f64 / 1024.0))
    }

    pub fn aperture_label(&self) -> Option<String> {
        self.aperture.map(|f| format!("f/{}", f))
    }

    pub fn focal_length_label(&self) -> Option<String> {
        self.focal_length.map(|mm| format!("{}mm", mm))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageMetadataEnvelope {
    pub metadata: ImageMetadata,
}

/// Most common camera settings across an album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModeMetadata {
    #[serde(default)]
    pub camera_model: Option<String>,
    #[serde(default)]
    pub lens_model: Option<String>,
    #[serde(default)]
    pub aperture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_detail_parses_server_body() {
        let body = r#"{
            "album": {"id": "a1", "name": "Trip", "description": "Summer", "date": "2024-06-01", "number_of_images": 2},
            "images": [
                {"id": "i1", "album_id": "a1", "file_name": "one.jpg"},
                {"id": "i2", "album_id": "a1", "file_name": "two.jpg"}
            ]
        }"#;
        let detail: AlbumDetail = serde_json::from_str(body).expect("parse");
        assert_eq!(detail.album.name, "Trip");
        assert_eq!(detail.images.len(), 2);
        assert_eq!(detail.images[1].file_name, "two.jpg");
    }

    #[test]
    fn album_without_date_parses() {
        let album: Album = serde_json::from_str(
            r#"{"id": "a", "name": "n", "description": "d", "date": null, "number_of_images": 0}"#,
        )
        .expect("parse");
        assert!(album.date.is_none());
    }

    #[test]
    fn metadata_envelope_unwraps() {
        let body = r#"{"metadata": {"image_id": "i1", "iso": 200, "aperture": 2.8, "file_size": 524288}}"#;
        let envelope: ImageMetadataEnvelope = serde_json::from_str(body).expect("parse");
        let meta = envelope.metadata;
        assert_eq!(meta.iso, Some(200));
        assert_eq!(meta.aperture_label().as_deref(), Some("f/2.8"));
        assert_eq!(meta.file_size_label().as_deref(), Some("512.00 KB"));
        assert!(meta.focal_length_label().is_none());
    }

    #[test]
    fn login_request_serializes_credentials() {
        let json = serde_json::to_value(LoginRequest {
            username: "admin",
            password: "secret",
        })
        .expect("serialize");
        assert_eq!(json["username"], "admin");
        assert_eq!(json["password"], "secret");
    }
}
