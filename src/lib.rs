// SPDX-License-Identifier: MPL-2.0
//! `album_lens` is a desktop client for a photo-album service, built with the
//! Iced GUI framework.
//!
//! Visitors browse albums, view images in a grid, a single-image viewer or a
//! timed slideshow, and inspect EXIF details. Signed-in administrators create,
//! edit and delete albums with locally generated upload previews.

#![doc(html_root_url = "https://docs.rs/album_lens/0.1.0")]

pub mod album;
pub mod api;
pub mod app;
pub mod error;
pub mod logging;
pub mod media;
pub mod ui;
