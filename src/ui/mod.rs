// SPDX-License-Identifier: MPL-2.0
//! User interface screens and shared presentation pieces.
//!
//! Screens follow the Elm-style "state down, messages up" pattern: each owns
//! a `State`, handles its own `Message` and reports an `Effect` the
//! application turns into navigation or persistence.
//!
//! # Screens
//!
//! - [`home`] - Album catalog with search and sorting
//! - [`viewer`] - Album grid, single-image viewer and slideshow
//! - [`admin`] - Album management and the album edit dialog
//! - [`login`] - Admin sign-in form
//!
//! # Shared Infrastructure
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`notifications`] - Toast notification system for user feedback

pub mod admin;
pub mod design_tokens;
pub mod home;
pub mod login;
pub mod notifications;
pub mod viewer;
