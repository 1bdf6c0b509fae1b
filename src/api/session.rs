// SPDX-License-Identifier: MPL-2.0
//! Explicit authentication session.
//!
//! The bearer token lives here and nowhere else. The application owns one
//! `Session` and hands it to whatever needs to authenticate a request.

use std::fmt;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    verified: bool,
}

impl Session {
    /// Restores a session from a persisted token. It is not trusted until
    /// [`Session::mark_verified`] is called.
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            verified: false,
        }
    }

    /// Stores a token freshly issued by the login endpoint.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
        self.verified = true;
    }

    pub fn mark_verified(&mut self) {
        self.verified = self.token.is_some();
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.verified = false;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Whether the token is present and was accepted by the server.
    pub fn is_signed_in(&self) -> bool {
        self.verified && self.token.is_some()
    }

    /// `Authorization` header value, if a token is held.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.token.is_some())
            .field("verified", &self.verified)
            .finish()
    }
}
