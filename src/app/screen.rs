// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration and the admin route guard.

use crate::api::Session;

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Album,
    Admin,
    Login,
}

impl Screen {
    /// Screen actually shown when `self` is requested.
    ///
    /// `Admin` needs a session the server has accepted; anything less lands
    /// on `Login`.
    #[must_use]
    pub fn guarded(self, session: &Session) -> Screen {
        match self {
            Screen::Admin if !session.is_signed_in() => Screen::Login,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_without_session_goes_to_login() {
        assert_eq!(Screen::Admin.guarded(&Session::default()), Screen::Login);
    }

    #[test]
    fn unverified_token_is_not_enough() {
        let session = Session::from_token(Some("persisted".into()));
        assert_eq!(Screen::Admin.guarded(&session), Screen::Login);
    }

    #[test]
    fn verified_session_reaches_admin() {
        let mut session = Session::default();
        session.set_token("fresh".into());
        assert_eq!(Screen::Admin.guarded(&session), Screen::Admin);
    }

    #[test]
    fn public_screens_are_unguarded() {
        let session = Session::default();
        for screen in [Screen::Home, Screen::Album, Screen::Login] {
            assert_eq!(screen.guarded(&session), screen);
        }
    }
}
