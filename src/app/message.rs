// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use super::config::{self, Config};
use crate::api::{AlbumId, ApiClient};
use crate::error::Result;
use crate::ui::notifications;
use crate::ui::viewer::component;
use crate::ui::{admin, home, login};
use iced::window;
use std::time::Instant;

use super::Screen;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level screen messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    Album(component::Message),
    Admin(admin::Message),
    Login(login::Message),
    Notification(notifications::NotificationMessage),
    /// Navigation request; routed through the session guard.
    SwitchScreen(Screen),
    OpenAlbum(AlbumId),
    /// Result of checking a stored token against the server.
    SessionVerified(Result<bool>),
    /// The id of the main window, seen on any window event.
    WindowSeen(window::Id),
    Tick(Instant),
}

/// Command-line values before validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LaunchArgs {
    pub api_url: Option<String>,
    pub upload_url: Option<String>,
    pub config_dir: Option<String>,
    pub data_dir: Option<String>,
    pub album_id: Option<String>,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug)]
pub struct Flags {
    pub config: Config,
    /// Problem reading `settings.toml`, shown once the window is up.
    pub config_warning: Option<String>,
    pub api: ApiClient,
    /// Album to open instead of the home screen.
    pub album_id: Option<AlbumId>,
}

impl Flags {
    /// Loads settings and builds the API client.
    ///
    /// Server URLs given on the command line take precedence over
    /// `settings.toml`. Directory overrides must already be registered with
    /// [`super::paths::init_cli_overrides`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) when a server URL is not a usable base URL.
    pub fn resolve(args: LaunchArgs) -> Result<Self> {
        let (config, config_warning) = config::load();
        Self::with_config(args, config, config_warning)
    }

    /// Same as [`Flags::resolve`] with an already loaded configuration.
    pub fn with_config(args: LaunchArgs, config: Config, config_warning: Option<String>) -> Result<Self> {
        let api_url = args
            .api_url
            .unwrap_or_else(|| config.server.api_url().to_string());
        let upload_url = args
            .upload_url
            .unwrap_or_else(|| config.server.upload_url().to_string());
        let api = ApiClient::new(&api_url, &upload_url)?;
        tracing::info!(api = %api_url, uploads = %upload_url, "server configured");

        let album_id = args.album_id.filter(|id| !id.trim().is_empty());

        Ok(Self {
            config,
            config_warning,
            api,
            album_id,
        })
    }
}
