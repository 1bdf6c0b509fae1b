// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Each screen reports an `Effect` after handling its own message; the
//! handlers here turn those effects into navigation, session changes,
//! persistence and notifications.

use super::config::{self, Config};
use super::persisted_state::AppState;
use super::{Message, Screen};
use crate::api::{AlbumId, ApiClient, Session};
use crate::error::Result;
use crate::media::PreviewCache;
use crate::ui::notifications::{self, Notification};
use crate::ui::viewer::{component, state};
use crate::ui::{admin, home, login};
use iced::{window, Task};
use std::time::Instant;

const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please sign in again.";

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub screen: &'a mut Screen,
    pub home: &'a mut home::State,
    pub album: &'a mut Option<component::State>,
    pub admin: &'a mut Option<admin::State>,
    pub login: &'a mut login::State,
    pub api: &'a ApiClient,
    pub session: &'a mut Session,
    pub config: &'a mut Config,
    pub cache: &'a mut PreviewCache,
    pub app_state: &'a mut AppState,
    pub notifications: &'a mut notifications::Manager,
    pub fullscreen: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
    pub pending_admin: &'a mut bool,
}

impl UpdateContext<'_> {
    /// Writes the persisted state, surfacing failures as a warning toast.
    ///
    /// Skipped under test so unit tests never touch the user's data dir.
    fn persist(&mut self) {
        if cfg!(test) {
            return;
        }
        if let Some(warning) = self.app_state.save() {
            self.notifications.push(Notification::warning(warning));
        }
    }

    /// Writes the settings file, surfacing failures as a warning toast.
    fn save_config(&mut self) {
        if cfg!(test) {
            return;
        }
        if let Err(err) = config::save(&*self.config) {
            tracing::warn!(error = %err, "could not save settings");
            self.notifications
                .push(Notification::warning(format!("Settings not saved: {err}")));
        }
    }

    fn remember_token(&mut self, token: Option<String>) {
        self.app_state.session_token = token;
        self.persist();
    }
}

pub fn handle_home_message(ctx: &mut UpdateContext<'_>, message: home::Message) -> Task<Message> {
    let mut home_ctx = home::Context {
        api: ctx.api,
        cache: &mut *ctx.cache,
        cover_spec: ctx.config.previews.remote_spec(),
    };
    let (effect, task) = ctx.home.handle_message(message, &mut home_ctx);
    let home_task = task.map(Message::Home);

    let side_effect = match effect {
        home::Effect::None => Task::none(),
        home::Effect::OpenAlbum(album_id) => handle_open_album(ctx, album_id),
        home::Effect::OpenAdmin => handle_screen_switch(ctx, Screen::Admin),
    };

    Task::batch([home_task, side_effect])
}

pub fn handle_album_message(
    ctx: &mut UpdateContext<'_>,
    message: component::Message,
) -> Task<Message> {
    if let component::Message::RawEvent { window, .. } = &message {
        *ctx.window_id = Some(*window);
    }

    let Some(album) = ctx.album.as_mut() else {
        tracing::debug!(?message, "album message without an open album");
        return Task::none();
    };

    let mut album_ctx = component::Context {
        api: ctx.api,
        session: &*ctx.session,
        cache: &mut *ctx.cache,
        thumbnail_spec: ctx.config.previews.remote_spec(),
        download_dir: ctx.app_state.last_download_directory.as_deref(),
    };
    let (effect, task) = album.handle_message(message, Instant::now(), &mut album_ctx);
    let album_task = task.map(Message::Album);

    let side_effect = match effect {
        component::Effect::None => Task::none(),
        component::Effect::SetFullscreen(desired) => {
            update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), desired)
        }
        component::Effect::GoHome => handle_screen_switch(ctx, Screen::Home),
        component::Effect::ShowError(message) => {
            ctx.notifications.push(Notification::error(message));
            Task::none()
        }
        component::Effect::ShowSuccess(message) => {
            ctx.notifications.push(Notification::success(message));
            Task::none()
        }
        component::Effect::Downloaded(path) => {
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            ctx.notifications
                .push(Notification::success(format!("Image saved as {name}")));
            if let Some(directory) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                ctx.app_state.last_download_directory = Some(directory.to_path_buf());
                ctx.persist();
            }
            Task::none()
        }
        component::Effect::TransitionChanged(transition) => {
            ctx.config.slideshow.set_transition(transition);
            ctx.save_config();
            Task::none()
        }
        component::Effect::SessionExpired => expire_session(ctx),
    };

    Task::batch([album_task, side_effect])
}

pub fn handle_admin_message(ctx: &mut UpdateContext<'_>, message: admin::Message) -> Task<Message> {
    let Some(admin) = ctx.admin.as_mut() else {
        tracing::debug!(?message, "admin message without an open admin panel");
        return Task::none();
    };

    let mut admin_ctx = admin::Context {
        api: ctx.api,
        session: &*ctx.session,
        cache: &mut *ctx.cache,
        local_spec: ctx.config.previews.local_spec(),
        remote_spec: ctx.config.previews.remote_spec(),
        open_dir: ctx.app_state.last_open_directory.as_deref(),
    };
    let (effect, task) = admin.handle_message(message, &mut admin_ctx);
    let admin_task = task.map(Message::Admin);

    let side_effect = match effect {
        admin::Effect::None => Task::none(),
        admin::Effect::GoHome => handle_screen_switch(ctx, Screen::Home),
        admin::Effect::SignOut => {
            tracing::info!("signed out");
            ctx.session.clear();
            ctx.remember_token(None);
            ctx.notifications.push(Notification::info("Signed out"));
            handle_screen_switch(ctx, Screen::Home)
        }
        admin::Effect::SessionExpired => expire_session(ctx),
        admin::Effect::ShowError(message) => {
            ctx.notifications.push(Notification::error(message));
            Task::none()
        }
        admin::Effect::ShowSuccess(message) => {
            ctx.notifications.push(Notification::success(message));
            Task::none()
        }
        admin::Effect::RememberOpenDir(directory) => {
            ctx.app_state.last_open_directory = Some(directory);
            ctx.persist();
            Task::none()
        }
    };

    Task::batch([admin_task, side_effect])
}

pub fn handle_login_message(ctx: &mut UpdateContext<'_>, message: login::Message) -> Task<Message> {
    let (effect, task) = ctx.login.handle_message(message, ctx.api);
    let login_task = task.map(Message::Login);

    let side_effect = match effect {
        login::Effect::None => Task::none(),
        login::Effect::SignedIn(token) => {
            ctx.session.set_token(token.clone());
            ctx.remember_token(Some(token));
            *ctx.pending_admin = false;
            handle_screen_switch(ctx, Screen::Admin)
        }
        login::Effect::GoHome => {
            *ctx.pending_admin = false;
            handle_screen_switch(ctx, Screen::Home)
        }
    };

    Task::batch([login_task, side_effect])
}

/// Switches screens, applying the admin guard.
///
/// An admin request with a stored but unverified token shows the sign-in
/// form and re-checks the token; a positive answer continues to admin.
pub fn handle_screen_switch(ctx: &mut UpdateContext<'_>, target: Screen) -> Task<Message> {
    let destination = target.guarded(ctx.session);

    let mut tasks = Vec::new();

    if *ctx.screen == Screen::Album && destination != Screen::Album {
        tasks.push(update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), false));
        *ctx.album = None;
    }
    if *ctx.screen == Screen::Admin && destination != Screen::Admin {
        *ctx.admin = None;
    }

    match destination {
        Screen::Home => {
            let (home, task) = home::State::open(ctx.api);
            *ctx.home = home;
            tasks.push(task.map(Message::Home));
        }
        Screen::Admin => {
            let (admin, task) = admin::State::open(ctx.api);
            *ctx.admin = Some(admin);
            tasks.push(task.map(Message::Admin));
        }
        Screen::Login => {
            if *ctx.screen != Screen::Login {
                *ctx.login = login::State::new();
            }
            if target == Screen::Admin && ctx.session.has_token() {
                *ctx.pending_admin = true;
                tasks.push(verify_session(ctx.api, ctx.session));
            }
        }
        Screen::Album => {}
    }

    tracing::debug!(from = ?*ctx.screen, to = ?destination, "switching screen");
    *ctx.screen = destination;
    Task::batch(tasks)
}

pub fn handle_open_album(ctx: &mut UpdateContext<'_>, album_id: AlbumId) -> Task<Message> {
    let (album, task) = component::State::open(
        album_id,
        ctx.api,
        ctx.config.slideshow.transition(),
        ctx.config.slideshow.overlay_timeout(),
    );
    *ctx.album = Some(album);
    *ctx.screen = Screen::Album;
    task.map(Message::Album)
}

/// Applies the server's answer about a stored token.
pub fn handle_session_verified(ctx: &mut UpdateContext<'_>, result: Result<bool>) -> Task<Message> {
    let resume_admin = std::mem::take(ctx.pending_admin);

    match result {
        Ok(true) => {
            ctx.session.mark_verified();
            tracing::info!("stored session accepted");
            if resume_admin && *ctx.screen == Screen::Login {
                return handle_screen_switch(ctx, Screen::Admin);
            }
        }
        Ok(false) => {
            tracing::info!("stored session rejected");
            ctx.session.clear();
            ctx.remember_token(None);
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not verify stored session");
            ctx.notifications.push(Notification::warning(format!(
                "Could not verify saved session: {err}"
            )));
        }
    }
    Task::none()
}

/// Advances time-driven state: toast expiry and the viewer's slideshow and
/// overlay timers.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick_at(now);

    if *ctx.screen != Screen::Album {
        return Task::none();
    }
    let Some(album) = ctx.album.as_ref() else {
        return Task::none();
    };
    if !album.needs_tick() {
        return Task::none();
    }
    handle_album_message(ctx, component::Message::Viewer(state::Message::Tick))
}

pub fn verify_session(api: &ApiClient, session: &Session) -> Task<Message> {
    let api = api.clone();
    let session = session.clone();
    Task::perform(
        async move { api.verify(&session).await },
        Message::SessionVerified,
    )
}

/// Drops the session after the server rejected it and shows the sign-in form.
fn expire_session(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    tracing::warn!("session expired");
    ctx.session.clear();
    ctx.remember_token(None);
    *ctx.pending_admin = false;

    let task = handle_screen_switch(ctx, Screen::Login);
    *ctx.login = login::State::with_notice(SESSION_EXPIRED_NOTICE);
    task
}

/// Updates fullscreen mode to the desired state.
fn update_fullscreen_mode(
    fullscreen: &mut bool,
    window_id: Option<&window::Id>,
    desired: bool,
) -> Task<Message> {
    if *fullscreen == desired {
        return Task::none();
    }

    let Some(window_id) = window_id else {
        return Task::none();
    };

    *fullscreen = desired;
    let mode = if desired {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(*window_id, mode)
}
