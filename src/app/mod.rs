// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The [`App`] struct wires together the album catalog, the album viewer, the
//! admin panel and the sign-in form, and translates messages into state
//! updates. Per-screen message handling lives in [`update`]; rendering lives
//! in [`view`].

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, LaunchArgs, Message};
pub use screen::Screen;

use self::config::Config;
use crate::api::{ApiClient, Session};
use crate::media::PreviewCache;
use crate::ui::notifications::{self, Notification};
use crate::ui::viewer::component;
use crate::ui::{admin, home, login};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

const APP_NAME: &str = "Album Lens";

/// Root Iced application state.
pub struct App {
    screen: Screen,
    home: home::State,
    /// The album being browsed, if any.
    album: Option<component::State>,
    /// Created on entry so every visit starts from a fresh album list.
    admin: Option<admin::State>,
    login: login::State,
    api: ApiClient,
    session: Session,
    config: Config,
    /// Downscaled covers and thumbnails shared by home and the album grid.
    cache: PreviewCache,
    /// Persisted application state (session token, last directories).
    app_state: persisted_state::AppState,
    notifications: notifications::Manager,
    fullscreen: bool,
    window_id: Option<window::Id>,
    /// Admin was requested while a stored token was still being checked.
    pending_admin: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("album", &self.album.as_ref().map(component::State::album_id))
            .field("session", &self.session)
            .field("fullscreen", &self.fullscreen)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1080;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Restores persisted state and opens the first screen.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (app_state, state_warning) = persisted_state::AppState::load();
        Self::with_state(flags, app_state, state_warning)
    }

    fn with_state(
        flags: Flags,
        app_state: persisted_state::AppState,
        state_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let Flags {
            config,
            config_warning,
            api,
            album_id,
        } = flags;

        let session = Session::from_token(app_state.session_token.clone());
        let cache = PreviewCache::new(
            config::DEFAULT_PREVIEW_CACHE_ENTRIES,
            config.previews.cache_bytes(),
        );

        let mut notifications = notifications::Manager::new();
        for warning in [config_warning, state_warning].into_iter().flatten() {
            notifications.push(Notification::warning(warning));
        }

        let (home, home_task) = home::State::open(&api);
        let mut app = App {
            screen: Screen::Home,
            home,
            album: None,
            admin: None,
            login: login::State::new(),
            api,
            session,
            config,
            cache,
            app_state,
            notifications,
            fullscreen: false,
            window_id: None,
            pending_admin: false,
        };

        let mut tasks = vec![home_task.map(Message::Home)];

        if let Some(album_id) = album_id {
            tasks.push(app.update(Message::OpenAlbum(album_id)));
        }

        if app.session.has_token() {
            tasks.push(update::verify_session(&app.api, &app.session));
        }

        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        match self.screen {
            Screen::Album => match self.album.as_ref().and_then(component::State::album) {
                Some(album) => format!("{} - {APP_NAME}", album.name),
                None => APP_NAME.to_string(),
            },
            Screen::Admin => format!("Admin - {APP_NAME}"),
            Screen::Login => format!("Sign In - {APP_NAME}"),
            Screen::Home => APP_NAME.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.screen);
        let viewer_needs_tick = self.screen == Screen::Album
            && self.album.as_ref().is_some_and(component::State::needs_tick);
        let tick_sub = subscription::create_tick_subscription(
            viewer_needs_tick,
            self.notifications.has_notifications(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            screen: &mut self.screen,
            home: &mut self.home,
            album: &mut self.album,
            admin: &mut self.admin,
            login: &mut self.login,
            api: &self.api,
            session: &mut self.session,
            config: &mut self.config,
            cache: &mut self.cache,
            app_state: &mut self.app_state,
            notifications: &mut self.notifications,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
            pending_admin: &mut self.pending_admin,
        };

        match message {
            Message::Home(home_message) => update::handle_home_message(&mut ctx, home_message),
            Message::Album(album_message) => update::handle_album_message(&mut ctx, album_message),
            Message::Admin(admin_message) => update::handle_admin_message(&mut ctx, admin_message),
            Message::Login(login_message) => update::handle_login_message(&mut ctx, login_message),
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::SwitchScreen(target) => update::handle_screen_switch(&mut ctx, target),
            Message::OpenAlbum(album_id) => update::handle_open_album(&mut ctx, album_id),
            Message::SessionVerified(result) => update::handle_session_verified(&mut ctx, result),
            Message::WindowSeen(window_id) => {
                *ctx.window_id = Some(window_id);
                Task::none()
            }
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            screen: self.screen,
            home: &self.home,
            album: self.album.as_ref(),
            admin: self.admin.as_ref(),
            login: &self.login,
            signed_in: self.session.is_signed_in(),
            notifications: &self.notifications,
        })
    }
}
