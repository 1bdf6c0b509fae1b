// SPDX-License-Identifier: MPL-2.0
//! Presentation state machine for one album.
//!
//! ```text
//!            ActivateImage(i)                StartSlideshow
//!   Viewer <------------------- Grid -------------------------> Slideshow
//!     |                          ^  ^                              |
//!     +------ Close / Escape ----+  +------- Close / Escape -------+
//! ```
//!
//! Manual steps are clamped to the image list in both presentation modes.
//! Slideshow auto-advance wraps to the first image. Timing is driven by the
//! `now` passed to [`State::handle`]: the machine stores deadlines and
//! compares them on every tick, so tests control time completely.

use super::{info, overlay};
use crate::api::{ImageId, ImageMetadata};
use iced::{keyboard, Point};
use std::time::{Duration, Instant};

/// Default slideshow transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(3000);

/// Shortest accepted slideshow transition.
pub const MIN_TRANSITION: Duration = Duration::from_millis(1000);

/// One image in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerImage {
    pub id: ImageId,
    pub file_name: String,
    /// Static URL of the full image.
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Grid,
    Slideshow {
        index: usize,
        paused: bool,
        transition: Duration,
    },
    /// Single image. Info panel visibility lives in [`info::State`].
    Viewer { index: usize },
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Left,
    Right,
    Space,
    /// `f`: toggle fullscreen.
    Fullscreen,
}

impl Key {
    pub fn from_keyboard(key: &keyboard::Key) -> Option<Self> {
        match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Key::Escape),
            keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => Some(Key::Left),
            keyboard::Key::Named(keyboard::key::Named::ArrowRight) => Some(Key::Right),
            keyboard::Key::Named(keyboard::key::Named::Space) => Some(Key::Space),
            keyboard::Key::Character(c) if c.as_str().eq_ignore_ascii_case("f") => {
                Some(Key::Fullscreen)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    ActivateImage(usize),
    StartSlideshow,
    Close,
    Previous,
    Next,
    TogglePause,
    ToggleInfo,
    ToggleFullscreen,
    SetTransition(Duration),
    KeyPressed(Key),
    PointerMoved(Point),
    OverlayInteraction,
    Tick,
    MetadataLoaded {
        image_id: ImageId,
        result: Result<ImageMetadata, String>,
    },
    Download,
    DeleteCurrent,
}

/// Side effects for the owner of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Enter (`true`) or leave (`false`) exclusive fullscreen.
    SetFullscreen(bool),
    FetchMetadata(ImageId),
    Download(ViewerImage),
    DeleteImage(ImageId),
    /// The slideshow transition now has this value.
    TransitionChanged(Duration),
}

#[derive(Debug)]
pub struct State {
    images: Vec<ViewerImage>,
    mode: Mode,
    transition: Duration,
    next_advance_at: Option<Instant>,
    fullscreen: bool,
    overlay: overlay::State,
    info: info::State,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl State {
    pub fn new(images: Vec<ViewerImage>) -> Self {
        Self {
            images,
            mode: Mode::Grid,
            transition: DEFAULT_TRANSITION,
            next_advance_at: None,
            fullscreen: false,
            overlay: overlay::State::default(),
            info: info::State::default(),
        }
    }

    pub fn with_timing(mut self, transition: Duration, overlay_delay: Duration) -> Self {
        self.transition = clamp_transition(transition);
        self.overlay.set_hide_delay(overlay_delay);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn images(&self) -> &[ViewerImage] {
        &self.images
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Index shown in a presentation mode.
    pub fn current_index(&self) -> Option<usize> {
        match self.mode {
            Mode::Grid => None,
            Mode::Slideshow { index, .. } | Mode::Viewer { index, .. } => Some(index),
        }
    }

    pub fn current_image(&self) -> Option<&ViewerImage> {
        self.current_index().and_then(|i| self.images.get(i))
    }

    /// `"i/N"` counter, 1-based.
    pub fn position_label(&self) -> Option<String> {
        self.current_index()
            .map(|i| format!("{}/{}", i + 1, self.images.len()))
    }

    pub fn transition(&self) -> Duration {
        self.transition
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.mode, Mode::Slideshow { paused: true, .. })
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn info(&self) -> &info::State {
        &self.info
    }

    pub fn next_advance_at(&self) -> Option<Instant> {
        self.next_advance_at
    }

    /// Whether periodic ticks are needed (auto-advance or overlay hide).
    pub fn needs_tick(&self) -> bool {
        self.next_advance_at.is_some() || self.overlay.needs_tick()
    }

    /// Whether `key` is handled here and must not trigger default behaviour
    /// such as scrolling.
    pub fn consumes_key(&self, key: Key) -> bool {
        match self.mode {
            Mode::Grid => false,
            Mode::Slideshow { .. } => true,
            Mode::Viewer { .. } => key != Key::Space,
        }
    }

    /// Applies `msg` at time `now`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message, now: Instant) -> Effect {
        match msg {
            Message::ActivateImage(index) => self.open_viewer(index, now),
            Message::StartSlideshow => self.start_slideshow(now),
            Message::Close => self.close(),
            Message::Previous => self.step(-1, now),
            Message::Next => self.step(1, now),
            Message::TogglePause => {
                self.toggle_pause(now);
                Effect::None
            }
            Message::ToggleInfo => self.toggle_info(),
            Message::ToggleFullscreen => self.toggle_fullscreen(),
            Message::SetTransition(duration) => self.set_transition(duration, now),
            Message::KeyPressed(key) => self.handle_key(key, now),
            Message::PointerMoved(position) => {
                self.overlay
                    .handle(overlay::Message::PointerMoved { position, at: now });
                Effect::None
            }
            Message::OverlayInteraction => {
                self.overlay.handle(overlay::Message::Interaction(now));
                Effect::None
            }
            Message::Tick => {
                self.tick(now);
                Effect::None
            }
            Message::MetadataLoaded { image_id, result } => {
                self.info.apply(&image_id, result);
                Effect::None
            }
            Message::Download => self
                .current_image()
                .cloned()
                .map_or(Effect::None, Effect::Download),
            Message::DeleteCurrent => match self.mode {
                Mode::Viewer { .. } => self
                    .current_image()
                    .map_or(Effect::None, |image| Effect::DeleteImage(image.id.clone())),
                _ => Effect::None,
            },
        }
    }

    fn handle_key(&mut self, key: Key, now: Instant) -> Effect {
        if self.mode == Mode::Grid {
            return Effect::None;
        }
        match key {
            Key::Escape => self.close(),
            Key::Left => self.step(-1, now),
            Key::Right => self.step(1, now),
            Key::Space => {
                self.toggle_pause(now);
                Effect::None
            }
            Key::Fullscreen => self.toggle_fullscreen(),
        }
    }

    fn open_viewer(&mut self, index: usize, now: Instant) -> Effect {
        if self.mode != Mode::Grid || index >= self.images.len() {
            return Effect::None;
        }
        self.mode = Mode::Viewer { index };
        self.overlay.handle(overlay::Message::Activated(now));
        Effect::None
    }

    fn start_slideshow(&mut self, now: Instant) -> Effect {
        if self.mode != Mode::Grid || self.images.is_empty() {
            return Effect::None;
        }
        self.mode = Mode::Slideshow {
            index: 0,
            paused: false,
            transition: self.transition,
        };
        self.next_advance_at = Some(now + self.transition);
        self.overlay.handle(overlay::Message::Activated(now));
        self.fullscreen = true;
        Effect::SetFullscreen(true)
    }

    fn close(&mut self) -> Effect {
        if self.mode == Mode::Grid {
            return Effect::None;
        }
        self.mode = Mode::Grid;
        self.next_advance_at = None;
        self.info.hide();
        self.overlay.handle(overlay::Message::Deactivated);

        if self.fullscreen {
            self.fullscreen = false;
            Effect::SetFullscreen(false)
        } else {
            Effect::None
        }
    }

    /// Manual ±1 step, clamped to the image list.
    fn step(&mut self, delta: isize, now: Instant) -> Effect {
        let last = self.images.len().saturating_sub(1);
        let clamp = |index: usize| index.saturating_add_signed(delta).min(last);

        match &mut self.mode {
            Mode::Grid => return Effect::None,
            Mode::Viewer { index, .. } => *index = clamp(*index),
            Mode::Slideshow { index, paused, .. } => {
                *index = clamp(*index);
                if !*paused {
                    self.next_advance_at = Some(now + self.transition);
                }
            }
        }
        self.follow_info()
    }

    fn toggle_pause(&mut self, now: Instant) {
        if let Mode::Slideshow { paused, .. } = &mut self.mode {
            *paused = !*paused;
            self.next_advance_at = if *paused {
                None
            } else {
                Some(now + self.transition)
            };
        }
    }

    fn toggle_info(&mut self) -> Effect {
        let Mode::Viewer { index } = self.mode else {
            return Effect::None;
        };
        let current = self.images.get(index).map(|image| image.id.as_str());
        self.info
            .toggle(current)
            .map_or(Effect::None, Effect::FetchMetadata)
    }

    fn toggle_fullscreen(&mut self) -> Effect {
        if self.mode == Mode::Grid {
            return Effect::None;
        }
        self.fullscreen = !self.fullscreen;
        Effect::SetFullscreen(self.fullscreen)
    }

    fn set_transition(&mut self, duration: Duration, now: Instant) -> Effect {
        let duration = clamp_transition(duration);
        if duration == self.transition {
            return Effect::None;
        }
        self.transition = duration;
        if let Mode::Slideshow {
            paused, transition, ..
        } = &mut self.mode
        {
            *transition = self.transition;
            if !*paused {
                self.next_advance_at = Some(now + self.transition);
            }
        }
        Effect::TransitionChanged(self.transition)
    }

    fn tick(&mut self, now: Instant) {
        self.overlay.handle(overlay::Message::Tick(now));

        let Mode::Slideshow { index, paused, .. } = &mut self.mode else {
            return;
        };
        if *paused || self.images.is_empty() {
            return;
        }
        if self.next_advance_at.is_some_and(|deadline| now >= deadline) {
            *index = (*index + 1) % self.images.len();
            self.next_advance_at = Some(now + self.transition);
        }
    }

    fn follow_info(&mut self) -> Effect {
        let current = self.current_image().map(|image| image.id.clone());
        self.info
            .follow(current.as_deref())
            .map_or(Effect::None, Effect::FetchMetadata)
    }

    /// Drops an image deleted on the server, keeping the view consistent.
    pub fn remove_image(&mut self, image_id: &str) -> Effect {
        let Some(position) = self.images.iter().position(|image| image.id == image_id) else {
            return Effect::None;
        };
        self.images.remove(position);

        if self.images.is_empty() {
            return self.close();
        }

        let last = self.images.len() - 1;
        match &mut self.mode {
            Mode::Grid => Effect::None,
            Mode::Viewer { index, .. } | Mode::Slideshow { index, .. } => {
                if *index > position || *index > last {
                    *index = index.saturating_sub(1).min(last);
                }
                self.follow_info()
            }
        }
    }
}

fn clamp_transition(duration: Duration) -> Duration {
    duration.max(MIN_TRANSITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn images(n: usize) -> Vec<ViewerImage> {
        (0..n)
            .map(|i| ViewerImage {
                id: format!("img-{i}"),
                file_name: format!("{i}.jpg"),
                url: format!("http://x/uploads/a/{i}.jpg"),
            })
            .collect()
    }

    #[test]
    fn starts_in_grid() {
        let state = State::new(images(3));
        assert_eq!(state.mode(), Mode::Grid);
        assert!(state.current_image().is_none());
        assert!(!state.needs_tick());
    }

    #[test]
    fn activating_image_opens_viewer_at_that_index() {
        let mut state = State::new(images(5));
        let effect = state.handle(Message::ActivateImage(3), Instant::now());
        assert_eq!(effect, Effect::None);
        assert_eq!(
            state.mode(),
            Mode::Viewer { index: 3 }
        );
        assert_eq!(state.position_label().as_deref(), Some("4/5"));
    }

    #[test]
    fn empty_album_cannot_enter_presentation_modes() {
        let mut state = State::new(Vec::new());
        let now = Instant::now();
        assert_eq!(state.handle(Message::ActivateImage(0), now), Effect::None);
        assert_eq!(state.handle(Message::StartSlideshow, now), Effect::None);
        assert_eq!(state.mode(), Mode::Grid);
        assert!(!state.is_fullscreen());
    }

    #[test]
    fn out_of_range_activation_is_ignored() {
        let mut state = State::new(images(2));
        state.handle(Message::ActivateImage(2), Instant::now());
        assert_eq!(state.mode(), Mode::Grid);
    }

    #[test]
    fn viewer_navigation_is_clamped() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::ActivateImage(0), now);
        state.handle(Message::KeyPressed(Key::Left), now);
        assert_eq!(state.current_index(), Some(0));

        state.handle(Message::Next, now);
        state.handle(Message::Next, now);
        state.handle(Message::KeyPressed(Key::Right), now);
        assert_eq!(state.current_index(), Some(2));
    }

    #[test]
    fn slideshow_enters_fullscreen_at_first_image() {
        let mut state = State::new(images(3));
        let effect = state.handle(Message::StartSlideshow, Instant::now());
        assert_eq!(effect, Effect::SetFullscreen(true));
        assert_eq!(
            state.mode(),
            Mode::Slideshow {
                index: 0,
                paused: false,
                transition: DEFAULT_TRANSITION
            }
        );
        assert!(state.is_fullscreen());
    }

    #[test]
    fn escape_returns_to_grid_and_releases_fullscreen() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::StartSlideshow, now);
        let effect = state.handle(Message::KeyPressed(Key::Escape), now);
        assert_eq!(effect, Effect::SetFullscreen(false));
        assert_eq!(state.mode(), Mode::Grid);
        assert!(!state.needs_tick());
    }

    #[test]
    fn closing_viewer_without_fullscreen_has_no_effect() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::ActivateImage(1), now);
        assert_eq!(state.handle(Message::Close, now), Effect::None);
        assert_eq!(state.mode(), Mode::Grid);
    }

    #[test]
    fn auto_advance_fires_on_interval() {
        let mut state = State::new(images(3));
        let start = Instant::now();
        state.handle(Message::StartSlideshow, start);

        state.handle(Message::Tick, start + ms(2999));
        assert_eq!(state.current_index(), Some(0));
        state.handle(Message::Tick, start + ms(3000));
        assert_eq!(state.current_index(), Some(1));
        state.handle(Message::Tick, start + ms(5999));
        assert_eq!(state.current_index(), Some(1));
        state.handle(Message::Tick, start + ms(6000));
        assert_eq!(state.current_index(), Some(2));
    }

    #[test]
    fn auto_advance_wraps_but_manual_step_does_not() {
        let mut state = State::new(images(3));
        let start = Instant::now();
        state.handle(Message::StartSlideshow, start);
        state.handle(Message::Next, start);
        state.handle(Message::Next, start);
        assert_eq!(state.current_index(), Some(2));

        state.handle(Message::KeyPressed(Key::Right), start);
        assert_eq!(state.current_index(), Some(2));

        state.handle(Message::Tick, start + DEFAULT_TRANSITION);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn pause_stops_advance_and_resume_restarts_full_interval() {
        let mut state = State::new(images(4));
        let start = Instant::now();
        state.handle(Message::StartSlideshow, start);

        state.handle(Message::KeyPressed(Key::Space), start + ms(2500));
        assert!(state.is_paused());
        state.handle(Message::Tick, start + ms(20_000));
        assert_eq!(state.current_index(), Some(0));

        let resumed = start + ms(21_000);
        state.handle(Message::TogglePause, resumed);
        assert_eq!(state.next_advance_at(), Some(resumed + DEFAULT_TRANSITION));

        state.handle(Message::Tick, resumed + ms(2999));
        assert_eq!(state.current_index(), Some(0));
        state.handle(Message::Tick, resumed + ms(3000));
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn manual_step_restarts_interval() {
        let mut state = State::new(images(4));
        let start = Instant::now();
        state.handle(Message::StartSlideshow, start);
        state.handle(Message::Next, start + ms(2000));
        assert_eq!(state.current_index(), Some(1));

        state.handle(Message::Tick, start + ms(3000));
        assert_eq!(state.current_index(), Some(1));
        state.handle(Message::Tick, start + ms(5000));
        assert_eq!(state.current_index(), Some(2));
    }

    #[test]
    fn manual_step_works_while_paused() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::StartSlideshow, now);
        state.handle(Message::TogglePause, now);
        state.handle(Message::Next, now);
        assert_eq!(state.current_index(), Some(1));
        assert!(state.next_advance_at().is_none());
    }

    #[test]
    fn transition_is_clamped_to_one_second() {
        let mut state = State::new(images(3));
        let start = Instant::now();
        state.handle(Message::StartSlideshow, start);
        let effect = state.handle(Message::SetTransition(ms(200)), start);
        assert_eq!(effect, Effect::TransitionChanged(MIN_TRANSITION));
        assert_eq!(state.transition(), MIN_TRANSITION);
        assert_eq!(
            state.handle(Message::SetTransition(ms(500)), start),
            Effect::None
        );
        assert!(matches!(
            state.mode(),
            Mode::Slideshow { transition, .. } if transition == MIN_TRANSITION
        ));

        state.handle(Message::Tick, start + ms(1000));
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn space_only_toggles_pause_in_slideshow() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::ActivateImage(1), now);
        state.handle(Message::KeyPressed(Key::Space), now);
        assert_eq!(state.mode(), Mode::Viewer { index: 1 });
        assert!(!state.consumes_key(Key::Space));

        state.handle(Message::Close, now);
        assert!(!state.consumes_key(Key::Space));
        state.handle(Message::StartSlideshow, now);
        assert!(state.consumes_key(Key::Space));
    }

    #[test]
    fn keys_are_ignored_in_grid() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        assert_eq!(state.handle(Message::KeyPressed(Key::Fullscreen), now), Effect::None);
        assert_eq!(state.handle(Message::KeyPressed(Key::Right), now), Effect::None);
        assert_eq!(state.mode(), Mode::Grid);
    }

    #[test]
    fn f_toggles_fullscreen_in_viewer() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::ActivateImage(0), now);
        assert_eq!(
            state.handle(Message::KeyPressed(Key::Fullscreen), now),
            Effect::SetFullscreen(true)
        );
        assert_eq!(
            state.handle(Message::KeyPressed(Key::Fullscreen), now),
            Effect::SetFullscreen(false)
        );
        state.handle(Message::KeyPressed(Key::Fullscreen), now);
        assert_eq!(state.handle(Message::Close, now), Effect::SetFullscreen(false));
    }

    #[test]
    fn info_panel_persists_across_navigation_and_resets_on_exit() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::ActivateImage(0), now);

        let effect = state.handle(Message::ToggleInfo, now);
        assert_eq!(effect, Effect::FetchMetadata("img-0".into()));

        let effect = state.handle(Message::Next, now);
        assert_eq!(effect, Effect::FetchMetadata("img-1".into()));
        assert_eq!(state.mode(), Mode::Viewer { index: 1 });
        assert!(state.info().is_visible());

        state.handle(Message::Close, now);
        state.handle(Message::ActivateImage(2), now);
        assert_eq!(state.mode(), Mode::Viewer { index: 2 });
        assert!(!state.info().is_visible());

        state.handle(Message::ToggleInfo, now);
        assert!(state.info().is_visible());
        state.handle(Message::ToggleInfo, now);
        assert!(!state.info().is_visible());
        assert!(state.info().content().is_none());
    }

    #[test]
    fn clamped_step_does_not_refetch() {
        let mut state = State::new(images(2));
        let now = Instant::now();
        state.handle(Message::ActivateImage(1), now);
        state.handle(Message::ToggleInfo, now);
        assert_eq!(state.handle(Message::Next, now), Effect::None);
    }

    #[test]
    fn stale_metadata_is_dropped() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::ActivateImage(0), now);
        state.handle(Message::ToggleInfo, now);
        state.handle(Message::Next, now);

        state.handle(
            Message::MetadataLoaded {
                image_id: "img-0".into(),
                result: Ok(ImageMetadata {
                    image_id: "img-0".into(),
                    ..ImageMetadata::default()
                }),
            },
            now,
        );
        assert_eq!(state.info().content(), Some(&info::Content::Loading));

        state.handle(
            Message::MetadataLoaded {
                image_id: "img-1".into(),
                result: Ok(ImageMetadata {
                    image_id: "img-1".into(),
                    ..ImageMetadata::default()
                }),
            },
            now,
        );
        assert!(matches!(
            state.info().content(),
            Some(info::Content::Loaded(meta)) if meta.image_id == "img-1"
        ));
    }

    #[test]
    fn overlay_hides_during_slideshow() {
        let mut state = State::new(images(3));
        let start = Instant::now();
        state.handle(Message::StartSlideshow, start);
        assert!(state.overlay_visible());

        state.handle(Message::Tick, start + ms(3000));
        assert!(!state.overlay_visible());

        state.handle(Message::PointerMoved(Point::new(3.0, 4.0)), start + ms(3100));
        assert!(state.overlay_visible());
    }

    #[test]
    fn download_targets_current_image() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        assert_eq!(state.handle(Message::Download, now), Effect::None);
        state.handle(Message::ActivateImage(2), now);
        assert_eq!(
            state.handle(Message::Download, now),
            Effect::Download(images(3)[2].clone())
        );
    }

    #[test]
    fn removing_current_last_image_moves_back() {
        let mut state = State::new(images(3));
        let now = Instant::now();
        state.handle(Message::ActivateImage(2), now);
        assert_eq!(
            state.handle(Message::DeleteCurrent, now),
            Effect::DeleteImage("img-2".into())
        );

        state.remove_image("img-2");
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.image_count(), 2);
    }

    #[test]
    fn removing_earlier_image_keeps_current_image() {
        let mut state = State::new(images(4));
        let now = Instant::now();
        state.handle(Message::ActivateImage(2), now);
        state.remove_image("img-0");
        assert_eq!(state.current_image().map(|i| i.id.as_str()), Some("img-2"));
    }

    #[test]
    fn removing_only_image_returns_to_grid() {
        let mut state = State::new(images(1));
        let now = Instant::now();
        state.handle(Message::ActivateImage(0), now);
        state.remove_image("img-0");
        assert_eq!(state.mode(), Mode::Grid);
    }

    #[test]
    fn character_f_maps_to_fullscreen_key() {
        let key = keyboard::Key::Character("f".into());
        assert_eq!(Key::from_keyboard(&key), Some(Key::Fullscreen));
        let other = keyboard::Key::Character("g".into());
        assert_eq!(Key::from_keyboard(&other), None);
        let escape = keyboard::Key::Named(keyboard::key::Named::Escape);
        assert_eq!(Key::from_keyboard(&escape), Some(Key::Escape));
    }
}
