// SPDX-License-Identifier: MPL-2.0
//! Overlay visibility for the viewer and slideshow controls.
//!
//! Controls are shown when a presentation mode is entered and whenever the
//! pointer moves, then hidden once the pointer has been still for the hide
//! delay. Time is passed in by the caller so the behaviour is deterministic.

use iced::Point;
use std::time::{Duration, Instant};

/// Default delay before hiding overlay controls.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct State {
    visible: bool,
    active: bool,
    last_activity: Option<Instant>,
    last_position: Option<Point>,
    hide_delay: Duration,
}

impl Default for State {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// A presentation mode was entered.
    Activated(Instant),
    /// Back to the grid; the overlay no longer applies.
    Deactivated,
    PointerMoved { position: Point, at: Instant },
    /// User clicked an overlay control.
    Interaction(Instant),
    Tick(Instant),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    VisibilityChanged(bool),
}

impl State {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            visible: true,
            active: false,
            last_activity: None,
            last_position: None,
            hide_delay,
        }
    }

    pub fn set_hide_delay(&mut self, delay: Duration) {
        self.hide_delay = delay;
    }

    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Activated(at) => {
                self.active = true;
                self.last_activity = Some(at);
                self.last_position = None;
                self.show()
            }
            Message::Deactivated => {
                self.active = false;
                self.last_activity = None;
                self.last_position = None;
                self.show()
            }
            Message::PointerMoved { position, at } => {
                // Repeated events at the same spot are not movement.
                if self.last_position == Some(position) {
                    return Effect::None;
                }
                self.last_position = Some(position);
                self.last_activity = Some(at);
                self.show()
            }
            Message::Interaction(at) => {
                self.last_activity = Some(at);
                self.show()
            }
            Message::Tick(now) => {
                if !self.active || !self.visible {
                    return Effect::None;
                }
                let idle = self
                    .last_activity
                    .map_or(Duration::MAX, |t| now.saturating_duration_since(t));
                if idle >= self.hide_delay {
                    self.visible = false;
                    Effect::VisibilityChanged(false)
                } else {
                    Effect::None
                }
            }
        }
    }

    fn show(&mut self) -> Effect {
        if self.visible {
            Effect::None
        } else {
            self.visible = true;
            Effect::VisibilityChanged(true)
        }
    }

    /// Whether controls should be drawn. Always true outside presentation modes.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.active || self.visible
    }

    /// Whether ticks are needed to hide the overlay later.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.active && self.visible
    }
}
