// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are routed to the screen that needs them. Every screen
//! reports the window id so fullscreen requests can target it.

use super::{Message, Screen};
use crate::ui::viewer::component;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Creates the event subscription for the current screen.
///
/// - Album: keyboard and pointer events go to the viewer. Space is forwarded
///   even when a focused widget captured it, so it still pauses a slideshow.
/// - Other screens: only the window id is reported; their widgets handle
///   input themselves.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Album => event::listen_with(|event, status, window_id| {
            if let event::Event::Window(_) = &event {
                return Some(Message::WindowSeen(window_id));
            }

            let is_viewer_event = matches!(
                event,
                event::Event::Keyboard(iced::keyboard::Event::KeyPressed { .. })
                    | event::Event::Mouse(iced::mouse::Event::CursorMoved { .. })
            );
            if !is_viewer_event {
                return None;
            }

            let is_space = matches!(
                &event,
                event::Event::Keyboard(iced::keyboard::Event::KeyPressed {
                    key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Space),
                    ..
                })
            );

            match status {
                event::Status::Captured if !is_space => None,
                _ => Some(Message::Album(component::Message::RawEvent {
                    window: window_id,
                    event,
                })),
            }
        }),
        Screen::Home | Screen::Admin | Screen::Login => {
            event::listen_with(|event, _status, window_id| match event {
                event::Event::Window(_) => Some(Message::WindowSeen(window_id)),
                _ => None,
            })
        }
    }
}

/// Periodic tick for slideshow advance, overlay auto-hide and notification
/// auto-dismiss. Off when nothing is waiting on time.
pub fn create_tick_subscription(viewer_needs_tick: bool, has_notifications: bool) -> Subscription<Message> {
    if viewer_needs_tick || has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
