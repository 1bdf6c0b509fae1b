// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen and layers toast notifications on top.

use super::{Message, Screen};
use crate::ui::notifications::{self, Toast};
use crate::ui::viewer::component;
use crate::ui::{admin, home, login};
use iced::{
    widget::{Container, Stack, Text},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub screen: Screen,
    pub home: &'a home::State,
    pub album: Option<&'a component::State>,
    pub admin: Option<&'a admin::State>,
    pub login: &'a login::State,
    pub signed_in: bool,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Home => ctx.home.view().map(Message::Home),
        Screen::Album => view_album(ctx.album, ctx.signed_in),
        Screen::Admin => view_admin(ctx.admin),
        Screen::Login => ctx.login.view().map(Message::Login),
    };

    let content = Container::new(current_view)
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .push(content)
        .push(Toast::view_overlay(ctx.notifications).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_album(album: Option<&component::State>, signed_in: bool) -> Element<'_, Message> {
    match album {
        Some(album) => album
            .view(component::ViewEnv { signed_in })
            .map(Message::Album),
        None => missing_screen("No album selected"),
    }
}

fn view_admin(admin: Option<&admin::State>) -> Element<'_, Message> {
    match admin {
        Some(admin) => admin.view().map(Message::Admin),
        None => missing_screen("Admin panel unavailable"),
    }
}

fn missing_screen(label: &str) -> Element<'_, Message> {
    Container::new(Text::new(label))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
