// SPDX-License-Identifier: MPL-2.0
//! Admin sign-in form.

use crate::api::ApiClient;
use crate::error::Error;
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{button, text, text_input, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length, Task};

#[derive(Debug, Clone)]
pub enum Message {
    UsernameChanged(String),
    PasswordChanged(String),
    Submit,
    LoginFinished(Result<String, Error>),
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The server issued this token.
    SignedIn(String),
    GoHome,
}

#[derive(Debug, Default)]
pub struct State {
    username: String,
    password: String,
    submitting: bool,
    error: Option<String>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-in form with a notice explaining why it was shown.
    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            error: Some(notice.into()),
            ..Self::default()
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn can_submit(&self) -> bool {
        !self.submitting && !self.username.trim().is_empty() && !self.password.is_empty()
    }

    pub fn handle_message(&mut self, message: Message, api: &ApiClient) -> (Effect, Task<Message>) {
        match message {
            Message::UsernameChanged(username) => {
                self.username = username;
                (Effect::None, Task::none())
            }
            Message::PasswordChanged(password) => {
                self.password = password;
                (Effect::None, Task::none())
            }
            Message::Submit => {
                if !self.can_submit() {
                    return (Effect::None, Task::none());
                }
                self.submitting = true;
                self.error = None;
                let api = api.clone();
                let username = self.username.trim().to_string();
                let password = self.password.clone();
                let task = Task::perform(
                    async move { api.login(&username, &password).await },
                    Message::LoginFinished,
                );
                (Effect::None, task)
            }
            Message::LoginFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(token) => {
                        tracing::info!(user = %self.username, "signed in");
                        self.password.clear();
                        (Effect::SignedIn(token), Task::none())
                    }
                    Err(err) => {
                        tracing::warn!(user = %self.username, error = %err, "sign-in failed");
                        self.error = Some(match err {
                            Error::Auth(message) if !message.is_empty() => message,
                            Error::Auth(_) => "Login failed".to_string(),
                            _ => "An error occurred. Please try again.".to_string(),
                        });
                        (Effect::None, Task::none())
                    }
                }
            }
            Message::Back => (Effect::GoHome, Task::none()),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let submit = self.can_submit().then_some(Message::Submit);

        let mut form = Column::new()
            .spacing(spacing::SM)
            .width(Length::Fixed(sizing::FORM_WIDTH * 0.75))
            .push(Text::new("Admin Login").size(typography::TITLE_MD))
            .push(
                Text::new("Enter your credentials to access the admin panel")
                    .size(typography::CAPTION),
            );

        if let Some(error) = &self.error {
            form = form.push(Text::new(error.as_str()).style(text::danger));
        }

        form = form
            .push(Text::new("Username").size(typography::CAPTION))
            .push(
                text_input("Enter your username", &self.username)
                    .on_input(Message::UsernameChanged)
                    .on_submit_maybe(submit.clone()),
            )
            .push(Text::new("Password").size(typography::CAPTION))
            .push(
                text_input("Enter your password", &self.password)
                    .secure(true)
                    .on_input(Message::PasswordChanged)
                    .on_submit_maybe(submit.clone()),
            )
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(
                        button(Text::new("← Back"))
                            .style(button::secondary)
                            .on_press(Message::Back),
                    )
                    .push(Space::new().width(Length::Fill))
                    .push(
                        button(Text::new(if self.submitting { "Signing in…" } else { "Sign In" }))
                            .on_press_maybe(submit),
                    ),
            );

        Container::new(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }
}
