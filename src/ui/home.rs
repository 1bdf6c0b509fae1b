// SPDX-License-Identifier: MPL-2.0
//! Home screen: searchable, sortable album cards.

use crate::album::{Catalog, CatalogEntry, SortKey};
use crate::api::{Album, AlbumId, ApiClient, ModeMetadata};
use crate::error::Error;
use crate::media::preview::{self, PreviewOutcome, PreviewSpec};
use crate::media::PreviewCache;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use iced::widget::{button, container, image::Image, text_input, Column, Container, Row, Scrollable, Space, Text};
use iced::{alignment, ContentFit, Element, Length, Task, Theme};

#[derive(Debug, Clone)]
pub enum Message {
    AlbumsLoaded(Result<Vec<Album>, Error>),
    DetailsLoaded {
        album_id: AlbumId,
        mode: Option<ModeMetadata>,
        cover: Option<String>,
    },
    CoverLoaded {
        album_id: AlbumId,
        url: String,
        outcome: PreviewOutcome,
    },
    SearchChanged(String),
    SortChanged(SortKey),
    Refresh,
    OpenAlbum(AlbumId),
    OpenAdmin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    OpenAlbum(AlbumId),
    OpenAdmin,
}

pub struct Context<'a> {
    pub api: &'a ApiClient,
    pub cache: &'a mut PreviewCache,
    pub cover_spec: PreviewSpec,
}

#[derive(Debug, Default)]
pub struct State {
    catalog: Catalog,
    loading: bool,
    error: Option<String>,
}

impl State {
    pub fn open(api: &ApiClient) -> (Self, Task<Message>) {
        let state = Self {
            loading: true,
            ..Self::default()
        };
        (state, fetch_albums(api.clone()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle_message(&mut self, message: Message, ctx: &mut Context<'_>) -> (Effect, Task<Message>) {
        match message {
            Message::AlbumsLoaded(Ok(albums)) => {
                self.loading = false;
                self.error = None;
                tracing::info!(count = albums.len(), "albums loaded");
                self.catalog.set_albums(albums);
                let tasks = self
                    .catalog
                    .ids()
                    .into_iter()
                    .map(|album_id| fetch_details(ctx.api.clone(), album_id));
                (Effect::None, Task::batch(tasks))
            }
            Message::AlbumsLoaded(Err(err)) => {
                self.loading = false;
                tracing::warn!(error = %err, "album list unavailable");
                self.error = Some(err.to_string());
                (Effect::None, Task::none())
            }
            Message::DetailsLoaded {
                album_id,
                mode,
                cover,
            } => {
                let Some(name) = self.catalog.get(&album_id).map(|e| e.album.name.clone()) else {
                    return (Effect::None, Task::none());
                };
                self.catalog.set_details(&album_id, mode, cover.clone());
                let Some(file_name) = cover else {
                    return (Effect::None, Task::none());
                };
                let url = ctx.api.upload_url(&name, &file_name).to_string();
                if let Some(preview) = ctx.cache.get(&url) {
                    self.catalog
                        .set_cover(&album_id, PreviewOutcome::Encoded(preview));
                    return (Effect::None, Task::none());
                }
                let http = ctx.api.http();
                let spec = ctx.cover_spec;
                let task = Task::perform(preview::load_remote(http, url.clone(), spec), move |outcome| {
                    Message::CoverLoaded {
                        album_id: album_id.clone(),
                        url: url.clone(),
                        outcome,
                    }
                });
                (Effect::None, task)
            }
            Message::CoverLoaded {
                album_id,
                url,
                outcome,
            } => {
                if let Some(preview) = outcome.preview() {
                    ctx.cache.insert(url, preview.clone());
                }
                self.catalog.set_cover(&album_id, outcome);
                (Effect::None, Task::none())
            }
            Message::SearchChanged(query) => {
                self.catalog.set_query(query);
                (Effect::None, Task::none())
            }
            Message::SortChanged(key) => {
                self.catalog.set_sort(key);
                (Effect::None, Task::none())
            }
            Message::Refresh => {
                self.loading = true;
                (Effect::None, fetch_albums(ctx.api.clone()))
            }
            Message::OpenAlbum(album_id) => (Effect::OpenAlbum(album_id), Task::none()),
            Message::OpenAdmin => (Effect::OpenAdmin, Task::none()),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new("Photo Albums").size(typography::TITLE_LG))
            .push(Space::new().width(Length::Fill))
            .push(button(Text::new("Refresh")).on_press(Message::Refresh))
            .push(button(Text::new("Admin Panel")).on_press(Message::OpenAdmin));

        let sort_label = |key: SortKey| match key {
            SortKey::Date => "Sort by Date",
            SortKey::Name => "Sort by Name",
        };
        let sort_buttons: [Element<'_, Message>; 2] = [SortKey::Date, SortKey::Name].map(|key| {
            let style: fn(&Theme, button::Status) -> button::Style = if key == self.catalog.sort_key() {
                button::primary
            } else {
                button::secondary
            };
            button(Text::new(sort_label(key)))
                .style(style)
                .on_press(Message::SortChanged(key))
                .into()
        });

        let controls = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                text_input("Search albums...", self.catalog.query())
                    .on_input(Message::SearchChanged)
                    .width(Length::Fixed(sizing::FORM_WIDTH / 2.0)),
            )
            .push(Space::new().width(Length::Fill))
            .push(Row::with_children(sort_buttons).spacing(spacing::XS));

        let body: Element<'_, Message> = if let Some(error) = &self.error {
            Text::new(format!("Error: {error}"))
                .style(iced::widget::text::danger)
                .into()
        } else if self.loading && self.catalog.is_empty() {
            Text::new("Loading albums…").into()
        } else {
            let visible = self.catalog.visible();
            if visible.is_empty() {
                Text::new("No albums found.").into()
            } else {
                let cards: Vec<Element<'_, Message>> = visible.into_iter().map(album_card).collect();
                Row::with_children(cards)
                    .spacing(spacing::LG)
                    .wrap()
                    .vertical_spacing(spacing::LG)
                    .into()
            }
        };

        Scrollable::new(
            Column::new()
                .spacing(spacing::LG)
                .padding(spacing::LG)
                .width(Length::Fill)
                .push(header)
                .push(controls)
                .push(body),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn album_card(entry: &CatalogEntry) -> Element<'_, Message> {
    let cover: Element<'_, Message> = match entry.cover() {
        Some(preview) => Image::new(preview.handle())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::COVER_HEIGHT))
            .into(),
        None => Container::new(Text::new("No cover").size(typography::CAPTION))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::COVER_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    let mut details = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(entry.album.name.as_str()).size(typography::TITLE_MD))
        .push(
            Text::new(entry.album.date.as_deref().unwrap_or("Undated"))
                .size(typography::CAPTION),
        )
        .push(
            Text::new(format!("{} images", entry.album.number_of_images))
                .size(typography::CAPTION),
        );

    if let Some(mode) = &entry.mode {
        let badges: Vec<Element<'_, Message>> = [&mode.camera_model, &mode.lens_model, &mode.aperture]
            .into_iter()
            .flatten()
            .map(|value| badge(value))
            .collect();
        if !badges.is_empty() {
            details = details.push(Row::with_children(badges).spacing(spacing::XXS).wrap());
        }
    }

    let card = Column::new().spacing(spacing::XS).push(cover).push(details);

    button(
        Container::new(card)
            .width(Length::Fixed(sizing::THUMBNAIL * 1.5))
            .padding(spacing::XS),
    )
    .style(button::text)
    .on_press(Message::OpenAlbum(entry.album.id.clone()))
    .into()
}

fn badge(value: &str) -> Element<'_, Message> {
    Container::new(Text::new(value).size(typography::CAPTION))
        .padding([spacing::XXS / 2.0, spacing::XS])
        .style(|theme: &Theme| container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn fetch_albums(api: ApiClient) -> Task<Message> {
    Task::perform(async move { api.list_albums().await }, Message::AlbumsLoaded)
}

/// Mode metadata and first image for one album. Either may be missing
/// without failing the card.
fn fetch_details(api: ApiClient, album_id: AlbumId) -> Task<Message> {
    Task::perform(
        {
            let album_id = album_id.clone();
            async move {
                let (mode, detail) =
                    futures_util::join!(api.mode_metadata(&album_id), api.album(&album_id));
                let mode = mode
                    .inspect_err(|err| tracing::debug!(album = %album_id, error = %err, "no mode metadata"))
                    .ok();
                let cover = detail
                    .ok()
                    .and_then(|detail| detail.images.into_iter().next())
                    .map(|image| image.file_name);
                (mode, cover)
            }
        },
        move |(mode, cover)| Message::DetailsLoaded {
            album_id: album_id.clone(),
            mode,
            cover,
        },
    )
}
