// SPDX-License-Identifier: MPL-2.0
//! Album screen: thumbnail grid, fullscreen viewer and slideshow.

pub mod component;
pub mod info;
pub mod overlay;
pub mod shared_styles;
pub mod state;

use self::component::{Load, Message, State, ViewEnv};
use self::state::{Mode, ViewerImage};
use crate::api::ImageMetadata;
use crate::media::ImageData;
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{button, image::Image, Column, Container, Row, Scrollable, Space, Stack, Text};
use iced::{alignment, ContentFit, Element, Length};
use std::time::Duration;

/// Increment of the slideshow transition stepper.
const TRANSITION_STEP: Duration = Duration::from_secs(1);

pub fn view(state: &State, env: ViewEnv) -> Element<'_, Message> {
    match state.load() {
        Load::Loading => centered(Text::new("Loading album…").size(typography::BODY_LG)),
        Load::Failed(message) => error_view(message),
        Load::Loaded => match state.viewer().mode() {
            Mode::Grid => grid_view(state),
            Mode::Viewer { .. } | Mode::Slideshow { .. } => presentation_view(state, &env),
        },
    }
}

/// Full-size image scaled to fit the stage.
pub fn view_image(image_data: &ImageData) -> Element<'_, Message> {
    Image::new(image_data.handle.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn error_view(message: &str) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("Could not load this album").size(typography::TITLE_MD))
        .push(Text::new(message).size(typography::BODY))
        .push(
            Row::new()
                .spacing(spacing::XS)
                .push(button(Text::new("Retry")).on_press(Message::Retry))
                .push(button(Text::new("Back")).on_press(Message::Back)),
        );
    centered(content)
}

fn grid_view(state: &State) -> Element<'_, Message> {
    let viewer = state.viewer();
    let mut header = Column::new().spacing(spacing::XS);

    let mut title_row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(button(Text::new("← Albums")).on_press(Message::Back));

    if let Some(album) = state.album() {
        title_row = title_row.push(Text::new(album.name.as_str()).size(typography::TITLE_LG));
        header = header.push(title_row);
        if let Some(date) = &album.date {
            header = header.push(Text::new(date.as_str()).size(typography::CAPTION));
        }
        if !album.description.is_empty() {
            header = header.push(Text::new(album.description.as_str()).size(typography::BODY));
        }
    } else {
        header = header.push(title_row);
    }

    let slideshow = button(Text::new("▶ Slideshow")).on_press_maybe(
        (viewer.image_count() > 0)
            .then_some(Message::Viewer(state::Message::StartSlideshow)),
    );
    header = header.push(
        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(slideshow)
            .push(Text::new(format!("{} images", viewer.image_count())).size(typography::CAPTION)),
    );

    let body: Element<'_, Message> = if viewer.images().is_empty() {
        Text::new("This album has no images yet.").into()
    } else {
        let tiles: Vec<Element<'_, Message>> = viewer
            .images()
            .iter()
            .enumerate()
            .map(|(index, image)| thumbnail_tile(state, index, image))
            .collect();
        Row::with_children(tiles)
            .spacing(spacing::XS)
            .wrap()
            .vertical_spacing(spacing::XS)
            .into()
    };

    Scrollable::new(
        Column::new()
            .spacing(spacing::LG)
            .padding(spacing::LG)
            .width(Length::Fill)
            .push(header)
            .push(body),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn thumbnail_tile<'a>(state: &'a State, index: usize, image: &'a ViewerImage) -> Element<'a, Message> {
    let edge = Length::Fixed(sizing::THUMBNAIL_SM);
    let content: Element<'a, Message> = match state.thumbnail(&image.id) {
        Some(preview) => Image::new(preview.handle())
            .content_fit(ContentFit::Cover)
            .width(edge)
            .height(edge)
            .into(),
        None => {
            let label = if state.thumbnail_pending(&image.id) {
                "…"
            } else {
                image.file_name.as_str()
            };
            Container::new(Text::new(label).size(typography::CAPTION))
                .width(edge)
                .height(edge)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into()
        }
    };

    button(content)
        .padding(0)
        .on_press(Message::Viewer(state::Message::ActivateImage(index)))
        .into()
}

fn presentation_view<'a>(state: &'a State, env: &ViewEnv) -> Element<'a, Message> {
    let viewer = state.viewer();

    let stage: Element<'a, Message> = match state.current_full_image() {
        Some(data) => view_image(data),
        None if state.current_full_image_failed() => {
            centered(Text::new("Image unavailable").size(typography::BODY_LG))
        }
        None => centered(Text::new("Loading…").size(typography::BODY_LG)),
    };

    let mut layers = Stack::new().width(Length::Fill).height(Length::Fill).push(
        Container::new(stage)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(shared_styles::stage),
    );

    if viewer.overlay_visible() {
        layers = layers.push(controls_layer(state, env));
    }

    if viewer.info().is_visible() {
        layers = layers.push(info_layer(viewer.info()));
    }

    layers.into()
}

fn overlay_button(label: &str, message: Option<state::Message>) -> Element<'_, Message> {
    button(Text::new(label).size(typography::BODY))
        .padding([spacing::XXS, spacing::XS])
        .style(shared_styles::overlay_button)
        .on_press_maybe(message.map(Message::Viewer))
        .into()
}

fn controls_layer<'a>(state: &'a State, env: &ViewEnv) -> Element<'a, Message> {
    let viewer = state.viewer();
    let count = viewer.image_count();
    let index = viewer.current_index().unwrap_or(0);

    let mut top = Row::new()
        .spacing(shared_styles::CONTROL_SPACING)
        .align_y(alignment::Vertical::Center)
        .push(overlay_button("✕", Some(state::Message::Close)))
        .push(Text::new(viewer.position_label().unwrap_or_default()).size(typography::BODY))
        .push(Space::new().width(Length::Fill));

    match viewer.mode() {
        Mode::Slideshow { paused, transition, .. } => {
            let pause_label = if paused { "▶ Play" } else { "❚❚ Pause" };
            top = top.push(overlay_button(pause_label, Some(state::Message::TogglePause)));
            top = top.push(transition_stepper(transition));
        }
        Mode::Viewer { .. } => {
            top = top
                .push(overlay_button("Info", Some(state::Message::ToggleInfo)))
                .push(overlay_button("Download", Some(state::Message::Download)));
            if env.signed_in {
                top = top.push(overlay_button("Delete", Some(state::Message::DeleteCurrent)));
            }
        }
        Mode::Grid => {}
    }

    let fullscreen_label = if viewer.is_fullscreen() {
        "Exit fullscreen"
    } else {
        "Fullscreen"
    };
    top = top.push(overlay_button(
        fullscreen_label,
        Some(state::Message::ToggleFullscreen),
    ));

    let previous = overlay_button("‹", (index > 0).then_some(state::Message::Previous));
    let next = overlay_button("›", (index + 1 < count).then_some(state::Message::Next));

    let arrows = Row::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::MD)
        .push(previous)
        .push(Space::new().width(Length::Fill))
        .push(next);

    let caption = viewer
        .current_image()
        .map(|image| Text::new(image.file_name.as_str()).size(typography::CAPTION));

    let mut bar = Column::new().spacing(spacing::XXS).push(top);
    if let Some(caption) = caption {
        bar = bar.push(caption);
    }

    Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(
            Container::new(bar)
                .width(Length::Fill)
                .padding(shared_styles::CONTROL_PADDING)
                .style(shared_styles::overlay_bar),
        )
        .push(arrows)
        .into()
}

/// `−` / value / `+` control. Any value from one second up is reachable.
fn transition_stepper<'a>(current: Duration) -> Element<'a, Message> {
    let shorter = current
        .checked_sub(TRANSITION_STEP)
        .filter(|shorter| *shorter >= state::MIN_TRANSITION)
        .map(state::Message::SetTransition);
    let longer = state::Message::SetTransition(current.saturating_add(TRANSITION_STEP));

    Row::new()
        .spacing(spacing::XXS)
        .align_y(alignment::Vertical::Center)
        .push(overlay_button("−", shorter))
        .push(Text::new(transition_label(current)).size(typography::CAPTION))
        .push(overlay_button("+", Some(longer)))
        .into()
}

fn transition_label(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis % 1000 == 0 {
        format!("{}s", millis / 1000)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

fn info_layer(info: &info::State) -> Element<'_, Message> {
    let body: Element<'_, Message> = match info.content() {
        Some(info::Content::Loaded(metadata)) => metadata_rows(metadata),
        Some(info::Content::Failed(message)) => {
            Text::new(format!("Metadata unavailable: {message}"))
                .size(typography::BODY)
                .into()
        }
        Some(info::Content::Loading) | None => Text::new("Loading…").size(typography::BODY).into(),
    };

    let panel = Container::new(
        Column::new()
            .spacing(spacing::XS)
            .push(Text::new("Image information").size(typography::BODY_LG))
            .push(body),
    )
    .width(Length::Fixed(sizing::INFO_PANEL_WIDTH))
    .padding(spacing::MD)
    .style(shared_styles::info_panel);

    Container::new(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG)
        .into()
}

/// Label/value pairs for the info panel; missing values read "N/A".
pub fn metadata_fields(metadata: &ImageMetadata) -> Vec<(&'static str, String)> {
    let or_na = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());
    vec![
        ("Camera make", or_na(metadata.camera_make.clone())),
        ("Camera model", or_na(metadata.camera_model.clone())),
        ("Lens", or_na(metadata.lens_model.clone())),
        ("ISO", or_na(metadata.iso.map(|iso| iso.to_string()))),
        ("Aperture", or_na(metadata.aperture_label())),
        ("Shutter speed", or_na(metadata.shutter_speed.clone())),
        ("Focal length", or_na(metadata.focal_length_label())),
        ("Light source", or_na(metadata.light_source.clone())),
        ("Date taken", or_na(metadata.date_created.clone())),
        ("File size", or_na(metadata.file_size_label())),
    ]
}

fn metadata_rows(metadata: &ImageMetadata) -> Element<'_, Message> {
    let rows = metadata_fields(metadata).into_iter().map(|(label, value)| {
        Row::new()
            .spacing(spacing::XS)
            .push(Text::new(label).size(typography::CAPTION).width(Length::FillPortion(2)))
            .push(Text::new(value).size(typography::BODY).width(Length::FillPortion(3)))
            .into()
    });
    Column::with_children(rows).spacing(spacing::XXS).into()
}
