// SPDX-License-Identifier: MPL-2.0
//! Colours and container styles shared by the viewer and slideshow overlays.

use crate::ui::design_tokens::{border, opacity, palette, radius, spacing};
use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

/// Spacing between overlay controls.
pub const CONTROL_SPACING: f32 = spacing::XS;

pub const CONTROL_PADDING: f32 = spacing::SM;

/// Backdrop behind the full-size image.
pub const STAGE_BACKGROUND: Color = palette::BLACK;

/// Semi-transparent bar behind overlay controls.
pub const OVERLAY_BACKGROUND: Color = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::BLACK
};

pub const HUD_TEXT_COLOR: Color = palette::WHITE;

/// Border for thumbnails marked for deletion in the edit form.
pub const MARKED_BORDER: Color = palette::ERROR_500;

const _: () = {
    assert!(CONTROL_SPACING > 0.0);
    assert!(CONTROL_PADDING > 0.0);
    assert!(OVERLAY_BACKGROUND.a < 1.0);
    assert!(OVERLAY_BACKGROUND.a > 0.0);
};

pub fn stage(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(STAGE_BACKGROUND)),
        text_color: Some(HUD_TEXT_COLOR),
        ..Default::default()
    }
}

pub fn overlay_bar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(OVERLAY_BACKGROUND)),
        text_color: Some(HUD_TEXT_COLOR),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn info_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(OVERLAY_BACKGROUND)),
        text_color: Some(HUD_TEXT_COLOR),
        border: Border {
            color: palette::GRAY_700,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Flat overlay button that brightens on hover.
pub fn overlay_button(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_MEDIUM,
        button::Status::Pressed => opacity::OVERLAY_STRONG,
        button::Status::Active => opacity::OVERLAY_SUBTLE,
        button::Status::Disabled => opacity::TRANSPARENT,
    };
    let text_color = if status == button::Status::Disabled {
        palette::GRAY_400
    } else {
        HUD_TEXT_COLOR
    };

    button::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..palette::WHITE
        })),
        text_color,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: iced::Shadow::default(),
        snap: true,
    }
}

/// Thumbnail border: red when marked for deletion, none otherwise.
pub fn thumbnail_frame(marked: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        border: Border {
            color: if marked { MARKED_BORDER } else { Color::TRANSPARENT },
            width: border::WIDTH_MD,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}
