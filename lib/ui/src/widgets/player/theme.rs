use iced::widget::{button, container, slider, text, text_input};
use iced::{Border, Color, Shadow, Theme};

// Dark shell with a teal accent.
const BACKGROUND: Color = Color::from_rgb(0.1, 0.1, 0.1);
const SURFACE: Color = Color::from_rgb(0.15, 0.15, 0.15);
const ACCENT: Color = Color::from_rgb(0.15, 0.75, 0.7);
const ACCENT_DARK: Color = Color::from_rgb(0.1, 0.55, 0.5);
pub const TEXT_LIGHT: Color = Color::from_rgb(0.9, 0.9, 0.9);
const TEXT_DARK: Color = Color::BLACK;

/// Fill of the media surface placeholder the engine composites over.
pub fn surface_fill() -> Color {
    Color::from_rgb(0.07, 0.08, 0.09)
}

pub fn surface_border() -> Border {
    Border {
        radius: 2.0.into(),
        width: 1.0,
        color: ACCENT_DARK,
    }
}

pub fn text_style(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(TEXT_LIGHT),
    }
}

pub fn text_accent(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(ACCENT),
    }
}

pub fn text_time(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(Color::from_rgb(0.7, 0.7, 0.7)),
    }
}

pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => button::Style {
            background: Some(ACCENT.into()),
            text_color: TEXT_DARK,
            border: Border {
                radius: 4.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.2,
                    ..Color::BLACK
                },
                offset: iced::Vector::new(0.0, 1.0),
                blur_radius: 2.0,
            },
        },
        button::Status::Hovered => button::Style {
            background: Some(
                Color {
                    a: 0.9,
                    ..ACCENT
                }
                .into(),
            ),
            text_color: TEXT_DARK,
            border: Border {
                radius: 4.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.3,
                    ..Color::BLACK
                },
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 3.0,
            },
        },
        button::Status::Pressed => button::Style {
            background: Some(ACCENT_DARK.into()),
            text_color: TEXT_DARK,
            border: Border {
                radius: 4.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.1,
                    ..Color::BLACK
                },
                offset: iced::Vector::new(0.0, 0.0),
                blur_radius: 1.0,
            },
        },
        button::Status::Disabled => button::Style {
            background: Some(
                Color {
                    a: 0.5,
                    ..ACCENT
                }
                .into(),
            ),
            text_color: Color {
                a: 0.5,
                ..TEXT_DARK
            },
            border: Border {
                radius: 4.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            shadow: Shadow::default(),
        },
    }
}

pub fn secondary_button(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Disabled => button::Style {
            background: Some(SURFACE.into()),
            text_color: ACCENT,
            border: Border {
                radius: 4.0.into(),
                width: 1.0,
                color: ACCENT,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.2,
                    ..Color::BLACK
                },
                offset: iced::Vector::new(0.0, 1.0),
                blur_radius: 2.0,
            },
        },
        button::Status::Hovered => button::Style {
            background: Some(
                Color {
                    a: 0.2,
                    ..ACCENT
                }
                .into(),
            ),
            text_color: ACCENT,
            border: Border {
                radius: 4.0.into(),
                width: 1.0,
                color: ACCENT,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.3,
                    ..Color::BLACK
                },
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 3.0,
            },
        },
        button::Status::Pressed => button::Style {
            background: Some(
                Color {
                    a: 0.3,
                    ..ACCENT
                }
                .into(),
            ),
            text_color: ACCENT,
            border: Border {
                radius: 4.0.into(),
                width: 1.0,
                color: ACCENT,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.1,
                    ..Color::BLACK
                },
                offset: iced::Vector::new(0.0, 0.0),
                blur_radius: 1.0,
            },
        },
    }
}

/// Flat text button for suggestion rows.
pub fn suggestion_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Some(SURFACE.into()),
        _ => None,
    };
    button::Style {
        background,
        text_color: TEXT_LIGHT,
        border: Border {
            radius: 3.0.into(),
            width: 0.0,
            color: Color::TRANSPARENT,
        },
        shadow: Shadow::default(),
    }
}

pub fn video_slider(_theme: &Theme, _status: slider::Status) -> slider::Style {
    slider::Style {
        rail: slider::Rail {
            backgrounds: (ACCENT.into(), SURFACE.into()),
            width: 6.0,
            border: Border {
                radius: 3.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle { radius: 8.0 },
            background: ACCENT.into(),
            border_width: 1.0,
            border_color: TEXT_DARK,
        },
    }
}

pub fn search_input(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let border_color = match status {
        text_input::Status::Focused => ACCENT,
        _ => ACCENT_DARK,
    };
    text_input::Style {
        background: SURFACE.into(),
        border: Border {
            radius: 4.0.into(),
            width: 1.0,
            color: border_color,
        },
        icon: TEXT_LIGHT,
        placeholder: Color::from_rgb(0.5, 0.5, 0.5),
        value: TEXT_LIGHT,
        selection: Color { a: 0.4, ..ACCENT },
    }
}

pub fn video_container(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT_LIGHT),
        background: Some(Color::BLACK.into()),
        border: Border {
            radius: 6.0.into(),
            width: 1.0,
            color: ACCENT_DARK,
        },
        shadow: Shadow {
            color: Color {
                a: 0.2,
                ..Color::BLACK
            },
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 5.0,
        },
    }
}

pub fn controls_container(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT_LIGHT),
        background: Some(BACKGROUND.into()),
        border: Border {
            radius: 6.0.into(),
            width: 0.0,
            color: Color::TRANSPARENT,
        },
        shadow: Shadow::default(),
    }
}

/// The search panel column on the right.
pub fn panel_container(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT_LIGHT),
        background: Some(BACKGROUND.into()),
        border: Border {
            radius: 6.0.into(),
            width: 1.0,
            color: SURFACE,
        },
        shadow: Shadow::default(),
    }
}

pub fn modal_container(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT_LIGHT),
        background: Some(SURFACE.into()),
        border: Border {
            radius: 8.0.into(),
            width: 1.0,
            color: ACCENT,
        },
        shadow: Shadow {
            color: Color {
                a: 0.5,
                ..Color::BLACK
            },
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 12.0,
        },
    }
}

/// Dimmed backdrop behind the failure dialog.
pub fn modal_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT_LIGHT),
        background: Some(
            Color {
                a: 0.7,
                ..Color::BLACK
            }
            .into(),
        ),
        border: Border::default(),
        shadow: Shadow::default(),
    }
}
