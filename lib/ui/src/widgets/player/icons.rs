use iced::alignment::Vertical;
use iced::widget::{container, svg};
use iced::{Element, Length};

pub fn create<'a, Message: 'a>(
    name: &str,
    width: f32,
    height: f32,
    color: Option<iced::Color>,
) -> Element<'a, Message> {
    let handle = svg::Handle::from_path(format!("assets/icons/{}.svg", name));

    let svg_element = svg(handle)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height));

    let svg_with_color = if let Some(color) = color {
        svg_element.style(move |_theme, _status| svg::Style { color: Some(color) })
    } else {
        svg_element
    };

    container(svg_with_color).align_y(Vertical::Center).into()
}

pub fn play<'a, Message: 'a>(size: f32, color: Option<iced::Color>) -> Element<'a, Message> {
    create("play", size, size, color)
}

pub fn pause<'a, Message: 'a>(size: f32, color: Option<iced::Color>) -> Element<'a, Message> {
    create("pause", size, size, color)
}

pub fn volume_on<'a, Message: 'a>(size: f32, color: Option<iced::Color>) -> Element<'a, Message> {
    create("volume-on", size, size, color)
}

pub fn volume_off<'a, Message: 'a>(size: f32, color: Option<iced::Color>) -> Element<'a, Message> {
    create("volume-off", size, size, color)
}

pub fn search<'a, Message: 'a>(size: f32, color: Option<iced::Color>) -> Element<'a, Message> {
    create("search", size, size, color)
}

pub fn folder<'a, Message: 'a>(size: f32, color: Option<iced::Color>) -> Element<'a, Message> {
    create("folder", size, size, color)
}
