use std::marker::PhantomData;

use iced::{Point, Size, Vector};
use pocket_video_player_core::ViewportState;

pub mod element;
pub mod icons;
pub mod theme;

/// The pan/zoomable media surface.
///
/// Dumb by design: it paints the surface rectangle where the engine
/// composites its video and reports raw pointer gestures upward; every bit
/// of transform arithmetic lives in [`ViewportState`].
pub struct Surface<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer> {
    viewport: &'a ViewportState,
    width: iced::Length,
    height: iced::Length,
    on_zoom: Option<Box<dyn Fn(f32, Point) -> Message + 'a>>,
    on_drag: Option<Box<dyn Fn(Vector) -> Message + 'a>>,
    on_resize: Option<Box<dyn Fn(Size) -> Message + 'a>>,
    _phantom: PhantomData<(Theme, Renderer)>,
}

impl<'a, Message, Theme, Renderer> Surface<'a, Message, Theme, Renderer> {
    pub fn new(viewport: &'a ViewportState) -> Self {
        Surface {
            viewport,
            width: iced::Length::Fill,
            height: iced::Length::Fill,
            on_zoom: None,
            on_drag: None,
            on_resize: None,
            _phantom: PhantomData,
        }
    }

    pub fn width(self, width: impl Into<iced::Length>) -> Self {
        Surface {
            width: width.into(),
            ..self
        }
    }

    pub fn height(self, height: impl Into<iced::Length>) -> Self {
        Surface {
            height: height.into(),
            ..self
        }
    }

    /// Wheel tick over the surface: scroll delta plus the pointer position
    /// in surface coordinates.
    pub fn on_zoom(mut self, f: impl Fn(f32, Point) -> Message + 'a) -> Self {
        self.on_zoom = Some(Box::new(f));
        self
    }

    /// Pointer moved while dragging the surface.
    pub fn on_drag(mut self, f: impl Fn(Vector) -> Message + 'a) -> Self {
        self.on_drag = Some(Box::new(f));
        self
    }

    /// The widget's own bounds changed.
    pub fn on_resize(mut self, f: impl Fn(Size) -> Message + 'a) -> Self {
        self.on_resize = Some(Box::new(f));
        self
    }
}
