use iced::widget::{column, horizontal_space, Checkbox};
use iced::{
    advanced::{self, layout, widget, Widget},
    event::Status,
    mouse,
    widget::Stack,
    Alignment::Center,
    Border, Element, Length, Point, Rectangle, Shadow, Size, Vector,
};
use std::time::Duration;

use iced::widget::{center, opaque, Button, Column, Container, Row, Slider, Text};

use pocket_video_player_core::playback::{EngineEvent, MediaSource, PlaybackEngine};
use pocket_video_player_core::ViewportState;
use tracing::{debug, error};

use super::icons::{pause, play, volume_off, volume_on};
use super::theme::{
    controls_container, modal_backdrop, modal_container, primary_button, secondary_button,
    surface_border, surface_fill, text_time, video_container, video_slider,
};
use super::Surface;

pub struct Player {
    engine: Box<dyn PlaybackEngine>,
    viewport: ViewportState,
    source: Option<MediaSource>,
    is_playing: bool,
    position: f64,
    duration: Option<f64>,
    dragging_seek: bool,
    volume: f64,
    muted: bool,
    repeating: bool,
    fatal: Option<String>,
}

#[derive(Clone, Debug)]
pub enum Event {
    TogglePlayback,
    ToggleMute,
    ToggleRepeat(bool),
    Volume(f64),
    Seek(f64),
    SeekRelease,
    Open(MediaSource),
    Zoom(f32, Point),
    Drag(Vector),
    SurfaceResized(Size),
    Tick,
    DismissError,
}

impl Player {
    pub fn new(engine: Box<dyn PlaybackEngine>) -> Self {
        Self {
            engine,
            viewport: ViewportState::new(Size::new(1280.0, 720.0), Size::new(640.0, 360.0)),
            source: None,
            is_playing: false,
            position: 0.0,
            duration: None,
            dragging_seek: false,
            volume: 100.0,
            muted: false,
            // Dropped files loop by default, like a preview kiosk.
            repeating: true,
            fatal: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    /// Raises the blocking failure dialog without going through the engine.
    pub fn report_error(&mut self, message: String) {
        error!("{message}");
        self.fatal = Some(message);
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    pub fn update(&mut self, message: Event) {
        match message {
            Event::TogglePlayback => {
                if self.source.is_none() {
                    return;
                }
                let result = if self.is_playing {
                    self.engine.pause()
                } else {
                    self.engine.resume()
                };
                match result {
                    Ok(()) => self.is_playing = !self.is_playing,
                    Err(e) => {
                        error!("Failed to toggle playback: {e}")
                    }
                }
            }
            Event::ToggleMute => {
                let next = !self.muted;
                match self.engine.set_mute(next) {
                    Ok(()) => self.muted = next,
                    Err(e) => {
                        error!("Failed to toggle mute: {e}")
                    }
                }
            }
            Event::ToggleRepeat(value) => {
                self.repeating = value;
            }
            Event::Volume(level) => {
                self.volume = level;
                if let Err(e) = self.engine.set_volume(level) {
                    error!("Failed to set volume: {e}");
                }
            }
            Event::Seek(secs) => {
                self.dragging_seek = true;
                self.position = secs;
                if let Err(e) = self.engine.seek(Duration::from_secs_f64(secs.max(0.0))) {
                    error!("Failed to seek: {e}");
                }
            }
            Event::SeekRelease => {
                self.dragging_seek = false;
            }
            Event::Open(source) => {
                debug!("opening {}", source.location());
                match self.engine.play(&source) {
                    Ok(()) => {
                        self.source = Some(source);
                        self.is_playing = true;
                        self.position = 0.0;
                        self.duration = None;
                    }
                    Err(e) => {
                        error!("Failed to start playback: {e}")
                    }
                }
            }
            Event::Zoom(delta, at) => {
                self.viewport.zoom(delta, at);
            }
            Event::Drag(delta) => {
                self.viewport.drag(delta);
            }
            Event::SurfaceResized(size) => {
                self.viewport.resize(size);
            }
            Event::Tick => self.tick(),
            // Acknowledging the failure dialog is handled by the application,
            // which tears the player down and exits.
            Event::DismissError => {}
        }
    }

    fn tick(&mut self) {
        if self.fatal.is_some() {
            return;
        }

        for event in self.engine.poll_events() {
            match event {
                EngineEvent::PositionChanged(position) => {
                    if !self.dragging_seek {
                        self.position = position.as_secs_f64();
                    }
                }
                EngineEvent::EndReached => self.end_reached(),
                EngineEvent::MediaChanged(location) => {
                    debug!("media changed: {location}");
                    self.duration = None;
                    match self.engine.video_size() {
                        Ok(Some((width, height))) => self
                            .viewport
                            .set_content(Size::new(width as f32, height as f32)),
                        Ok(None) => {}
                        Err(e) => {
                            error!("Failed to read video size: {e}")
                        }
                    }
                }
                EngineEvent::Error(message) => {
                    error!("Engine failure: {message}");
                    self.fatal = Some(message);
                }
            }
        }

        if self.duration.is_none() && self.source.is_some() {
            match self.engine.duration() {
                Ok(Some(total)) => self.duration = Some(total.as_secs_f64()),
                Ok(None) => {}
                Err(e) => {
                    error!("Failed to read duration: {e}")
                }
            }
        }
    }

    fn end_reached(&mut self) {
        if self.repeating {
            if let Some(source) = self.source.clone() {
                debug!("repeating {}", source.location());
                if let Err(e) = self.engine.play(&source) {
                    error!("Failed to repeat playback: {e}");
                }
                return;
            }
        }
        self.is_playing = false;
    }

    pub fn view(&self) -> Element<Event> {
        let total = self.duration.unwrap_or(0.0);

        let surface = Surface::new(&self.viewport)
            .width(Length::Fill)
            .height(Length::Fill)
            .on_zoom(Event::Zoom)
            .on_drag(Event::Drag)
            .on_resize(Event::SurfaceResized);

        let video_area = {
            let mut stack = Stack::new().push(
                Container::new(surface)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(video_container),
            );

            if self.source.is_none() {
                stack = stack.push(
                    Container::new(
                        Text::new("Drop a video file here to start playback").style(text_time),
                    )
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Center)
                    .align_y(Center),
                );
            }

            stack
        };

        let controls = Row::new()
            .spacing(10)
            .align_y(iced::alignment::Vertical::Center)
            .padding(iced::Padding::new(10.0))
            .push(
                Button::new(
                    Row::new()
                        .spacing(5)
                        .align_y(iced::alignment::Alignment::Center)
                        .push(if !self.is_playing {
                            play(16.0, None)
                        } else {
                            pause(16.0, None)
                        })
                        .push(Text::new(if !self.is_playing { "Play" } else { "Pause" })),
                )
                .width(100.0)
                .on_press(Event::TogglePlayback)
                .style(primary_button),
            )
            .push(
                Button::new(if self.muted {
                    volume_off(16.0, None)
                } else {
                    volume_on(16.0, None)
                })
                .on_press(Event::ToggleMute)
                .style(secondary_button),
            )
            .push(
                Slider::new(0.0..=100.0, self.volume, Event::Volume)
                    .step(1.0)
                    .width(150.0)
                    .style(video_slider),
            )
            .push(Checkbox::new("Repeat", self.repeating).on_toggle(Event::ToggleRepeat))
            .push(horizontal_space())
            .push(
                Text::new(format!(
                    "{:02}:{:02} / {:02}:{:02}",
                    (self.position / 60.0).floor() as u64,
                    (self.position % 60.0).floor() as u64,
                    (total / 60.0).floor() as u64,
                    (total % 60.0).floor() as u64
                ))
                .style(text_time),
            );

        let content = Column::new()
            .push(
                Container::new(column![video_area])
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(video_container),
            )
            .push(
                Container::new(
                    Slider::new(0.0..=total.max(0.1), self.position.min(total), Event::Seek)
                        .step(0.1)
                        .on_release(Event::SeekRelease)
                        .style(video_slider),
                )
                .padding(iced::Padding::new(15.0))
                .style(controls_container),
            )
            .push(
                Container::new(controls)
                    .style(controls_container)
                    .width(Length::Fill),
            )
            .spacing(1);

        if let Some(message) = self.fatal.clone() {
            let dialog = Container::new(
                Column::new()
                    .spacing(15)
                    .push(Text::new("Playback engine failure"))
                    .push(Text::new(message).style(text_time))
                    .push(
                        Button::new(Text::new("Close player"))
                            .on_press(Event::DismissError)
                            .style(primary_button),
                    ),
            )
            .padding(20)
            .max_width(420.0)
            .style(modal_container);

            return Stack::new()
                .push(content)
                .push(opaque(center(dialog).style(modal_backdrop)))
                .into();
        }

        content.into()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SurfaceState {
    dragging: bool,
    last_cursor: Option<Point>,
    last_size: Option<Size>,
}

impl<'a, Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Surface<'a, Message, Theme, Renderer>
where
    Renderer: advanced::Renderer,
{
    fn tag(&self) -> widget::tree::Tag {
        widget::tree::Tag::of::<SurfaceState>()
    }

    fn state(&self) -> widget::tree::State {
        widget::tree::State::new(SurfaceState::default())
    }

    fn size(&self) -> iced::Size<iced::Length> {
        iced::Size {
            width: self.width,
            height: self.height,
        }
    }

    fn layout(
        &self,
        _tree: &mut widget::Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(limits.resolve(self.width, self.height, Size::ZERO))
    }

    fn draw(
        &self,
        _tree: &widget::Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &advanced::renderer::Style,
        layout: advanced::Layout<'_>,
        _cursor: advanced::mouse::Cursor,
        _viewport: &iced::Rectangle,
    ) {
        let bounds = layout.bounds();
        renderer.fill_quad(
            advanced::renderer::Quad {
                bounds,
                border: Border::default(),
                shadow: Shadow::default(),
            },
            iced::Color::BLACK,
        );

        let origin = self.viewport.origin();
        let scaled = self.viewport.scaled();
        if scaled.width <= 0.0 || scaled.height <= 0.0 {
            return;
        }
        let content = Rectangle::new(
            Point::new(bounds.x + origin.x, bounds.y + origin.y),
            scaled,
        );

        let render = |renderer: &mut Renderer| {
            renderer.fill_quad(
                advanced::renderer::Quad {
                    bounds: content,
                    border: surface_border(),
                    shadow: Shadow::default(),
                },
                surface_fill(),
            );
        };

        if self.viewport.overflows() {
            renderer.with_layer(bounds, render);
        } else {
            render(renderer);
        }
    }

    fn on_event(
        &mut self,
        tree: &mut widget::Tree,
        event: iced::Event,
        layout: advanced::Layout<'_>,
        cursor: advanced::mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn advanced::Clipboard,
        shell: &mut advanced::Shell<'_, Message>,
        _viewport: &iced::Rectangle,
    ) -> Status {
        let bounds = layout.bounds();
        let state = tree.state.downcast_mut::<SurfaceState>();

        if let iced::Event::Window(iced::window::Event::RedrawRequested(_)) = event {
            if state.last_size != Some(bounds.size()) {
                state.last_size = Some(bounds.size());
                if let Some(on_resize) = &self.on_resize {
                    shell.publish(on_resize(bounds.size()));
                }
            }
            return Status::Ignored;
        }

        if let iced::Event::Mouse(mouse_event) = event {
            match mouse_event {
                mouse::Event::WheelScrolled { delta } => {
                    if let Some(position) = cursor.position_over(bounds) {
                        let vertical = match delta {
                            mouse::ScrollDelta::Lines { y, .. } => y,
                            mouse::ScrollDelta::Pixels { y, .. } => y,
                        };
                        if vertical != 0.0 {
                            if let Some(on_zoom) = &self.on_zoom {
                                let local =
                                    Point::new(position.x - bounds.x, position.y - bounds.y);
                                shell.publish(on_zoom(vertical, local));
                            }
                            return Status::Captured;
                        }
                    }
                }
                mouse::Event::ButtonPressed(mouse::Button::Left) => {
                    if let Some(position) = cursor.position_over(bounds) {
                        // Grabbing only makes sense once the surface
                        // overflows its viewport.
                        if self.viewport.overflows() {
                            state.dragging = true;
                            state.last_cursor = Some(position);
                            return Status::Captured;
                        }
                    }
                }
                mouse::Event::CursorMoved { position } => {
                    if state.dragging {
                        if let Some(last) = state.last_cursor {
                            let delta = Vector::new(position.x - last.x, position.y - last.y);
                            if let Some(on_drag) = &self.on_drag {
                                shell.publish(on_drag(delta));
                            }
                        }
                        state.last_cursor = Some(position);
                        return Status::Captured;
                    }
                }
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    if state.dragging {
                        state.dragging = false;
                        state.last_cursor = None;
                        return Status::Captured;
                    }
                }
                _ => {}
            }
        }

        Status::Ignored
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: advanced::Layout<'_>,
        cursor: advanced::mouse::Cursor,
        _viewport: &iced::Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<SurfaceState>();
        if state.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(layout.bounds()) && self.viewport.overflows() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Message, Theme, Renderer> From<Surface<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: 'a + advanced::Renderer,
{
    fn from(surface: Surface<'a, Message, Theme, Renderer>) -> Self {
        Self::new(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_video_player_common::PlayerError;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Recorded {
        plays: Vec<String>,
        pauses: usize,
        resumes: usize,
        seeks: Vec<f64>,
        volumes: Vec<f64>,
        mutes: Vec<bool>,
        pending: Vec<EngineEvent>,
        shutdowns: usize,
    }

    #[derive(Default)]
    struct StubEngine {
        recorded: Rc<RefCell<Recorded>>,
    }

    impl PlaybackEngine for StubEngine {
        fn play(&mut self, source: &MediaSource) -> Result<(), PlayerError> {
            self.recorded.borrow_mut().plays.push(source.location());
            Ok(())
        }

        fn pause(&mut self) -> Result<(), PlayerError> {
            self.recorded.borrow_mut().pauses += 1;
            Ok(())
        }

        fn resume(&mut self) -> Result<(), PlayerError> {
            self.recorded.borrow_mut().resumes += 1;
            Ok(())
        }

        fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
            self.recorded.borrow_mut().seeks.push(position.as_secs_f64());
            Ok(())
        }

        fn set_volume(&mut self, level: f64) -> Result<(), PlayerError> {
            self.recorded.borrow_mut().volumes.push(level);
            Ok(())
        }

        fn set_mute(&mut self, mute: bool) -> Result<(), PlayerError> {
            self.recorded.borrow_mut().mutes.push(mute);
            Ok(())
        }

        fn duration(&mut self) -> Result<Option<Duration>, PlayerError> {
            Ok(None)
        }

        fn video_size(&mut self) -> Result<Option<(u32, u32)>, PlayerError> {
            Ok(None)
        }

        fn poll_events(&mut self) -> Vec<EngineEvent> {
            std::mem::take(&mut self.recorded.borrow_mut().pending)
        }

        fn shutdown(&mut self) {
            self.recorded.borrow_mut().shutdowns += 1;
        }
    }

    fn player() -> (Player, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let engine = StubEngine {
            recorded: recorded.clone(),
        };
        (Player::new(Box::new(engine)), recorded)
    }

    fn clip() -> MediaSource {
        MediaSource::File(PathBuf::from("/videos/clip.mp4"))
    }

    #[test]
    fn test_open_starts_playback() {
        let (mut player, recorded) = player();
        player.update(Event::Open(clip()));
        assert!(player.is_playing());
        assert_eq!(recorded.borrow().plays, ["/videos/clip.mp4"]);
    }

    #[test]
    fn test_toggle_without_media_is_ignored() {
        let (mut player, recorded) = player();
        player.update(Event::TogglePlayback);
        assert!(!player.is_playing());
        assert_eq!(recorded.borrow().pauses, 0);
        assert_eq!(recorded.borrow().resumes, 0);
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let (mut player, recorded) = player();
        player.update(Event::Open(clip()));
        player.update(Event::TogglePlayback);
        assert!(!player.is_playing());
        player.update(Event::TogglePlayback);
        assert!(player.is_playing());
        assert_eq!(recorded.borrow().pauses, 1);
        assert_eq!(recorded.borrow().resumes, 1);
    }

    #[test]
    fn test_end_reached_repeats_current_source() {
        let (mut player, recorded) = player();
        player.update(Event::Open(clip()));
        recorded
            .borrow_mut()
            .pending
            .push(EngineEvent::EndReached);
        player.update(Event::Tick);
        assert!(player.is_playing());
        assert_eq!(recorded.borrow().plays.len(), 2);
    }

    #[test]
    fn test_end_reached_stops_when_repeat_is_off() {
        let (mut player, recorded) = player();
        player.update(Event::Open(clip()));
        player.update(Event::ToggleRepeat(false));
        recorded
            .borrow_mut()
            .pending
            .push(EngineEvent::EndReached);
        player.update(Event::Tick);
        assert!(!player.is_playing());
        assert_eq!(recorded.borrow().plays.len(), 1);
    }

    #[test]
    fn test_position_updates_are_suppressed_while_seeking() {
        let (mut player, recorded) = player();
        player.update(Event::Open(clip()));

        recorded
            .borrow_mut()
            .pending
            .push(EngineEvent::PositionChanged(Duration::from_secs(5)));
        player.update(Event::Tick);
        assert_eq!(player.position(), 5.0);

        player.update(Event::Seek(2.0));
        recorded
            .borrow_mut()
            .pending
            .push(EngineEvent::PositionChanged(Duration::from_secs(8)));
        player.update(Event::Tick);
        assert_eq!(player.position(), 2.0);

        player.update(Event::SeekRelease);
        recorded
            .borrow_mut()
            .pending
            .push(EngineEvent::PositionChanged(Duration::from_secs(8)));
        player.update(Event::Tick);
        assert_eq!(player.position(), 8.0);
        assert_eq!(recorded.borrow().seeks, [2.0]);
    }

    #[test]
    fn test_engine_error_raises_fatal_dialog() {
        let (mut player, recorded) = player();
        player.update(Event::Open(clip()));
        recorded
            .borrow_mut()
            .pending
            .push(EngineEvent::Error("engine process exited".to_string()));
        player.update(Event::Tick);
        assert_eq!(player.fatal(), Some("engine process exited"));

        // The dialog stays up; later ticks change nothing.
        player.update(Event::Tick);
        assert_eq!(player.fatal(), Some("engine process exited"));
    }

    #[test]
    fn test_volume_and_mute_are_forwarded() {
        let (mut player, recorded) = player();
        player.update(Event::Volume(40.0));
        player.update(Event::ToggleMute);
        player.update(Event::ToggleMute);
        assert_eq!(recorded.borrow().volumes, [40.0]);
        assert_eq!(recorded.borrow().mutes, [true, false]);
    }

    #[test]
    fn test_surface_events_drive_the_viewport() {
        let (mut player, _recorded) = player();
        player.update(Event::SurfaceResized(Size::new(800.0, 600.0)));
        for _ in 0..5 {
            player.update(Event::Zoom(1.0, Point::new(400.0, 300.0)));
        }
        assert!(player.viewport().scale() > 1.0);

        player.update(Event::SurfaceResized(Size::new(640.0, 480.0)));
        assert_eq!(player.viewport().scale(), 1.0);
        assert_eq!(player.viewport().translation(), Vector::new(0.0, 0.0));
    }

    #[test]
    fn test_media_change_resets_duration_probe() {
        let (mut player, recorded) = player();
        player.update(Event::Open(clip()));
        recorded
            .borrow_mut()
            .pending
            .push(EngineEvent::MediaChanged("/videos/clip.mp4".to_string()));
        player.update(Event::Tick);
        assert!(player.is_playing());
    }
}
