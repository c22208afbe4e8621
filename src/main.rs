use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::{container, Button, Column, Row};
use iced::{window, Element, Length, Subscription, Task};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use pocket_video_player_core::playback::{
    EngineOptions, MediaSource, MpvEngine, NullEngine, PlaybackEngine,
};
use pocket_video_player_core::search::{LibraryProvider, SearchHistory, SearchPanel};
use pocket_video_player_ui::widgets::browser::{self, Browser};
use pocket_video_player_ui::widgets::player::element::{Event as PlayerEvent, Player};
use pocket_video_player_ui::widgets::player::icons;
use pocket_video_player_ui::widgets::player::theme::secondary_button;

fn main() -> iced::Result {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    iced::application("Pocket Video Player", App::update, App::view)
        .subscription(App::subscription)
        .window(window::Settings {
            exit_on_close_request: false,
            ..window::Settings::default()
        })
        .run()
}

struct App {
    player: Player,
    browser: Browser,
    show_browser: bool,
    hovered: usize,
    multi_drop: bool,
}

#[derive(Clone, Debug)]
enum Message {
    Player(PlayerEvent),
    Browser(browser::Event),
    ToggleBrowser,
    BrowseFile,
    FileSelected(Option<PathBuf>),
    Tick,
    FileHovered,
    HoverCleared,
    FileDropped(PathBuf),
    CloseRequested,
}

impl Default for App {
    fn default() -> Self {
        let mut engine_error = None;
        let engine: Box<dyn PlaybackEngine> =
            match MpvEngine::spawn(EngineOptions::builder().build()) {
                Ok(engine) => Box::new(engine),
                Err(err) => {
                    engine_error = Some(format!("failed to start the playback engine: {err}"));
                    Box::new(NullEngine)
                }
            };

        let mut player = Player::new(engine);
        if let Some(message) = engine_error {
            player.report_error(message);
        }

        let cwd = std::env::current_dir().expect("read working directory");
        let history = SearchHistory::load(cwd.join("searches")).expect("open search history file");
        let browser = Browser::new(
            SearchPanel::new(history),
            Arc::new(LibraryProvider::new(cwd)),
        );

        let mut app = App {
            player,
            browser,
            show_browser: false,
            hovered: 0,
            multi_drop: false,
        };

        // A single path on the command line starts playing right away; any
        // other argument shape is ignored.
        let args: Vec<String> = std::env::args().skip(1).collect();
        if let [arg] = args.as_slice() {
            app.open(arg);
        }

        app
    }
}

impl App {
    fn open(&mut self, raw: &str) {
        match MediaSource::classify(raw) {
            Ok(source) => self.player.update(PlayerEvent::Open(source)),
            Err(err) => tracing::error!("Refusing to play {raw:?}: {err}"),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Player(PlayerEvent::DismissError) | Message::CloseRequested => {
                self.player.shutdown();
                iced::exit()
            }
            Message::Player(event) => {
                self.player.update(event);
                Task::none()
            }
            Message::Browser(browser::Event::Play(location)) => {
                self.open(&location);
                Task::none()
            }
            Message::Browser(event) => self.browser.update(event).map(Message::Browser),
            Message::ToggleBrowser => {
                self.show_browser = !self.show_browser;
                Task::none()
            }
            Message::BrowseFile => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .add_filter("Video", &["mp4", "mkv", "webm", "avi", "mov"])
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::FileSelected,
            ),
            Message::FileSelected(path) => {
                if let Some(path) = path {
                    let raw = path.display().to_string();
                    self.open(&raw);
                }
                Task::none()
            }
            Message::Tick => {
                self.player.update(PlayerEvent::Tick);
                Task::none()
            }
            Message::FileHovered => {
                self.hovered += 1;
                if self.hovered > 1 {
                    self.multi_drop = true;
                }
                Task::none()
            }
            Message::HoverCleared => {
                self.hovered = 0;
                self.multi_drop = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                // Dropping more than one file at once is a silent no-op; the
                // hover events counted how many are coming.
                let ignore = self.multi_drop;
                self.hovered = self.hovered.saturating_sub(1);
                if self.hovered == 0 {
                    self.multi_drop = false;
                }
                if ignore {
                    debug!("ignoring multi-file drop: {}", path.display());
                } else {
                    let raw = path.display().to_string();
                    self.open(&raw);
                }
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(std::time::Duration::from_millis(200)).map(|_| Message::Tick),
            iced::event::listen_with(|event, _status, _window| match event {
                iced::Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
                iced::Event::Window(window::Event::FilesHoveredLeft) => {
                    Some(Message::HoverCleared)
                }
                iced::Event::Window(window::Event::FileDropped(path)) => {
                    Some(Message::FileDropped(path))
                }
                iced::Event::Window(window::Event::CloseRequested) => {
                    Some(Message::CloseRequested)
                }
                _ => None,
            }),
        ])
    }

    fn view(&self) -> Element<Message> {
        let toolbar = Row::new()
            .spacing(8)
            .padding(8)
            .push(
                Button::new(icons::folder(14.0, None))
                    .on_press(Message::BrowseFile)
                    .style(secondary_button),
            )
            .push(
                Button::new(icons::search(14.0, None))
                    .on_press(Message::ToggleBrowser)
                    .style(secondary_button),
            );

        let mut body = Row::new().spacing(1).push(
            container(self.player.view().map(Message::Player))
                .width(Length::Fill)
                .height(Length::Fill),
        );
        if self.show_browser {
            body = body.push(self.browser.view().map(Message::Browser));
        }

        Column::new().push(toolbar).push(body).into()
    }
}
