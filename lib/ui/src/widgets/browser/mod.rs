use std::sync::Arc;

use iced::alignment::Vertical;
use iced::widget::{scrollable, Button, Column, Container, Row, Text, TextInput};
use iced::{Element, Length, Task};
use tracing::error;

use pocket_video_player_common::PlayerError;
use pocket_video_player_core::search::{SearchHit, SearchPanel, SearchProvider};

use super::player::icons;
use super::player::theme::{
    panel_container, primary_button, search_input, secondary_button, suggestion_button,
    text_accent, text_style, text_time,
};

/// The search side panel: a query box with mixed suggestions on top of the
/// partitioned result lists.
///
/// The panel state machine lives in the core crate; this component only
/// renders it and runs the provider calls as background tasks. Picking a
/// playable hit emits [`Event::Play`], which the application routes to the
/// player.
pub struct Browser {
    panel: SearchPanel,
    provider: Arc<dyn SearchProvider + Send + Sync>,
}

#[derive(Clone, Debug)]
pub enum Event {
    InputChanged(String),
    Submit,
    PickSuggestion(String),
    SuggestionsLoaded(String, Result<Vec<String>, String>),
    SearchLoaded(String, Result<Vec<SearchHit>, String>),
    /// Bubbles up to the application with the location to play.
    Play(String),
}

impl Browser {
    pub fn new(panel: SearchPanel, provider: Arc<dyn SearchProvider + Send + Sync>) -> Self {
        Self { panel, provider }
    }

    pub fn panel(&self) -> &SearchPanel {
        &self.panel
    }

    pub fn update(&mut self, message: Event) -> Task<Event> {
        match message {
            Event::InputChanged(text) => {
                self.panel.input_changed(text);
                if let Some(prefix) = self.panel.begin_suggest() {
                    let provider = self.provider.clone();
                    let fetched = prefix.clone();
                    return Task::perform(
                        async move { provider.suggest(&fetched).map_err(|err| err.to_string()) },
                        move |outcome| Event::SuggestionsLoaded(prefix.clone(), outcome),
                    );
                }
                Task::none()
            }
            Event::Submit => {
                if let Some(query) = self.panel.begin_search() {
                    let provider = self.provider.clone();
                    let running = query.clone();
                    return Task::perform(
                        async move { provider.search(&running).map_err(|err| err.to_string()) },
                        move |outcome| Event::SearchLoaded(query.clone(), outcome),
                    );
                }
                Task::none()
            }
            Event::PickSuggestion(suggestion) => {
                self.panel.input_changed(suggestion);
                Task::none()
            }
            Event::SuggestionsLoaded(prefix, outcome) => {
                self.panel
                    .apply_suggestions(&prefix, outcome.map_err(PlayerError::Search));
                Task::none()
            }
            Event::SearchLoaded(query, outcome) => {
                if let Err(err) = self
                    .panel
                    .finish_search(&query, outcome.map_err(PlayerError::Search))
                {
                    error!("Failed to record search history: {err}");
                }
                Task::none()
            }
            // Consumed by the application.
            Event::Play(_) => Task::none(),
        }
    }

    pub fn view(&self) -> Element<Event> {
        let input = TextInput::new("Search the library...", self.panel.query())
            .on_input(Event::InputChanged)
            .on_submit(Event::Submit)
            .style(search_input);

        let search_button = Button::new(icons::search(14.0, None))
            .on_press_maybe((!self.panel.is_searching()).then_some(Event::Submit))
            .style(primary_button);

        let mut content = Column::new()
            .spacing(10)
            .padding(10)
            .push(Row::new().spacing(8).push(input).push(search_button));

        if self.panel.is_searching() {
            content = content.push(Text::new("Searching...").style(text_time));
        }

        if !self.panel.suggestions().is_empty() {
            let mut list = Column::new().spacing(2);
            for suggestion in self.panel.suggestions() {
                list = list.push(
                    Button::new(Text::new(suggestion.as_str()).size(13))
                        .on_press(Event::PickSuggestion(suggestion.clone()))
                        .style(suggestion_button)
                        .width(Length::Fill),
                );
            }
            content = content.push(list);
        }

        let mut results = Column::new().spacing(6);
        if !self.panel.videos().is_empty() {
            results = results.push(Text::new("Videos").size(15).style(text_accent));
            for hit in self.panel.videos() {
                results = results.push(self.hit_row(hit));
            }
        }
        if !self.panel.channels().is_empty() {
            results = results.push(Text::new("Channels").size(15).style(text_accent));
            for hit in self.panel.channels() {
                results = results.push(self.hit_row(hit));
            }
        }
        if !self.panel.playlists().is_empty() {
            results = results.push(Text::new("Playlists").size(15).style(text_accent));
            for hit in self.panel.playlists() {
                results = results.push(self.hit_row(hit));
            }
        }

        content = content.push(scrollable(results).height(Length::Fill));

        Container::new(content)
            .width(320.0)
            .height(Length::Fill)
            .style(panel_container)
            .into()
    }

    fn hit_row<'a>(&'a self, hit: &'a SearchHit) -> Element<'a, Event> {
        let mut row = Row::new().spacing(8).align_y(Vertical::Center).push(
            Column::new()
                .push(Text::new(hit.title.as_str()).size(14).style(text_style))
                .push(Text::new(hit.detail.as_str()).size(11).style(text_time))
                .width(Length::Fill),
        );
        if hit.location.is_some() {
            row = row.push(
                Button::new(icons::play(12.0, None))
                    .on_press_maybe(hit.location.clone().map(Event::Play))
                    .style(secondary_button),
            );
        }
        row.into()
    }
}
