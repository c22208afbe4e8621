use indexmap::IndexSet;
use tracing::{debug, error};

use pocket_video_player_common::PlayerError;

use super::history::SearchHistory;
use super::{HitKind, SearchHit};

/// How many history entries lead the mixed suggestion list.
pub const HISTORY_SUGGESTIONS: usize = 3;
/// Upper bound on the mixed suggestion list.
pub const MAX_SUGGESTIONS: usize = 10;

/// State machine behind the search panel.
///
/// Owns the history store, the live query, the busy flag and the partitioned
/// results. The UI layer runs the provider calls; this type only decides
/// when a call may start and folds its outcome back in. A search in flight
/// cannot be aborted; new requests bounce off the busy flag until the
/// outcome arrives.
pub struct SearchPanel {
    history: SearchHistory,
    query: String,
    previous_query: Option<String>,
    is_searching: bool,
    suggested_prefix: Option<String>,
    mixed: Vec<String>,
    videos: Vec<SearchHit>,
    channels: Vec<SearchHit>,
    playlists: Vec<SearchHit>,
}

impl SearchPanel {
    pub fn new(history: SearchHistory) -> Self {
        let mixed = history.entries().to_vec();
        Self {
            history,
            query: String::new(),
            previous_query: None,
            is_searching: false,
            suggested_prefix: None,
            mixed,
            videos: Vec::new(),
            channels: Vec::new(),
            playlists: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Mixed suggestion list: recent history first, provider fill behind.
    pub fn suggestions(&self) -> &[String] {
        &self.mixed
    }

    pub fn videos(&self) -> &[SearchHit] {
        &self.videos
    }

    pub fn channels(&self) -> &[SearchHit] {
        &self.channels
    }

    pub fn playlists(&self) -> &[SearchHit] {
        &self.playlists
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// The user edited the query. A blank query shows the plain history.
    pub fn input_changed(&mut self, text: String) {
        self.query = text;
        if self.query.trim().is_empty() {
            self.mixed = self.history.entries().to_vec();
        }
    }

    /// Returns the prefix to fetch suggestions for, or `None` when nothing
    /// should be fetched (blank query, or same prefix as the last fetch).
    pub fn begin_suggest(&mut self) -> Option<String> {
        if self.query.trim().is_empty() {
            return None;
        }
        if self.suggested_prefix.as_deref() == Some(self.query.as_str()) {
            return None;
        }
        self.suggested_prefix = Some(self.query.clone());
        Some(self.query.clone())
    }

    /// Folds a finished suggestion fetch into the mixed list.
    ///
    /// Stale responses (the query moved on) and failures leave the current
    /// list alone.
    pub fn apply_suggestions(&mut self, prefix: &str, outcome: Result<Vec<String>, PlayerError>) {
        if prefix != self.query {
            debug!("dropping stale suggestions for {prefix:?}");
            return;
        }
        let suggestions = match outcome {
            Ok(suggestions) => suggestions,
            Err(err) => {
                error!("suggestion fetch failed: {err}");
                return;
            }
        };

        if self.history.is_empty() {
            self.mixed = suggestions;
            return;
        }

        let needle = prefix.to_lowercase();
        let mut mixed: IndexSet<String> = self
            .history
            .entries()
            .iter()
            .filter(|entry| entry.starts_with(&needle))
            .take(HISTORY_SUGGESTIONS)
            .cloned()
            .collect();
        for suggestion in suggestions {
            if mixed.len() >= MAX_SUGGESTIONS {
                break;
            }
            if mixed.contains(suggestion.to_lowercase().as_str()) {
                continue;
            }
            mixed.insert(suggestion);
        }
        self.mixed = mixed.into_iter().collect();
    }

    /// Arms a search and hands back the query to run, or `None` while the
    /// guard holds: a search already in flight, a blank query, or the same
    /// query as the last completed search.
    pub fn begin_search(&mut self) -> Option<String> {
        if self.is_searching
            || self.query.trim().is_empty()
            || self.previous_query.as_deref() == Some(self.query.as_str())
        {
            return None;
        }
        self.is_searching = true;
        Some(self.query.clone())
    }

    /// Folds a finished search back in.
    ///
    /// Success records the query in the history and partitions the hits by
    /// kind; failure is logged and only drops the busy flag. The error
    /// returned here is a history-write failure, not a search failure.
    pub fn finish_search(
        &mut self,
        query: &str,
        outcome: Result<Vec<SearchHit>, PlayerError>,
    ) -> Result<(), PlayerError> {
        self.is_searching = false;

        let hits = match outcome {
            Ok(hits) => hits,
            Err(err) => {
                error!("search for {query:?} failed: {err}");
                return Ok(());
            }
        };

        self.previous_query = Some(query.to_string());
        self.history.append(query)?;

        self.videos.clear();
        self.channels.clear();
        self.playlists.clear();
        for hit in hits {
            match hit.kind {
                HitKind::Video => self.videos.push(hit),
                HitKind::Channel => self.channels.push(hit),
                HitKind::Playlist => self.playlists.push(hit),
            }
        }

        self.mixed = self.history.entries().to_vec();
        Ok(())
    }
}
