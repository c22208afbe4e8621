use pocket_video_player_common::PlayerError;

pub mod history;
pub mod library;
pub mod panel;

pub use history::SearchHistory;
pub use library::LibraryProvider;
pub use panel::SearchPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Video,
    Channel,
    Playlist,
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub kind: HitKind,
    pub title: String,
    /// Secondary display line (author, folder, size...).
    pub detail: String,
    /// Location the engine can play, when the hit is playable.
    pub location: Option<String>,
}

/// Where search results and type-ahead suggestions come from.
///
/// Both calls may block on the backing service and may fail; the panel
/// guards re-entry with its busy flag and never retries.
pub trait SearchProvider {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, PlayerError>;
    fn suggest(&self, prefix: &str) -> Result<Vec<String>, PlayerError>;
}
