use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use pocket_video_player_common::PlayerError;

/// Separator between entries in the backing file.
pub const DELIMITER: char = ';';

/// Append-only store of past search queries.
///
/// The whole file is one `;`-joined blob, oldest entry first; reads surface
/// the newest entry first. Queries are lowercased before they are written
/// and never written twice. The delimiter is not escaped, so a query that
/// contains `;` will split into several entries on the next load; that quirk
/// is part of the format.
#[derive(Debug)]
pub struct SearchHistory {
    path: PathBuf,
    entries: Vec<String>,
}

impl SearchHistory {
    /// Opens the store, creating an empty file when none exists.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PlayerError> {
        let path = path.into();
        if !path.exists() {
            File::create(&path)?;
        }
        let mut history = Self {
            path,
            entries: Vec::new(),
        };
        history.reload()?;
        Ok(history)
    }

    fn reload(&mut self) -> Result<(), PlayerError> {
        let blob = std::fs::read_to_string(&self.path)?;
        self.entries = blob
            .split(DELIMITER)
            .filter(|token| !token.trim().is_empty())
            .rev()
            .map(|token| token.to_string())
            .collect();
        Ok(())
    }

    /// Stored queries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.iter().any(|entry| entry == query)
    }

    /// Records a query.
    ///
    /// Blank queries and queries already present (after lowercasing) are a
    /// no-op. A write failure leaves the in-memory list untouched.
    pub fn append(&mut self, query: &str) -> Result<(), PlayerError> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() || self.contains(&normalized) {
            return Ok(());
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        write!(file, "{normalized}{DELIMITER}")?;
        self.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(dir: &tempfile::TempDir) -> SearchHistory {
        SearchHistory::load(dir.path().join("searches")).unwrap()
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("searches");
        let history = SearchHistory::load(&path).unwrap();
        assert!(history.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_entries_are_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = open(&dir);
        history.append("foo").unwrap();
        history.append("bar").unwrap();
        assert_eq!(history.entries(), ["bar", "foo"]);
    }

    #[test]
    fn test_append_is_idempotent_under_case() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = open(&dir);
        history.append("Rust Tutorials").unwrap();
        history.append("rust tutorials").unwrap();
        history.append("RUST TUTORIALS").unwrap();
        assert_eq!(history.entries(), ["rust tutorials"]);
    }

    #[test]
    fn test_blank_queries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = open(&dir);
        history.append("   ").unwrap();
        history.append("").unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut history = open(&dir);
            history.append("foo").unwrap();
            history.append("bar").unwrap();
        }
        let history = open(&dir);
        assert_eq!(history.entries(), ["bar", "foo"]);
    }

    #[test]
    fn test_delimiter_inside_query_splits_on_reload() {
        // Known format defect: the delimiter is stored unescaped.
        let dir = tempfile::tempdir().unwrap();
        let mut history = open(&dir);
        history.append("cats;dogs").unwrap();
        assert_eq!(history.entries(), ["dogs", "cats"]);
    }
}
