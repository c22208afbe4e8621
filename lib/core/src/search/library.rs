use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use pocket_video_player_common::PlayerError;

use super::{HitKind, SearchHit, SearchProvider};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm", "avi", "mov"];

/// Search provider backed by a local media folder.
///
/// Sits behind the same [`SearchProvider`] seam a remote backend would:
/// every video file whose name contains the query is a playable hit, and
/// file names sharing the typed prefix come back as suggestions.
pub struct LibraryProvider {
    root: PathBuf,
}

impl LibraryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn stems(&self) -> Result<Vec<(String, PathBuf)>, PlayerError> {
        let mut found = Vec::new();
        for entry in self.root.read_dir()? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !is_video(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            found.push((stem.to_string(), path));
        }
        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }
}

impl SearchProvider for LibraryProvider {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, PlayerError> {
        let needle = query.trim().to_lowercase();
        let hits = self
            .stems()?
            .into_iter()
            .filter(|(stem, _)| needle.is_empty() || stem.to_lowercase().contains(&needle))
            .map(|(stem, path)| SearchHit {
                id: stem,
                kind: HitKind::Video,
                title: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                detail: self.root.display().to_string(),
                location: Some(path.display().to_string()),
            })
            .collect();
        Ok(hits)
    }

    fn suggest(&self, prefix: &str) -> Result<Vec<String>, PlayerError> {
        let needle = prefix.trim().to_lowercase();
        let mut suggestions: Vec<String> = self
            .stems()?
            .into_iter()
            .filter(|(stem, _)| stem.to_lowercase().starts_with(&needle))
            .map(|(stem, _)| stem)
            .collect();
        suggestions.dedup();
        suggestions.truncate(10);
        Ok(suggestions)
    }
}

fn is_video(path: &Path) -> bool {
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) => VIDEO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> (tempfile::TempDir, LibraryProvider) {
        let dir = tempfile::tempdir().unwrap();
        for name in ["intro.mp4", "Holiday.MKV", "talk.webm", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let provider = LibraryProvider::new(dir.path());
        (dir, provider)
    }

    #[test]
    fn test_search_matches_name_fragment() {
        let (_dir, provider) = library();
        let hits = provider.search("holi").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Holiday.MKV");
        assert_eq!(hits[0].kind, HitKind::Video);
        assert!(hits[0].location.is_some());
    }

    #[test]
    fn test_blank_search_lists_all_videos() {
        let (_dir, provider) = library();
        let hits = provider.search("").unwrap();
        let titles: Vec<&str> = hits.iter().map(|hit| hit.title.as_str()).collect();
        assert_eq!(titles, ["Holiday.MKV", "intro.mp4", "talk.webm"]);
    }

    #[test]
    fn test_non_video_files_are_ignored() {
        let (_dir, provider) = library();
        let hits = provider.search("notes").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_suggest_uses_prefix() {
        let (_dir, provider) = library();
        assert_eq!(provider.suggest("in").unwrap(), ["intro"]);
        assert!(provider.suggest("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let provider = LibraryProvider::new("/no/such/folder");
        assert!(provider.search("x").is_err());
    }
}
