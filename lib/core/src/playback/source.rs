use std::path::{Path, PathBuf};

use pocket_video_player_common::PlayerError;

/// Where a piece of media comes from.
///
/// Built from whatever string a drop, a dialog or the command line hands us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Url(String),
    File(PathBuf),
}

impl MediaSource {
    /// Classifies a raw location string.
    ///
    /// `http`/`https` prefixes make a [`MediaSource::Url`]; anything that is
    /// an absolute path or names an existing file makes a
    /// [`MediaSource::File`]; the rest is refused.
    pub fn classify(raw: &str) -> Result<Self, PlayerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlayerError::UnsupportedSource(raw.to_string()));
        }

        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(MediaSource::Url(trimmed.to_string()));
        }

        let path = Path::new(trimmed);
        if path.is_absolute() || path.exists() {
            return Ok(MediaSource::File(path.to_path_buf()));
        }

        Err(PlayerError::UnsupportedSource(raw.to_string()))
    }

    /// The location string handed to the engine.
    pub fn location(&self) -> String {
        match self {
            MediaSource::Url(url) => url.clone(),
            MediaSource::File(path) => path.display().to_string(),
        }
    }

    /// Short name for window titles and logs.
    pub fn display_name(&self) -> String {
        match self {
            MediaSource::Url(url) => url.clone(),
            MediaSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_urls() {
        assert_eq!(
            MediaSource::classify("http://example.com/clip.mp4").unwrap(),
            MediaSource::Url("http://example.com/clip.mp4".to_string())
        );
        assert_eq!(
            MediaSource::classify("HTTPS://example.com/clip.mp4").unwrap(),
            MediaSource::Url("HTTPS://example.com/clip.mp4".to_string())
        );
    }

    #[test]
    fn test_classify_absolute_path() {
        match MediaSource::classify("/videos/clip.mkv").unwrap() {
            MediaSource::File(path) => assert_eq!(path, PathBuf::from("/videos/clip.mkv")),
            other => panic!("expected a file source, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_existing_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        std::fs::write(&file, b"").unwrap();

        let raw = file.display().to_string();
        assert!(matches!(
            MediaSource::classify(&raw).unwrap(),
            MediaSource::File(_)
        ));
    }

    #[test]
    fn test_classify_rejects_garbage() {
        assert!(matches!(
            MediaSource::classify("ftp://example.com/clip.mp4"),
            Err(PlayerError::UnsupportedSource(_))
        ));
        assert!(matches!(
            MediaSource::classify("   "),
            Err(PlayerError::UnsupportedSource(_))
        ));
        assert!(matches!(
            MediaSource::classify("no-such-file.mp4"),
            Err(PlayerError::UnsupportedSource(_))
        ));
    }

    #[test]
    fn test_display_name_uses_file_name() {
        let source = MediaSource::File(PathBuf::from("/videos/clip.mkv"));
        assert_eq!(source.display_name(), "clip.mkv");
    }
}
