//! Writing downloaded subtitles to disk.

use std::path::{Path, PathBuf};

use crate::error::{ApiError, Result};

/// Reduces a server-suggested file name to its final path component.
///
/// Falls back to `subtitle_<file_id>.srt` when the suggestion is absent, empty,
/// or has no usable final component (`..`, `/`).
pub fn sanitize_file_name(suggested: Option<&str>, file_id: u64) -> String {
    suggested
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .and_then(|name| {
            // Split on both separators so a Windows-style name is handled on Unix too.
            name.rsplit(['/', '\\']).next().map(str::to_owned)
        })
        .filter(|name| !name.is_empty() && name != "." && name != "..")
        .unwrap_or_else(|| format!("subtitle_{file_id}.srt"))
}

/// Creates `dir` and its parents if they do not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| ApiError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes `bytes` to `dir/file_name`, creating `dir` if needed and overwriting
/// any existing file. Returns the full path written.
///
/// # Errors
///
/// Returns `ApiError::Io` if the directory cannot be created or the file cannot
/// be written.
pub fn save_subtitle(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).map_err(|source| ApiError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "subtitle saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_file_name(Some("Inception.srt"), 1), "Inception.srt");
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name(Some("../../etc/passwd"), 1), "passwd");
        assert_eq!(sanitize_file_name(Some("a\\b\\c.srt"), 1), "c.srt");
    }

    #[test]
    fn sanitize_falls_back_to_default_name() {
        assert_eq!(sanitize_file_name(None, 123), "subtitle_123.srt");
        assert_eq!(sanitize_file_name(Some("  "), 9), "subtitle_9.srt");
        assert_eq!(sanitize_file_name(Some("dir/"), 9), "subtitle_9.srt");
        assert_eq!(sanitize_file_name(Some(".."), 9), "subtitle_9.srt");
    }

    #[test]
    fn save_creates_directory_and_overwrites() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("subs");

        let first = save_subtitle(&dir, "a.srt", b"old").unwrap();
        let second = save_subtitle(&dir, "a.srt", b"new").unwrap();

        assert_eq!(first, dir.join("a.srt"));
        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"new");
    }

    #[test]
    fn save_into_a_file_path_is_an_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let err = save_subtitle(&blocker, "a.srt", b"data").unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }
}
