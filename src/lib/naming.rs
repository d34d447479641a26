//! Folder and file naming convention.
//!
//! Album folders are named `<album artist> <year>-<album>` and the tracks
//! inside them `<track> <artist> - <title>.mp3`. Everything this crate writes
//! into a tag is derived from those two names.

use thiserror::Error;

/// Length of the extension suffix removed from file names, dot included.
pub const EXTENSION_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name '{0}' is empty")]
    Empty(String),
    #[error("file name '{0}' is too short to carry an extension")]
    TooShort(String),
    #[error("folder name '{0}' has no year before the album")]
    MissingYear(String),
    #[error("file name '{0}' has no artist after the track number")]
    MissingArtist(String),
}

/// Fields taken from an album folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryInfo {
    pub album_artist: String,
    pub year: String,
    pub album: String,
}

/// Fields taken from a track file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub artist: String,
    pub title: String,
}

/// Split on `sep`, dropping empty segments at the end.
///
/// A name with a stray trailing separator (`"Title-"`) keeps its last real
/// segment. An input made only of separators yields no segments.
pub(crate) fn split_segments(s: &str, sep: char) -> Vec<&str> {
    let mut segments: Vec<&str> = s.split(sep).collect();
    while segments.last().is_some_and(|seg| seg.is_empty()) {
        segments.pop();
    }
    segments
}

/// Remove the fixed-width extension from a file name.
pub(crate) fn strip_extension(name: &str) -> Option<&str> {
    let count = name.chars().count();
    if count < EXTENSION_LEN {
        return None;
    }
    let cut = name
        .char_indices()
        .nth(count - EXTENSION_LEN)
        .map_or(name.len(), |(idx, _)| idx);
    Some(&name[..cut])
}

/// Parse `<album artist> <year>-<album>`.
pub fn parse_directory(name: &str) -> Result<DirectoryInfo, NameError> {
    let trimmed = name.trim();
    let segments = split_segments(trimmed, '-');
    let prefix = *segments
        .first()
        .ok_or_else(|| NameError::Empty(name.to_string()))?;

    // The album is everything after the first dash, dashes included.
    let album = trimmed
        .get(prefix.len() + 1..)
        .unwrap_or(prefix)
        .trim()
        .to_string();

    let prefix = prefix.trim();
    let year = split_segments(prefix, ' ')
        .last()
        .map(|token| token.trim())
        .unwrap_or_default();
    let album_artist = prefix
        .strip_suffix(year)
        .and_then(|rest| rest.strip_suffix(' '))
        .ok_or_else(|| NameError::MissingYear(name.to_string()))?
        .trim()
        .to_string();

    Ok(DirectoryInfo {
        album_artist,
        year: year.to_string(),
        album,
    })
}

/// Parse `<track> <artist> - <title>.mp3`.
///
/// The leading track token is ignored here; the written track number comes
/// from the folder ordering instead.
pub fn parse_file(name: &str) -> Result<FileInfo, NameError> {
    let stem = strip_extension(name)
        .ok_or_else(|| NameError::TooShort(name.to_string()))?
        .trim();
    let segments = split_segments(stem, '-');
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (first.trim(), last.trim()),
        _ => return Err(NameError::Empty(name.to_string())),
    };

    let artist = first
        .find(' ')
        .map(|idx| first[idx..].trim())
        .ok_or_else(|| NameError::MissingArtist(name.to_string()))?;

    Ok(FileInfo {
        artist: artist.to_string(),
        title: last.to_string(),
    })
}
