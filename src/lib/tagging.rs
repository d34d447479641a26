use crate::metadata::{TagField, TagHandle, TagStore};
use crate::naming;
use crate::utils;
use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::info;

/// Everything written into the tag of one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMetadata {
    pub artist: String,
    pub year: String,
    pub album: String,
    pub album_artist: String,
    pub title: String,
    pub track: u32,
}

impl ParsedMetadata {
    /// Field values in the order they are written.
    pub fn fields(&self) -> [(TagField, String); 6] {
        [
            (TagField::Artist, self.artist.clone()),
            (TagField::Year, self.year.clone()),
            (TagField::Album, self.album.clone()),
            (TagField::Title, self.title.clone()),
            (TagField::AlbumArtist, self.album_artist.clone()),
            (TagField::TrackNumber, self.track.to_string()),
        ]
    }
}

/// Derive the tag values of `file_path` from its own name and its folder's.
///
/// `track` is the position of the file in its folder, not the number
/// written in the file name.
pub fn parse_metadata(file_path: &Path, track: u32) -> Result<ParsedMetadata> {
    let dir_name = utils::parent_name(file_path).ok_or_else(|| {
        anyhow!("File '{}' has no parent directory", file_path.display())
    })?;
    let file_name = utils::file_name(file_path)
        .ok_or_else(|| anyhow!("Path '{}' has no file name", file_path.display()))?;

    let dir = naming::parse_directory(&dir_name)?;
    let file = naming::parse_file(&file_name)?;

    Ok(ParsedMetadata {
        artist: file.artist,
        year: dir.year,
        album: dir.album,
        album_artist: dir.album_artist,
        title: file.title,
        track,
    })
}

/// Write the inferred artist, album, year, title and track into one file.
pub fn apply_tags<S: TagStore>(file_path: &Path, track: u32, store: &S) -> Result<ParsedMetadata> {
    info!("Processing file [{}]", file_path.display());

    let metadata = parse_metadata(file_path, track)?;

    let mut handle = store.read_tags(file_path)?;
    if !handle.has_tag() {
        store.create_default_tags(&mut handle)?;
    }

    for (field, value) in metadata.fields() {
        store.set_field(&mut handle, field, &value);
    }

    store.persist(handle)?;

    info!(
        "Tagged [{}] as track {} '{}' by {}",
        file_path.display(),
        metadata.track,
        metadata.title,
        metadata.artist
    );
    Ok(metadata)
}
