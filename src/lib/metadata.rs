use anyhow::{Context, Result};
use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::tag::{ItemKey, Tag};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Tag fields written for every track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Artist,
    Year,
    Album,
    Title,
    AlbumArtist,
    TrackNumber,
}

impl TagField {
    pub fn item_key(self) -> ItemKey {
        match self {
            TagField::Artist => ItemKey::TrackArtist,
            TagField::Year => ItemKey::RecordingDate,
            TagField::Album => ItemKey::AlbumTitle,
            TagField::Title => ItemKey::TrackTitle,
            TagField::AlbumArtist => ItemKey::AlbumArtist,
            TagField::TrackNumber => ItemKey::TrackNumber,
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagField::Artist => "artist",
            TagField::Year => "year",
            TagField::Album => "album",
            TagField::Title => "title",
            TagField::AlbumArtist => "album artist",
            TagField::TrackNumber => "track",
        };
        f.write_str(name)
    }
}

/// An opened tag container for one file.
pub trait TagHandle {
    /// Whether the file already carried a tag when it was read.
    fn has_tag(&self) -> bool;
}

/// Read, edit and write the tag container of an audio file.
///
/// A handle is opened per file, edited in memory and consumed by
/// [`TagStore::persist`].
pub trait TagStore {
    type Handle: TagHandle;

    fn read_tags(&self, path: &Path) -> Result<Self::Handle>;
    /// Attach an empty tag of the file's default type.
    fn create_default_tags(&self, handle: &mut Self::Handle) -> Result<()>;
    fn set_field(&self, handle: &mut Self::Handle, field: TagField, value: &str);
    fn persist(&self, handle: Self::Handle) -> Result<()>;
}

/// Writes tags to disk through lofty.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyStore;

pub struct LoftyHandle {
    path: PathBuf,
    file: TaggedFile,
}

impl TagHandle for LoftyHandle {
    fn has_tag(&self) -> bool {
        self.file.primary_tag().is_some()
    }
}

fn open_tagged_file(path: &Path) -> Result<TaggedFile> {
    lofty::read_from_path(path)
        .with_context(|| format!("Failed to read tags from '{}'", path.display()))
}

impl TagStore for LoftyStore {
    type Handle = LoftyHandle;

    fn read_tags(&self, path: &Path) -> Result<LoftyHandle> {
        let file = open_tagged_file(path)?;
        Ok(LoftyHandle {
            path: path.to_path_buf(),
            file,
        })
    }

    fn create_default_tags(&self, handle: &mut LoftyHandle) -> Result<()> {
        let tag_type = handle.file.primary_tag_type();
        debug!(
            "Creating empty {:?} tag for {}",
            tag_type,
            handle.path.display()
        );
        handle.file.insert_tag(Tag::new(tag_type));
        Ok(())
    }

    fn set_field(&self, handle: &mut LoftyHandle, field: TagField, value: &str) {
        match handle.file.primary_tag_mut() {
            Some(tag) => {
                if !tag.insert_text(field.item_key(), value.to_string()) {
                    warn!(
                        "Tag of {} cannot hold the {} field, skipping it",
                        handle.path.display(),
                        field
                    );
                }
            }
            None => warn!(
                "No tag to set {} on for {}",
                field,
                handle.path.display()
            ),
        }
    }

    fn persist(&self, handle: LoftyHandle) -> Result<()> {
        handle
            .file
            .save_to_path(&handle.path, WriteOptions::default())
            .with_context(|| format!("Failed to save tags to '{}'", handle.path.display()))
    }
}

/// Reads files like [`LoftyStore`] but only logs what would be written.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunStore;

#[derive(Debug)]
pub struct DryRunHandle {
    path: PathBuf,
    has_tag: bool,
    fields: Vec<(TagField, String)>,
}

impl DryRunHandle {
    pub fn fields(&self) -> &[(TagField, String)] {
        &self.fields
    }
}

impl TagHandle for DryRunHandle {
    fn has_tag(&self) -> bool {
        self.has_tag
    }
}

impl TagStore for DryRunStore {
    type Handle = DryRunHandle;

    fn read_tags(&self, path: &Path) -> Result<DryRunHandle> {
        let file = open_tagged_file(path)?;
        Ok(DryRunHandle {
            path: path.to_path_buf(),
            has_tag: file.primary_tag().is_some(),
            fields: Vec::new(),
        })
    }

    fn create_default_tags(&self, handle: &mut DryRunHandle) -> Result<()> {
        info!("Would create an empty tag for {}", handle.path.display());
        handle.has_tag = true;
        Ok(())
    }

    fn set_field(&self, handle: &mut DryRunHandle, field: TagField, value: &str) {
        handle.fields.retain(|(existing, _)| *existing != field);
        handle.fields.push((field, value.to_string()));
    }

    fn persist(&self, handle: DryRunHandle) -> Result<()> {
        let summary = handle
            .fields
            .iter()
            .map(|(field, value)| format!("{}='{}'", field, value))
            .collect::<Vec<_>>()
            .join(", ");
        info!("Would write {}: {}", handle.path.display(), summary);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lofty::tag::Accessor;
    use std::fs;
    use tempfile::TempDir;

    /// A few silent MPEG-1 Layer III frames, enough for lofty to probe.
    pub(crate) fn silent_mp3() -> Vec<u8> {
        // 128 kbps, 44.1 kHz, no padding: 144 * 128000 / 44100 = 417 bytes.
        const FRAME_LEN: usize = 417;
        let mut data = Vec::with_capacity(FRAME_LEN * 8);
        for _ in 0..8 {
            let mut frame = vec![0u8; FRAME_LEN];
            frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
            data.extend_from_slice(&frame);
        }
        data
    }

    #[test]
    fn test_tag_field_keys() {
        assert_eq!(TagField::Artist.item_key(), ItemKey::TrackArtist);
        assert_eq!(TagField::AlbumArtist.item_key(), ItemKey::AlbumArtist);
        assert_eq!(TagField::TrackNumber.item_key(), ItemKey::TrackNumber);
        assert_eq!(TagField::AlbumArtist.to_string(), "album artist");
    }

    #[test]
    fn test_lofty_store_creates_and_writes_tag() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("01 Artist - Song.mp3");
        fs::write(&path, silent_mp3())?;

        let store = LoftyStore;
        let mut handle = store.read_tags(&path)?;
        assert!(!handle.has_tag());
        store.create_default_tags(&mut handle)?;
        assert!(handle.has_tag());
        store.set_field(&mut handle, TagField::Artist, "Artist");
        store.set_field(&mut handle, TagField::Title, "Song");
        store.set_field(&mut handle, TagField::Album, "Album");
        store.set_field(&mut handle, TagField::TrackNumber, "3");
        store.persist(handle)?;

        let tagged_file = lofty::read_from_path(&path)?;
        let tag = tagged_file.primary_tag().expect("tag was written");
        assert_eq!(tag.artist().as_deref(), Some("Artist"));
        assert_eq!(tag.title().as_deref(), Some("Song"));
        assert_eq!(tag.album().as_deref(), Some("Album"));
        assert_eq!(tag.track(), Some(3));

        Ok(())
    }

    #[test]
    fn test_lofty_store_rejects_non_audio() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("01 Artist - Notes.mp3");
        fs::write(&path, b"these are liner notes, not audio")?;

        assert!(LoftyStore.read_tags(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_dry_run_store_leaves_file_untouched() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("01 Artist - Song.mp3");
        let original = silent_mp3();
        fs::write(&path, &original)?;

        let store = DryRunStore;
        let mut handle = store.read_tags(&path)?;
        assert!(!handle.has_tag());
        store.create_default_tags(&mut handle)?;
        store.set_field(&mut handle, TagField::Title, "Draft");
        store.set_field(&mut handle, TagField::Title, "Song");
        assert_eq!(handle.fields(), &[(TagField::Title, "Song".to_string())]);
        store.persist(handle)?;

        assert_eq!(fs::read(&path)?, original);
        Ok(())
    }
}
