//! # mp3tagger Core Library
//!
//! Infers artist, album, year, title and track number from an
//! `<album artist> <year>-<album>/<track> <artist> - <title>.mp3` folder
//! layout and writes them into each file's tags.

pub mod directory;
pub mod metadata;
pub mod naming;
pub mod ordering;
pub mod tagging;
pub mod utils;

pub use directory::{tag_tree, EntryOutcome, WalkReport};
pub use metadata::{DryRunStore, LoftyStore, TagField, TagHandle, TagStore};
pub use naming::{DirectoryInfo, FileInfo, NameError};
pub use tagging::{apply_tags, ParsedMetadata};
