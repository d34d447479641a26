use std::path::{Path, PathBuf};

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Final component of `path`, lossily converted to UTF-8.
pub fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Name of the directory holding `path`.
pub fn parent_name(path: &Path) -> Option<String> {
    path.parent().and_then(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("/srv/music"), PathBuf::from("/srv/music"));
        assert!(expand_path("~/Music").ends_with("Music"));
    }

    #[test]
    fn test_file_and_parent_names() {
        let path = Path::new("/music/Artist 2000-Album/01 Artist - Song.mp3");
        assert_eq!(file_name(path).as_deref(), Some("01 Artist - Song.mp3"));
        assert_eq!(parent_name(path).as_deref(), Some("Artist 2000-Album"));
        assert_eq!(parent_name(Path::new("/")), None);
        assert_eq!(parent_name(Path::new("song.mp3")), None);
    }
}
