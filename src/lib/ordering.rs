use crate::naming::{split_segments, strip_extension};
use std::cmp::Ordering;
use tracing::warn;

/// Key given to names without a leading track number; sorts them last.
pub const UNKNOWN_TRACK_KEY: f64 = f64::MAX;

/// Numeric sort key from the leading token of `<track> <artist> - <title>.mp3`.
pub fn sort_key(name: &str) -> f64 {
    let parsed = strip_extension(name).and_then(|stem| {
        let first = *split_segments(stem.trim(), '-').first()?;
        let token = *split_segments(first.trim(), ' ').first()?;
        token.trim().parse::<f64>().ok()
    });

    match parsed {
        Some(key) => key,
        None => {
            warn!(
                "Could not parse a track number from '{}', ordering it last",
                name
            );
            UNKNOWN_TRACK_KEY
        }
    }
}

/// Order entries by the sort key of their names.
///
/// The sort is stable: entries sharing a key, including every unparsable
/// name, keep their listing order.
pub fn sort_entries<T, F>(entries: &mut [T], name_of: F)
where
    F: Fn(&T) -> String,
{
    entries.sort_by_cached_key(|entry| TrackKey(sort_key(&name_of(entry))));
}

#[derive(Debug, Clone, Copy)]
struct TrackKey(f64);

impl PartialEq for TrackKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TrackKey {}

impl PartialOrd for TrackKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TrackKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
