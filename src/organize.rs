//! Destination path planning.
//!
//! Computes each track's destination relative path under the chosen policy.
//! Pure string work: no filesystem access, `/` as the separator on every
//! host, and every interpolated field is already sanitized.

use crate::library::TrackList;
use crate::tags::UNKNOWN_ARTIST;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OrganizeMode {
    /// Destination = sanitized filename, unchanged.
    #[default]
    None,
    /// `{artist}/{title}{ext}`
    Artist,
    /// `{artist}/{album}/{NN} - {title}{ext}`
    Album,
    /// `{title}{ext}`
    Flat,
    /// `{genre}/{artist}/{title}{ext}`
    GenreArtist,
}

/// Ceiling on a computed destination path. Longer results are cut on a
/// `char` boundary, never reported as errors.
const OUT_PATH_MAX: usize = 1024;

/// Extension from the original filename, with the dot; `.mp3` when absent.
fn extension_of(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) => &filename[pos..],
        None => ".mp3",
    }
}

fn clamp(path: String) -> String {
    if path.chars().count() > OUT_PATH_MAX {
        path.chars().take(OUT_PATH_MAX).collect()
    } else {
        path
    }
}

/// Compute every track's destination relative path.
pub fn plan(list: &mut TrackList, mode: OrganizeMode, group_by_format: bool) {
    for t in list.iter_mut() {
        let ext = extension_of(&t.filename);

        let mut out = match mode {
            OrganizeMode::None => t.filename.clone(),
            OrganizeMode::Artist => format!("{}/{}{}", t.artist, t.title, ext),
            OrganizeMode::Album => format!(
                "{}/{}/{:02} - {}{}",
                t.artist, t.album, t.track_no, t.title, ext
            ),
            OrganizeMode::Flat => format!("{}{}", t.title, ext),
            OrganizeMode::GenreArtist => format!(
                "{}/{}/{}{}",
                if t.genre.is_empty() { "Unknown" } else { &t.genre },
                if t.artist.is_empty() { UNKNOWN_ARTIST } else { &t.artist },
                t.title,
                ext
            ),
        };

        if group_by_format {
            out = format!("{}/{}", t.format.name(), out);
        }
        t.out_path = clamp(out);
    }
}

/// Prepend a 3-digit, 1-based sequence number in list order. Applied last,
/// after format grouping.
pub fn apply_prefix(list: &mut TrackList) {
    for (i, t) in list.iter_mut().enumerate() {
        t.out_path = clamp(format!("{:03}_{}", i + 1, t.out_path));
    }
}
