//! Tag inference and standardization.
//!
//! When a file carries no usable tags, artist and title come from the
//! filename (`Artist - Title.ext`); everything else gets a documented
//! default. Total functions: they only ever fill fields, never fail.

use crate::library::AudioTrack;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const DEFAULT_ALBUM: &str = "Singles";
pub const DEFAULT_GENRE: &str = "Unknown";
pub const DEFAULT_YEAR: u32 = 2000;
pub const DEFAULT_TRACK_NO: u32 = 1;

/// Split a filename stem on the first `" - "` separator.
fn split_artist_title(stem: &str) -> (Option<&str>, &str) {
    match stem.split_once(" - ") {
        Some((artist, title)) => (Some(artist), title),
        None => (None, stem),
    }
}

fn stem_of(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => filename,
    }
}

/// Fill any unset tag fields from the (already sanitized) filename.
///
/// Fields that already hold a value (typically read from the file's real
/// tags) are left alone.
pub fn fill_missing(t: &mut AudioTrack) {
    if t.artist.is_empty() || t.title.is_empty() {
        let (artist, title) = split_artist_title(stem_of(&t.filename));
        if t.artist.is_empty() {
            t.artist = artist.unwrap_or(UNKNOWN_ARTIST).to_string();
        }
        if t.title.is_empty() {
            t.title = title.to_string();
        }
    }
    apply_defaults(t);
}

/// Re-derive artist and title from the filename unconditionally, discarding
/// whatever tags were read. Backs `--fix-tags`.
pub fn rewrite_from_filename(t: &mut AudioTrack) {
    let (artist, title) = split_artist_title(stem_of(&t.filename));
    t.artist = artist.unwrap_or(UNKNOWN_ARTIST).to_string();
    t.title = title.to_string();
    apply_defaults(t);
}

fn apply_defaults(t: &mut AudioTrack) {
    if t.album.is_empty() {
        t.album = DEFAULT_ALBUM.to_string();
    }
    if t.genre.is_empty() {
        t.genre = DEFAULT_GENRE.to_string();
    }
    if t.year == 0 {
        t.year = DEFAULT_YEAR;
    }
    if t.track_no == 0 {
        t.track_no = DEFAULT_TRACK_NO;
    }
}

/// Uppercase the first character and every character after a space.
///
/// Deliberately lightweight: acronyms and words that are already capitalized
/// pass through unchanged, and no grammar rules apply.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upcase_next = true;
    for c in s.chars() {
        if upcase_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upcase_next = c == ' ';
    }
    out
}

/// Title-case artist and title in place.
pub fn standardize(t: &mut AudioTrack) {
    t.artist = title_case(&t.artist);
    t.title = title_case(&t.title);
}
