//! Read-only previews, diagnostics and stats rendering.
//!
//! Everything here operates on copies or borrows; the canonical track list
//! is never reordered or mutated. The front end decides how the returned
//! data reaches the user.

use crate::library::{AudioTrack, LibraryStats, TrackList};
use crate::sanitize::LIMITED_NAME_MAX;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SimulateMode {
    /// Sort by (artist, title).
    Generic,
    /// Sort by destination path, the way a FAT head unit walks the drive.
    Fat,
    /// Sort by destination path / filename.
    Filename,
}

/// One line of the ordering preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// 1-based position after duplicates are filtered out.
    pub position: usize,
    pub artist: String,
    pub title: String,
}

fn sort_key(t: &AudioTrack) -> &str {
    if t.out_path.is_empty() {
        &t.filename
    } else {
        &t.out_path
    }
}

/// Produce the playback-order preview for a simulate mode. Duplicates are
/// excluded from both the entries and the positions.
pub fn preview(list: &TrackList, mode: SimulateMode) -> Vec<PreviewEntry> {
    let mut sorted: Vec<&AudioTrack> = list.iter().collect();
    match mode {
        SimulateMode::Generic => {
            sorted.sort_by(|a, b| (&a.artist, &a.title).cmp(&(&b.artist, &b.title)));
        }
        SimulateMode::Fat | SimulateMode::Filename => {
            sorted.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
        }
    }

    sorted
        .into_iter()
        .filter(|t| !t.duplicate)
        .enumerate()
        .map(|(i, t)| PreviewEntry {
            position: i + 1,
            artist: t.artist.clone(),
            title: t.title.clone(),
        })
        .collect()
}

/// Per-track warning lines: long names, reserved characters, missing tags.
/// Duplicates are skipped; they never reach the export.
pub fn diagnostics(list: &TrackList) -> Vec<String> {
    let mut warnings = Vec::new();
    for t in list.iter() {
        if t.duplicate {
            continue;
        }
        if t.filename.chars().count() > LIMITED_NAME_MAX {
            warnings.push(format!("long filename: {}", t.filename));
        }
        if t.filename.contains(['<', '>', ':', '\\', '|', '?', '*', '"']) {
            warnings.push(format!("reserved characters: {}", t.filename));
        }
        if t.artist.is_empty() || t.title.is_empty() {
            warnings.push(format!("missing tags: {}", t.filename));
        }
    }
    warnings
}

/// Render the end-of-run stats block.
pub fn stats_lines(stats: &LibraryStats) -> Vec<String> {
    let names = ["MP3", "FLAC", "WAV", "AAC", "M4A", "OGG", "WMA"];
    let formats = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{name}({})", stats.format_count[i + 1]))
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        format!("Tracks: {}", stats.total_tracks),
        format!("Duration: {}s", stats.total_duration_secs),
        format!("Formats: {formats}"),
        format!("Duplicates removed: {}", stats.removed_duplicates),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(artist: &str, title: &str, out_path: &str) -> AudioTrack {
        AudioTrack {
            artist: artist.to_string(),
            title: title.to_string(),
            filename: format!("{title}.mp3"),
            out_path: out_path.to_string(),
            ..AudioTrack::default()
        }
    }

    fn list_of(tracks: Vec<AudioTrack>) -> TrackList {
        let mut list = TrackList::with_limit(tracks.len());
        for t in tracks {
            list.push(t);
        }
        list
    }

    #[test]
    fn generic_preview_sorts_by_artist_then_title() {
        let list = list_of(vec![
            named("Zed", "Alpha", ""),
            named("Abba", "Zoo", ""),
            named("Abba", "Arrival", ""),
        ]);
        let rows = preview(&list, SimulateMode::Generic);
        let order: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(order, vec!["Arrival", "Zoo", "Alpha"]);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[2].position, 3);
    }

    #[test]
    fn filename_preview_sorts_by_destination_path() {
        let list = list_of(vec![
            named("A", "x", "b/2.mp3"),
            named("B", "y", "a/1.mp3"),
        ]);
        let rows = preview(&list, SimulateMode::Filename);
        assert_eq!(rows[0].artist, "B");
        assert_eq!(rows[1].artist, "A");
    }

    #[test]
    fn preview_falls_back_to_filename_without_a_destination() {
        let list = list_of(vec![named("A", "b-song", ""), named("B", "a-song", "")]);
        let rows = preview(&list, SimulateMode::Fat);
        assert_eq!(rows[0].artist, "B");
    }

    #[test]
    fn preview_excludes_duplicates_from_entries_and_positions() {
        let mut dup = named("Abba", "Arrival", "");
        dup.duplicate = true;
        let list = list_of(vec![dup, named("Abba", "Zoo", ""), named("Zed", "Alpha", "")]);

        let rows = preview(&list, SimulateMode::Generic);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Zoo");
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].position, 2);
    }

    #[test]
    fn preview_leaves_the_list_untouched() {
        let list = list_of(vec![named("Zed", "Alpha", ""), named("Abba", "Zoo", "")]);
        let _ = preview(&list, SimulateMode::Generic);
        assert_eq!(list.iter().next().unwrap().artist, "Zed");
    }

    #[test]
    fn diagnostics_flag_long_names_and_missing_tags() {
        let mut long = named("A", "t", "");
        long.filename = "x".repeat(70);
        let mut untagged = named("", "", "");
        untagged.filename = "bare.mp3".to_string();
        let mut dup = named("", "", "");
        dup.duplicate = true;

        let list = list_of(vec![long, untagged, dup]);
        let warnings = diagnostics(&list);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("long filename:"));
        assert!(warnings[1].starts_with("missing tags:"));
    }

    #[test]
    fn stats_lines_follow_the_format_table_order() {
        let mut stats = LibraryStats::default();
        stats.total_tracks = 3;
        stats.total_duration_secs = 360;
        stats.removed_duplicates = 1;
        stats.format_count[1] = 2; // MP3
        stats.format_count[2] = 1; // FLAC

        let lines = stats_lines(&stats);
        assert_eq!(lines[0], "Tracks: 3");
        assert_eq!(lines[1], "Duration: 360s");
        assert_eq!(
            lines[2],
            "Formats: MP3(2) FLAC(1) WAV(0) AAC(0) M4A(0) OGG(0) WMA(0)"
        );
        assert_eq!(lines[3], "Duplicates removed: 1");
    }
}
