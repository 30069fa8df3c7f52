use std::path::PathBuf;

use tracing::warn;

use crate::format::{AudioFormat, FORMAT_COUNT};

/// One physical audio file under consideration.
///
/// Created once per discovered file by the scanner, then mutated in place by
/// the sanitize / tag / dedupe / organize passes. Duplicates are flagged,
/// never removed from the list.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub rel_path: String,
    /// Destination relative path computed by the organizer, `/`-separated.
    pub out_path: String,
    /// Display filename (last path component).
    pub filename: String,

    pub artist: String,
    pub album: String,
    pub title: String,
    pub genre: String,
    /// 0 = unknown.
    pub track_no: u32,
    /// 0 = unknown.
    pub year: u32,

    pub format: AudioFormat,
    pub size_bytes: u64,
    /// Two-window content hash; 0 when the file could not be read.
    pub fingerprint: u64,
    /// Best-effort, 0 when the container could not be parsed.
    pub duration_secs: u64,

    pub duplicate: bool,
    pub unsupported: bool,
    pub warning_count: u32,
}

impl Default for AudioTrack {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            rel_path: String::new(),
            out_path: String::new(),
            filename: String::new(),
            artist: String::new(),
            album: String::new(),
            title: String::new(),
            genre: String::new(),
            track_no: 0,
            year: 0,
            format: AudioFormat::Unknown,
            size_bytes: 0,
            fingerprint: 0,
            duration_secs: 0,
            duplicate: false,
            unsupported: false,
            warning_count: 0,
        }
    }
}

/// Insertion-order-preserving track collection, bounded by a configured
/// ceiling so a pathological tree cannot grow it without limit. The backing
/// `Vec` grows geometrically, so pushes stay amortized O(1).
#[derive(Debug, Default)]
pub struct TrackList {
    tracks: Vec<AudioTrack>,
    max_tracks: usize,
    at_capacity_logged: bool,
}

impl TrackList {
    pub fn with_limit(max_tracks: usize) -> Self {
        Self {
            tracks: Vec::new(),
            max_tracks,
            at_capacity_logged: false,
        }
    }

    /// Append a track, refusing once the ceiling is reached. Returns whether
    /// the track was accepted.
    pub fn push(&mut self, track: AudioTrack) -> bool {
        if self.max_tracks != 0 && self.tracks.len() >= self.max_tracks {
            if !self.at_capacity_logged {
                warn!(
                    max_tracks = self.max_tracks,
                    "track limit reached, ignoring further files"
                );
                self.at_capacity_logged = true;
            }
            return false;
        }
        self.tracks.push(track);
        true
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AudioTrack> {
        self.tracks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, AudioTrack> {
        self.tracks.iter_mut()
    }

    pub fn as_slice(&self) -> &[AudioTrack] {
        &self.tracks
    }

    pub fn as_mut_slice(&mut self) -> &mut [AudioTrack] {
        &mut self.tracks
    }
}

/// Aggregate counters for one run. Accumulated after dedupe marking, then
/// read-only.
#[derive(Debug, Default, Clone)]
pub struct LibraryStats {
    /// Every scanned track, duplicates included.
    pub total_tracks: usize,
    pub removed_duplicates: usize,
    /// Sum of non-duplicate track durations, in seconds.
    pub total_duration_secs: u64,
    /// Indexed by [`AudioFormat::stats_index`].
    pub format_count: [usize; FORMAT_COUNT],
}

impl LibraryStats {
    /// Count a track into the aggregate. Duplicate tracks still show up in
    /// `total_tracks` and the format table, but not in the duration total.
    pub fn record(&mut self, track: &AudioTrack) {
        self.total_tracks += 1;
        self.format_count[track.format.stats_index()] += 1;
        if !track.duplicate {
            self.total_duration_secs += track.duration_secs;
        }
    }
}
