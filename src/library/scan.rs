use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::fingerprint::fingerprint_file;
use crate::format::AudioFormat;
use crate::tags;

use super::model::{AudioTrack, TrackList};

#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Ceiling on the number of tracks collected.
    pub max_tracks: usize,
    /// Directory levels below the root to descend into.
    pub max_depth: usize,
    pub follow_links: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_tracks: 20_000,
            max_depth: 16,
            follow_links: true,
        }
    }
}

/// Path relative to the scan root, `/`-separated regardless of host OS.
/// Falls back to the bare filename when the root prefix does not apply
/// (symlinked entries can escape it).
fn relative_path(root: &Path, path: &Path, filename: &str) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => {
            let parts: Vec<&str> = rel
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect();
            if parts.is_empty() {
                filename.to_string()
            } else {
                parts.join("/")
            }
        }
        Err(_) => filename.to_string(),
    }
}

/// Best-effort tag and duration read. A file lofty cannot parse keeps its
/// zero duration and empty tags; filename inference fills those afterwards.
fn read_tags(path: &Path, t: &mut AudioTrack) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return;
    };
    t.duration_secs = tagged.properties().duration().as_secs();

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
            let v = v.trim();
            if !v.is_empty() {
                t.title = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
            let v = v.trim();
            if !v.is_empty() {
                t.artist = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
            let v = v.trim();
            if !v.is_empty() {
                t.album = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::Genre) {
            let v = v.trim();
            if !v.is_empty() {
                t.genre = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::TrackNumber) {
            if let Ok(n) = v.trim().parse::<u32>() {
                t.track_no = n;
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::Year) {
            if let Ok(y) = v.trim().parse::<u32>() {
                t.year = y;
            }
        }
    }
}

/// Fingerprint the track's file. A read failure degrades dedupe precision
/// for this one file instead of aborting the scan: the fingerprint stays
/// zero and the track carries a warning.
pub(super) fn fingerprint_track(track: &mut AudioTrack) {
    match fingerprint_file(&track.path) {
        Ok(hash) => track.fingerprint = hash,
        Err(err) => {
            warn!("cannot fingerprint {}: {err}", track.path.display());
            track.warning_count += 1;
            track.fingerprint = 0;
        }
    }
}

/// Walk `root` and build one record per audio file.
///
/// Every returned record already has non-empty artist / title / album /
/// genre: real tags when readable, filename inference otherwise. An
/// unreadable subdirectory is skipped with a warning; an unopenable root is
/// the one fatal error.
pub fn scan(root: &Path, settings: &ScanSettings) -> Result<TrackList> {
    std::fs::read_dir(root).map_err(|source| Error::ScanRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut list = TrackList::with_limit(settings.max_tracks);

    // Files sit one walkdir level below the deepest directory we descend
    // into, hence the +1.
    let walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .max_depth(settings.max_depth + 1);

    for entry in walker.into_iter().filter_map(|res| match res {
        Ok(entry) => Some(entry),
        Err(err) => {
            warn!("skipping unreadable entry: {err}");
            None
        }
    }) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let format = AudioFormat::from_filename(filename);
        if !format.is_known() {
            continue;
        }

        let mut track = AudioTrack {
            path: path.to_path_buf(),
            rel_path: relative_path(root, path, filename),
            filename: filename.to_string(),
            format,
            size_bytes: entry.metadata().map(|m| m.len()).unwrap_or(0),
            ..AudioTrack::default()
        };

        fingerprint_track(&mut track);

        read_tags(path, &mut track);
        tags::fill_missing(&mut track);
        tags::standardize(&mut track);

        if !list.push(track) {
            break;
        }
    }

    Ok(list)
}
