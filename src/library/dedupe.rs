use super::model::{LibraryStats, TrackList};

/// Mark later occurrences of content-identical tracks as duplicates.
///
/// Identity is the (fingerprint, size) pair; both must match. The first
/// occurrence in list order always stays canonical. Quadratic over a list
/// bounded by the scan ceiling, which keeps the first-wins tie-break
/// structurally obvious.
pub fn mark_duplicates(list: &mut TrackList, stats: &mut LibraryStats) {
    let tracks = list.as_mut_slice();
    for i in 0..tracks.len() {
        if tracks[i].duplicate {
            continue;
        }
        let (fingerprint, size) = (tracks[i].fingerprint, tracks[i].size_bytes);
        for j in (i + 1)..tracks.len() {
            if tracks[j].duplicate {
                continue;
            }
            if tracks[j].fingerprint == fingerprint && tracks[j].size_bytes == size {
                tracks[j].duplicate = true;
                stats.removed_duplicates += 1;
            }
        }
    }
}
