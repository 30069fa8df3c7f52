//! Export collaborator: byte-for-byte copies of the curated set.
//!
//! Copies every non-duplicate track to `<dest>/<destination relative path>`,
//! creating directories as needed. Per-file failures are warnings; the count
//! of successful copies comes back to the caller.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::library::TrackList;

pub fn export(list: &TrackList, dest: &Path) -> usize {
    let mut copied = 0;
    for t in list.iter() {
        if t.duplicate {
            continue;
        }
        let rel = if t.out_path.is_empty() {
            &t.filename
        } else {
            &t.out_path
        };
        let target = dest.join(rel);

        let result = target
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|()| fs::copy(&t.path, &target));

        match result {
            Ok(_) => copied += 1,
            Err(err) => warn!("failed to copy {}: {err}", t.filename),
        }
    }
    copied
}
