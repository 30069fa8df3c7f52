//! Library module: the track data model, the directory scanner and the
//! duplicate marker.

mod dedupe;
mod model;
mod scan;

pub use dedupe::mark_duplicates;
pub use model::{AudioTrack, LibraryStats, TrackList};
pub use scan::{ScanSettings, scan};
