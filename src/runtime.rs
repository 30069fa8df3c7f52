//! The processing pipeline: one synchronous pass sequence per run.
//!
//! Order matters and is the contract: scan (with tag inference) →
//! sanitize → optional tag rewrite → conversion decision → dedupe marking →
//! organize planning → optional prefixing → stats accumulation. Each pass
//! mutates the owned track records in place; nothing here touches the
//! destination filesystem.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::Options;
use crate::config::Settings;
use crate::convert::{self, Conversion, ConvertRequest};
use crate::download;
use crate::error::Result;
use crate::library::{self, LibraryStats, ScanSettings, TrackList};
use crate::organize;
use crate::sanitize;
use crate::tags;

pub struct RunOutcome {
    pub list: TrackList,
    pub stats: LibraryStats,
}

/// Turn the CLI input into a local scan root, downloading URL inputs first.
fn resolve_input(opts: &Options, settings: &Settings) -> Result<PathBuf> {
    if download::is_url(&opts.input) {
        let dir = PathBuf::from(&settings.download.dir);
        download::fetch_audio(&opts.input, &dir)?;
        info!("downloaded {} into {}", opts.input, dir.display());
        Ok(dir)
    } else {
        Ok(PathBuf::from(&opts.input))
    }
}

pub fn run(opts: &Options, settings: &Settings) -> Result<RunOutcome> {
    let root = resolve_input(opts, settings)?;

    let scan_settings = ScanSettings {
        max_tracks: settings.scan.max_tracks,
        max_depth: settings.scan.max_depth,
        follow_links: settings.scan.follow_links,
    };
    let mut list = library::scan(&root, &scan_settings)?;
    info!(tracks = list.len(), root = %root.display(), "scan complete");

    let request = ConvertRequest {
        convert_mp3: opts.convert_mp3,
        keep_format: opts.keep_format,
        car_safe: opts.car_safe,
    };

    for track in list.iter_mut() {
        sanitize::sanitize_track(track, opts.limit_name);
        if opts.fix_tags {
            tags::rewrite_from_filename(track);
            tags::standardize(track);
        }

        if let Some(warning) = convert::check_car_compat(track, opts.car_safe) {
            warn!("{}: {warning}", track.filename);
        }
        match convert::convert_if_needed(track, request, &settings.convert) {
            Conversion::Done => info!("{}: converted to MP3", track.filename),
            Conversion::Failed(msg) => warn!("{}: {msg}", track.filename),
            Conversion::NotNeeded => {}
        }
    }

    let mut stats = LibraryStats::default();
    if opts.dedupe {
        library::mark_duplicates(&mut list, &mut stats);
    }

    organize::plan(&mut list, opts.organize, opts.group_by_format);
    if opts.prefix {
        organize::apply_prefix(&mut list);
    }

    // After dedupe marking, so duplicate durations stay out of the total.
    for track in list.iter() {
        stats.record(track);
    }

    Ok(RunOutcome { list, stats })
}
