//! Command line surface. Thin glue: flags map straight onto pipeline
//! options, with `--car-safe` expanding into the preset an old head unit
//! wants.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::organize::OrganizeMode;
use crate::report::SimulateMode;

#[derive(Parser, Debug)]
#[command(
    name = "caravel",
    version,
    about = "Curates a folder of audio files into a clean, deduplicated copy for car stereo USB drives"
)]
pub struct Cli {
    /// Directory to scan, or an http(s) URL to download first.
    #[arg(default_value = ".")]
    pub input: String,

    /// Destination folder layout.
    #[arg(long, value_enum)]
    pub organize: Option<OrganizeArg>,

    /// Preview the playback order a device would use.
    #[arg(long, value_enum)]
    pub simulate: Option<SimulateArg>,

    /// Flag content-identical copies, keeping the first occurrence.
    #[arg(long)]
    pub dedupe: bool,

    /// Rewrite artist/title from the filename even when tags exist.
    #[arg(long)]
    pub fix_tags: bool,

    /// Hard-cap filenames at 64 characters.
    #[arg(long)]
    pub limit_name: bool,

    /// Prepend a 001_-style sequence number to every destination.
    #[arg(long)]
    pub prefix: bool,

    /// Group destinations under MP3/, FLAC/, ... directories.
    #[arg(long)]
    pub group_by_format: bool,

    /// Convert everything to MP3 via ffmpeg.
    #[arg(long)]
    pub convert_mp3: bool,

    /// Leave files that are already MP3 untouched when converting.
    #[arg(long)]
    pub keep_format: bool,

    /// Preset for old car stereos: implies --convert-mp3 --fix-tags
    /// --limit-name --prefix --dedupe and defaults --organize artist.
    #[arg(long)]
    pub car_safe: bool,

    /// Copy the curated set to this directory.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrganizeArg {
    Artist,
    Album,
    Flat,
    GenreArtist,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SimulateArg {
    Generic,
    Fat,
    Filename,
}

/// Effective pipeline options after preset expansion.
#[derive(Debug, Clone)]
pub struct Options {
    pub input: String,
    pub organize: OrganizeMode,
    pub simulate: Option<SimulateMode>,
    pub dedupe: bool,
    pub fix_tags: bool,
    pub limit_name: bool,
    pub prefix: bool,
    pub group_by_format: bool,
    pub convert_mp3: bool,
    pub keep_format: bool,
    pub car_safe: bool,
    pub export: Option<PathBuf>,
}

impl Cli {
    pub fn into_options(self) -> Options {
        let organize = match self.organize {
            Some(OrganizeArg::Artist) => OrganizeMode::Artist,
            Some(OrganizeArg::Album) => OrganizeMode::Album,
            Some(OrganizeArg::Flat) => OrganizeMode::Flat,
            Some(OrganizeArg::GenreArtist) => OrganizeMode::GenreArtist,
            None if self.car_safe => OrganizeMode::Artist,
            None => OrganizeMode::None,
        };

        Options {
            input: self.input,
            organize,
            simulate: self.simulate.map(|s| match s {
                SimulateArg::Generic => SimulateMode::Generic,
                SimulateArg::Fat => SimulateMode::Fat,
                SimulateArg::Filename => SimulateMode::Filename,
            }),
            dedupe: self.dedupe || self.car_safe,
            fix_tags: self.fix_tags || self.car_safe,
            limit_name: self.limit_name || self.car_safe,
            prefix: self.prefix || self.car_safe,
            group_by_format: self.group_by_format,
            convert_mp3: self.convert_mp3 || self.car_safe,
            keep_format: self.keep_format,
            car_safe: self.car_safe,
            export: self.export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_to_current_directory_and_no_passes() {
        let opts = Cli::parse_from(["caravel"]).into_options();
        assert_eq!(opts.input, ".");
        assert_eq!(opts.organize, OrganizeMode::None);
        assert!(opts.simulate.is_none());
        assert!(!opts.dedupe);
        assert!(!opts.prefix);
        assert!(opts.export.is_none());
    }

    #[test]
    fn parses_organize_and_simulate_modes() {
        let opts = Cli::parse_from([
            "caravel",
            "Music",
            "--organize",
            "genre-artist",
            "--simulate",
            "fat",
        ])
        .into_options();
        assert_eq!(opts.input, "Music");
        assert_eq!(opts.organize, OrganizeMode::GenreArtist);
        assert_eq!(opts.simulate, Some(SimulateMode::Fat));
    }

    #[test]
    fn car_safe_expands_the_preset() {
        let opts = Cli::parse_from(["caravel", "Music", "--car-safe"]).into_options();
        assert!(opts.dedupe);
        assert!(opts.fix_tags);
        assert!(opts.limit_name);
        assert!(opts.prefix);
        assert!(opts.convert_mp3);
        assert_eq!(opts.organize, OrganizeMode::Artist);
    }

    #[test]
    fn explicit_organize_wins_over_the_car_safe_default() {
        let opts = Cli::parse_from(["caravel", "Music", "--car-safe", "--organize", "album"])
            .into_options();
        assert_eq!(opts.organize, OrganizeMode::Album);
    }
}
