use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/caravel/config.toml` or
/// `~/.config/caravel/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CARAVEL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub scan: ScanConfig,
    pub convert: ConvertConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Ceiling on the number of tracks collected in one run.
    pub max_tracks: usize,
    /// Directory levels below the scan root to descend into.
    pub max_depth: usize,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_tracks: 20_000,
            max_depth: 16,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// MP3 bitrate handed to ffmpeg.
    pub bitrate_kbps: u32,
    /// Output sample rate for plain `--convert-mp3`.
    pub sample_rate_hz: u32,
    /// Output sample rate under `--car-safe` (older head units want 44.1k).
    pub car_sample_rate_hz: u32,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            bitrate_kbps: 320,
            sample_rate_hz: 48_000,
            car_sample_rate_hz: 44_100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory URL downloads land in before scanning.
    pub dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: ".caravel/downloads".to_string(),
        }
    }
}
