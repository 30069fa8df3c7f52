//! Format conversion collaborator.
//!
//! The pipeline decides *whether* a track needs MP3 conversion; the actual
//! transcoding is ffmpeg's job. On success the track records its new path
//! and format, on failure it keeps the original file and the run goes on.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use tracing::warn;

use crate::config::ConvertConfig;
use crate::format::AudioFormat;
use crate::library::AudioTrack;

#[derive(Debug, Copy, Clone, Default)]
pub struct ConvertRequest {
    pub convert_mp3: bool,
    pub keep_format: bool,
    pub car_safe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    NotNeeded,
    Done,
    Failed(String),
}

/// Whether a track would go through ffmpeg under the given request.
pub fn needs_conversion(track: &AudioTrack, req: ConvertRequest) -> bool {
    if !(req.convert_mp3 || req.car_safe) {
        return false;
    }
    // Already MP3 and the caller wants existing MP3s left alone.
    !(track.format == AudioFormat::Mp3 && req.keep_format)
}

/// Old head units reliably play MP3 and little else. Under `--car-safe`,
/// flag anything else as unsupported before conversion gets a chance.
pub fn check_car_compat(track: &mut AudioTrack, car_safe: bool) -> Option<String> {
    if car_safe && track.format != AudioFormat::Mp3 {
        track.unsupported = true;
        track.warning_count += 1;
        return Some(format!(
            "format {} may not play on an older head unit",
            track.format.name()
        ));
    }
    None
}

fn ffmpeg_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

/// Run ffmpeg for a track that needs it. The converted file lands next to
/// the source with a `.converted.mp3` suffix and the track is repointed at
/// it.
pub fn convert_if_needed(
    track: &mut AudioTrack,
    req: ConvertRequest,
    cfg: &ConvertConfig,
) -> Conversion {
    if !needs_conversion(track, req) {
        return Conversion::NotNeeded;
    }
    if !ffmpeg_available() {
        track.warning_count += 1;
        return Conversion::Failed("ffmpeg not found, conversion skipped".to_string());
    }

    let mut out = PathBuf::from(&track.path);
    out.as_mut_os_string().push(".converted.mp3");

    let sample_rate = if req.car_safe {
        cfg.car_sample_rate_hz
    } else {
        cfg.sample_rate_hz
    };

    let status = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(&track.path)
        .arg("-vn")
        .args(["-ar", &sample_rate.to_string()])
        .args(["-ac", "2"])
        .args(["-b:a", &format!("{}k", cfg.bitrate_kbps)])
        .args(["-id3v2_version", "3"])
        .arg(&out)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(s) if s.success() => {
            track.path = out;
            track.format = AudioFormat::Mp3;
            Conversion::Done
        }
        Ok(s) => {
            track.warning_count += 1;
            warn!("ffmpeg exited with {s} for {}", track.filename);
            Conversion::Failed("ffmpeg failed to convert".to_string())
        }
        Err(err) => {
            track.warning_count += 1;
            Conversion::Failed(format!("could not run ffmpeg: {err}"))
        }
    }
}
