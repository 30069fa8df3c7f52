//! Remote acquisition collaborator.
//!
//! URL inputs are handed to yt-dlp, which drops audio files into a local
//! directory; the pipeline then scans that directory like any other tree.
//! Requires yt-dlp on PATH: a URL input without it is fatal, since there is
//! no local tree to fall back to.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn ytdlp_available() -> bool {
    Command::new("yt-dlp")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Fetch the audio behind `url` into `out_dir` as tagged MP3 files.
pub fn fetch_audio(url: &str, out_dir: &Path) -> Result<()> {
    if !ytdlp_available() {
        return Err(Error::Download(
            "yt-dlp not found on PATH; install it to use URL inputs".to_string(),
        ));
    }

    fs::create_dir_all(out_dir)?;
    let template = out_dir.join("%(title)s.%(ext)s");

    let status = Command::new("yt-dlp")
        .arg("-x")
        .args(["--audio-format", "mp3"])
        .args(["--audio-quality", "0"])
        .arg("--embed-metadata")
        .arg("--no-playlist")
        .arg("-o")
        .arg(&template)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| Error::Download(format!("could not run yt-dlp: {e}")))?;

    if !status.success() {
        return Err(Error::Download(format!("yt-dlp exited with {status}")));
    }
    Ok(())
}
