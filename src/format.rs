//! Closed audio format taxonomy.
//!
//! Formats are classified by filename extension only; the enum order is
//! fixed because [`LibraryStats`](crate::library::LibraryStats) indexes its
//! per-format table by `stats_index`.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioFormat {
    Unknown,
    Mp3,
    Flac,
    Wav,
    Aac,
    M4a,
    Ogg,
    Wma,
}

/// Number of slots in a per-format count table, `Unknown` included.
pub const FORMAT_COUNT: usize = 8;

impl AudioFormat {
    /// Classify a filename by its extension (case-insensitive).
    ///
    /// No extension, or an extension outside the known set, is `Unknown`;
    /// the scanner skips those files.
    pub fn from_filename(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => return Self::Unknown,
        };
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Self::Mp3,
            "flac" => Self::Flac,
            "wav" => Self::Wav,
            "aac" => Self::Aac,
            "m4a" => Self::M4a,
            "ogg" => Self::Ogg,
            "wma" => Self::Wma,
            _ => Self::Unknown,
        }
    }

    /// Upper-case display name, also used as the directory name for
    /// `--group-by-format`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Flac => "FLAC",
            Self::Wav => "WAV",
            Self::Aac => "AAC",
            Self::M4a => "M4A",
            Self::Ogg => "OGG",
            Self::Wma => "WMA",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Slot in the stats table: unknown, MP3, FLAC, WAV, AAC, M4A, OGG, WMA.
    pub fn stats_index(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Mp3 => 1,
            Self::Flac => 2,
            Self::Wav => 3,
            Self::Aac => 4,
            Self::M4a => 5,
            Self::Ogg => 6,
            Self::Wma => 7,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}
