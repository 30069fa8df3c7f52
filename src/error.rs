//! Error taxonomy for the pipeline.
//!
//! Only a handful of conditions abort a run; everything else degrades to a
//! default value plus a warning at the call site.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The scan root could not be opened as a directory. Fatal to the run.
    #[error("cannot scan {}: {source}", path.display())]
    ScanRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A URL input could not be turned into a local directory of files.
    #[error("download failed: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
