//! Approximate content fingerprinting.
//!
//! Hashes the first and last 4 KiB of a file with FNV-1a into one 64-bit
//! value, so the I/O cost per file is bounded no matter how large the
//! library's FLAC/WAV files get. Two files that agree on both windows but
//! differ in the middle will collide; dedupe accepts that trade-off.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Bytes sampled from each end of the file.
pub const WINDOW_BYTES: u64 = 4096;

fn fold(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Fingerprint a file from its head and tail windows.
///
/// Files shorter than one window contribute only the bytes they have; the
/// tail pass runs only when the file is at least one window long, and the
/// hash state carries over from the head pass (not reset).
pub fn fingerprint_file(path: &Path) -> io::Result<u64> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    let mut buf = vec![0u8; WINDOW_BYTES as usize];
    let mut hash = FNV_OFFSET_BASIS;

    let n = read_window(&mut file, &mut buf)?;
    hash = fold(hash, &buf[..n]);

    if len >= WINDOW_BYTES {
        file.seek(SeekFrom::End(-(WINDOW_BYTES as i64)))?;
        let n = read_window(&mut file, &mut buf)?;
        hash = fold(hash, &buf[..n]);
    }

    Ok(hash)
}

/// Read up to `buf.len()` bytes, stopping at EOF without error.
fn read_window(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
