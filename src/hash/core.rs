use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use crc32fast::Hasher as Crc32;
use digest::Digest;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use thiserror::Error;

/// Default streaming buffer size: 64 MiB. Large enough to amortize
/// syscall overhead on big files, small enough to bound peak memory.
pub const DEFAULT_BUF_SIZE: usize = 64 * 1024 * 1024;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMode {
    Sha1,
    Sha256,
    Sha512,
    Crc32,
    Md5,
}

impl HashMode {
    /// Every mode, in the order usage text lists them.
    pub const ALL: [HashMode; 5] = [
        HashMode::Sha1,
        HashMode::Sha256,
        HashMode::Sha512,
        HashMode::Crc32,
        HashMode::Md5,
    ];

    /// Case-insensitive lookup: "SHA256" and "sha256" both resolve.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Some(HashMode::Sha1),
            "sha256" => Some(HashMode::Sha256),
            "sha512" => Some(HashMode::Sha512),
            "crc32" => Some(HashMode::Crc32),
            "md5" => Some(HashMode::Md5),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashMode::Sha1 => "sha1",
            HashMode::Sha256 => "sha256",
            HashMode::Sha512 => "sha512",
            HashMode::Crc32 => "crc32",
            HashMode::Md5 => "md5",
        }
    }

    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            HashMode::Sha1 => 20,
            HashMode::Sha256 => 32,
            HashMode::Sha512 => 64,
            HashMode::Crc32 => 4,
            HashMode::Md5 => 16,
        }
    }
}

/// Errors from the file-level entry points. Variants stay distinct so
/// callers can tell an unopenable path from a read that failed
/// mid-stream.
#[derive(Debug, Error)]
pub enum SumError {
    #[error("cannot open '{path}': {source}")]
    Open { path: String, source: io::Error },

    #[error("cannot stat '{path}': {source}")]
    Stat { path: String, source: io::Error },

    #[error("'{path}' is a directory")]
    IsDirectory { path: String },

    #[error("error reading '{path}': {source}")]
    Read { path: String, source: io::Error },
}

/// Stream `reader` through a fresh accumulator for `mode` and return
/// the digest bytes. Uses the default buffer size; memory stays bounded
/// regardless of input length.
pub fn sum_reader<R: Read>(mode: HashMode, reader: R) -> io::Result<Vec<u8>> {
    sum_reader_with_capacity(mode, reader, DEFAULT_BUF_SIZE)
}

/// Same as [`sum_reader`] with a caller-chosen buffer size. The digest
/// never depends on where the chunk boundaries fall.
pub fn sum_reader_with_capacity<R: Read>(
    mode: HashMode,
    reader: R,
    buf_size: usize,
) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; buf_size.max(1)];
    match mode {
        HashMode::Sha1 => stream_into::<Sha1, _>(reader, &mut buf),
        HashMode::Sha256 => stream_into::<Sha256, _>(reader, &mut buf),
        HashMode::Sha512 => stream_into::<Sha512, _>(reader, &mut buf),
        HashMode::Md5 => stream_into::<Md5, _>(reader, &mut buf),
        HashMode::Crc32 => stream_crc32(reader, &mut buf),
    }
}

/// Read loop for the RustCrypto hashers. `Ok(0)` is end-of-data;
/// `Interrupted` is transient and retried; any other error aborts the
/// computation with no partial result.
fn stream_into<D: Digest, R: Read>(mut reader: R, buf: &mut [u8]) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    loop {
        match reader.read(buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hasher.finalize().to_vec())
}

/// CRC32 (IEEE) does not implement `Digest`; same loop, dedicated arm.
/// The 32-bit checksum comes back big-endian so the hex rendering reads
/// in the conventional order.
fn stream_crc32<R: Read>(mut reader: R, buf: &mut [u8]) -> io::Result<Vec<u8>> {
    let mut hasher = Crc32::new();
    loop {
        match reader.read(buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hasher.finalize().to_be_bytes().to_vec())
}

/// One-shot digest of an in-memory slice.
pub fn sum_bytes(mode: HashMode, data: &[u8]) -> Vec<u8> {
    match mode {
        HashMode::Sha1 => Sha1::digest(data).to_vec(),
        HashMode::Sha256 => Sha256::digest(data).to_vec(),
        HashMode::Sha512 => Sha512::digest(data).to_vec(),
        HashMode::Md5 => Md5::digest(data).to_vec(),
        HashMode::Crc32 => {
            let mut hasher = Crc32::new();
            hasher.update(data);
            hasher.finalize().to_be_bytes().to_vec()
        }
    }
}

/// Run [`sum_reader`] and report the elapsed wall-clock time to `out`.
/// The digest passes through unchanged.
pub fn timed_sum<R: Read, W: Write>(
    mode: HashMode,
    reader: R,
    out: &mut W,
) -> io::Result<Vec<u8>> {
    let start = Instant::now();
    let digest = sum_reader(mode, reader)?;
    writeln!(out, "Calculated in {:?}.", start.elapsed())?;
    Ok(digest)
}

/// Open `path` for streaming. Directories are classified up front so
/// the caller never starts a digest that cannot finish.
pub fn open_input(path: &Path) -> Result<File, SumError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| SumError::Open {
        path: display.clone(),
        source: e,
    })?;
    let meta = file.metadata().map_err(|e| SumError::Stat {
        path: display.clone(),
        source: e,
    })?;
    if meta.is_dir() {
        return Err(SumError::IsDirectory { path: display });
    }
    Ok(file)
}

/// Digest a file by path. The handle is scoped to this call and
/// released on every exit path.
pub fn sum_file(mode: HashMode, path: &Path) -> Result<Vec<u8>, SumError> {
    let file = open_input(path)?;
    sum_reader(mode, file).map_err(|e| SumError::Read {
        path: path.display().to_string(),
        source: e,
    })
}

/// Convert digest bytes to a lowercase hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        let _ = write!(s, "{:02x}", b);
    }
    s
}
