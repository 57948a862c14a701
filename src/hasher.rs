//! Content fingerprinting.
//!
//! Files are hashed with MD5 in fixed-size chunks. Files above the size
//! threshold are not read at all; they get a `large_file_<size>` sentinel.
//! I/O failures never propagate out of this module: they become an
//! `error_<msg>` sentinel so one unreadable file cannot abort a scan.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Files larger than this are not hashed (100 MiB).
pub const MAX_FILE_SIZE_FOR_HASH: u64 = 100 * 1024 * 1024;

/// Read size used while hashing (8 KiB).
pub const CHUNK_SIZE: usize = 8192;

/// Maximum number of characters of an error description kept in a sentinel.
pub const MAX_ERROR_LEN: usize = 20;

const LARGE_FILE_PREFIX: &str = "large_file_";
const ERROR_PREFIX: &str = "error_";

/// The `hash` value of a file record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Fingerprint {
    /// Lowercase hex MD5 of the full content
    Digest(String),
    /// Hashing skipped because the file exceeds the threshold
    LargeFile(u64),
    /// Hashing failed; holds the truncated error description
    Error(String),
}

impl Fingerprint {
    /// Builds an error sentinel from any error, keeping at most
    /// [`MAX_ERROR_LEN`] characters of its description.
    pub fn from_error(err: &impl fmt::Display) -> Self {
        Fingerprint::Error(err.to_string().chars().take(MAX_ERROR_LEN).collect())
    }

    /// Whether this is a real content digest rather than a sentinel.
    pub fn is_digest(&self) -> bool {
        matches!(self, Fingerprint::Digest(_))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fingerprint::Digest(hex) => f.write_str(hex),
            Fingerprint::LargeFile(size) => write!(f, "{LARGE_FILE_PREFIX}{size}"),
            Fingerprint::Error(msg) => write!(f, "{ERROR_PREFIX}{msg}"),
        }
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_string()
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        if let Some(msg) = s.strip_prefix(ERROR_PREFIX) {
            return Fingerprint::Error(msg.to_string());
        }
        if let Some(size) = s
            .strip_prefix(LARGE_FILE_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
        {
            return Fingerprint::LargeFile(size);
        }
        Fingerprint::Digest(s)
    }
}

/// Chunked MD5 hasher with a size short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    /// Files strictly larger than this many bytes are not read
    pub max_file_size: u64,
    pub chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE_FOR_HASH,
            chunk_size: CHUNK_SIZE,
        }
    }
}

impl Hasher {
    pub fn new(max_file_size: u64, chunk_size: usize) -> Self {
        Self {
            max_file_size,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Fingerprints the file at `path`.
    ///
    /// Stats the file first; oversize files are never opened. Any failure is
    /// folded into [`Fingerprint::Error`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use storage_report::hasher::Hasher;
    ///
    /// let fingerprint = Hasher::default().hash_file(Path::new("photo.jpg"));
    /// println!("{fingerprint}");
    /// ```
    pub fn hash_file(&self, path: &Path) -> Fingerprint {
        let size = match std::fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => return Fingerprint::from_error(&e),
        };

        if size > self.max_file_size {
            return Fingerprint::LargeFile(size);
        }

        match File::open(path) {
            Ok(file) => self.fingerprint(file, size),
            Err(e) => Fingerprint::from_error(&e),
        }
    }

    /// Fingerprints already-opened content of a known `size`.
    ///
    /// Performs zero reads when `size` is above the threshold.
    pub fn fingerprint<R: Read>(&self, reader: R, size: u64) -> Fingerprint {
        if size > self.max_file_size {
            return Fingerprint::LargeFile(size);
        }

        match self.digest(reader) {
            Ok(hex) => Fingerprint::Digest(hex),
            Err(e) => Fingerprint::from_error(&e),
        }
    }

    fn digest<R: Read>(&self, mut reader: R) -> io::Result<String> {
        let mut hasher = Md5::new();
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied while reading",
            ))
        }
    }

    struct PanicReader;

    impl Read for PanicReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            panic!("oversize content must not be read");
        }
    }

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_known_digests() {
        let hasher = Hasher::default();
        assert_eq!(
            hasher.fingerprint(&b""[..], 0),
            Fingerprint::Digest("d41d8cd98f00b204e9800998ecf8427e".to_string())
        );
        assert_eq!(
            hasher.fingerprint(&b"hello world"[..], 11),
            Fingerprint::Digest("5eb63bbbe01eeed093cb22bb8f5acdc3".to_string())
        );
    }

    #[test]
    fn test_chunking_does_not_change_digest() {
        let content: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        let whole = Hasher::new(MAX_FILE_SIZE_FOR_HASH, content.len()).fingerprint(&content[..], 50_000);
        let tiny = Hasher::new(MAX_FILE_SIZE_FOR_HASH, 7).fingerprint(&content[..], 50_000);
        let default = Hasher::default().fingerprint(&content[..], 50_000);

        assert!(whole.is_digest());
        assert_eq!(whole, tiny);
        assert_eq!(whole, default);
    }

    #[test]
    fn test_hash_file_deterministic_and_content_sensitive() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.bin", b"0123456789abcdef");
        let b = write_file(&dir, "b.bin", b"0123456789abcdef");
        let c = write_file(&dir, "c.bin", b"0123456789abcdeF");

        let hasher = Hasher::default();
        assert_eq!(hasher.hash_file(&a), hasher.hash_file(&a));
        assert_eq!(hasher.hash_file(&a), hasher.hash_file(&b));
        assert_ne!(hasher.hash_file(&a), hasher.hash_file(&c));
    }

    #[test]
    fn test_large_file_sentinel_without_reading() {
        let hasher = Hasher::default();
        let size = MAX_FILE_SIZE_FOR_HASH + 1;

        let fingerprint = hasher.fingerprint(PanicReader, size);
        assert_eq!(fingerprint, Fingerprint::LargeFile(size));
        assert_eq!(fingerprint.to_string(), format!("large_file_{size}"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let hasher = Hasher::new(4, CHUNK_SIZE);
        assert!(hasher.fingerprint(&b"1234"[..], 4).is_digest());
        assert_eq!(hasher.fingerprint(PanicReader, 5), Fingerprint::LargeFile(5));
    }

    #[test]
    fn test_hash_file_large_sparse_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.iso");
        let file = File::create(&path).unwrap();
        file.set_len(MAX_FILE_SIZE_FOR_HASH + 1).unwrap();
        drop(file);

        assert_eq!(
            Hasher::default().hash_file(&path).to_string(),
            format!("large_file_{}", MAX_FILE_SIZE_FOR_HASH + 1)
        );
    }

    #[test]
    fn test_read_error_becomes_truncated_sentinel() {
        let fingerprint = Hasher::default().fingerprint(FailingReader, 10);
        match &fingerprint {
            Fingerprint::Error(msg) => {
                assert!(msg.chars().count() <= MAX_ERROR_LEN);
                assert_eq!(msg, "permission denied wh");
            }
            other => panic!("expected error sentinel, got {other:?}"),
        }
        assert!(fingerprint.to_string().starts_with("error_"));
    }

    #[test]
    fn test_missing_file_becomes_sentinel() {
        let dir = TempDir::new().unwrap();
        let fingerprint = Hasher::default().hash_file(&dir.path().join("gone.txt"));
        assert!(matches!(fingerprint, Fingerprint::Error(_)));
    }

    #[test]
    fn test_from_error_respects_char_boundaries() {
        let fingerprint = Fingerprint::from_error(&"ééééééééééééééééééééééééé");
        assert_eq!(fingerprint, Fingerprint::Error("é".repeat(20)));
    }

    #[test]
    fn test_fingerprint_string_forms_parse_back() {
        let cases = [
            Fingerprint::Digest("5eb63bbbe01eeed093cb22bb8f5acdc3".to_string()),
            Fingerprint::LargeFile(209_715_200),
            Fingerprint::Error("No such file or dir".to_string()),
        ];
        for fingerprint in cases {
            let json = serde_json::to_string(&fingerprint).unwrap();
            let parsed: Fingerprint = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, fingerprint);
        }
    }
}
