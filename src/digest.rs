use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Why a blob could not be hashed.
///
/// Neither case is fatal: the caller logs it and moves on to the next entry.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path: path.to_owned() },
            _ => Self::Io { path: path.to_owned(), source },
        }
    }
}

/// Returns the SHA1 of the given bytes as lowercase hex.
pub fn sha1_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha1::digest(data.as_ref()))
}

/// Returns the SHA1 of the file at `path` as lowercase hex.
///
/// The file is streamed through the hasher rather than read into memory, since
/// some blobs (firmware images, mostly) are quite large.
pub fn sha1_file(path: &Path) -> Result<String, HashError> {
    let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha1::new();
    std::io::copy(&mut reader, &mut hasher).map_err(|e| HashError::from_io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // sha1 test vectors from FIPS 180-1
    const ABC: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";
    const EMPTY: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

    #[test]
    fn test_vectors() {
        assert_eq!(sha1_hex(b"abc"), ABC);
        assert_eq!(sha1_hex(b""), EMPTY);
    }

    #[test]
    fn file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libfoo.so");

        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(sha1_file(&path).unwrap(), ABC);

        std::fs::write(&path, b"").unwrap();
        assert_eq!(sha1_file(&path).unwrap(), EMPTY);

        // bigger than the BufReader buffer
        let big = vec![0x5au8; 100_000];
        std::fs::write(&path, &big).unwrap();
        assert_eq!(sha1_file(&path).unwrap(), sha1_hex(&big));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.so");
        match sha1_file(&path) {
            Err(HashError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(sha1_file(dir.path()), Err(HashError::Io { .. })));
    }
}
