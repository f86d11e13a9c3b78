use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::line::{is_comment, strip_hash, LineProcessor, UpdateStats, HASH_SEPARATOR};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    // the io error is part of the message, so it is not exposed as a source as well
    #[error("error reading {}: {err}", path.display())]
    Read { path: PathBuf, err: std::io::Error },

    #[error("error writing to {}: {err}", path.display())]
    Write { path: PathBuf, err: std::io::Error },
}

/// The list of proprietary files, held in memory as its lines.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Manifest {
    pub lines: Vec<String>,
}

impl Manifest {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { lines: lines.into_iter().map(Into::into).collect() }
    }

    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ManifestError::NotFound { path: path.to_owned() },
            _ => ManifestError::Read { path: path.to_owned(), err },
        })?;
        Ok(Self::parse(&text))
    }

    /// Lines joined by `\n`, with a trailing `\n`.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Overwrites `path` with the contents of the manifest.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        fs::write(path, self.to_text())
            .map_err(|err| ManifestError::Write { path: path.to_owned(), err })
    }

    /// Recomputes the hash of every entry in a hashed section, with blobs resolved
    /// against `vendor_path`. Entries whose blob can't be read are left without a hash.
    pub fn update(&mut self, vendor_path: &Path) -> UpdateStats {
        let mut processor = LineProcessor::new(vendor_path);
        let mut need_hash = false;
        for line in self.lines.iter_mut() {
            let (new_line, next) = processor.process(line, need_hash);
            *line = new_line;
            need_hash = next;
        }
        processor.stats()
    }

    /// Drops the hash from every entry that has one. Returns how many lines changed.
    pub fn cleanup(&mut self) -> usize {
        let mut stripped = 0;
        for line in self.lines.iter_mut() {
            if line.is_empty() || is_comment(line) || !line.contains(HASH_SEPARATOR) {
                continue;
            }
            let len = strip_hash(line).len();
            line.truncate(len);
            stripped += 1;
        }
        stripped
    }
}
