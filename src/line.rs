//! Rewriting of individual manifest lines.
//!
//! A manifest line is one of:
//!
//! ```text
//! # Some blobs - from some-device     comment, enables hashing for what follows
//! # Some other comment                comment, disables hashing for what follows
//! [-][prefix:]path/to/blob[;meta][|sha1]
//! ```
//!
//! Empty lines are left alone and do not affect whether hashing is enabled.

use std::path::Path;
use tracing::{debug, warn};

use crate::config::HASHED_SECTION_MARKER;
use crate::digest::{sha1_file, HashError};

pub const COMMENT: char = '#';
pub const HASH_SEPARATOR: char = '|';
pub const META_SEPARATOR: char = ';';
pub const PREFIX_SEPARATOR: char = ':';

/// Marks blobs that other tooling skips when copying. They still get hashed.
pub const EXCLUDE_MARKER: char = '-';

pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT)
}

/// Whether a comment line starts a section of entries that need hashes.
pub fn starts_hashed_section(comment: &str) -> bool {
    comment.contains(HASHED_SECTION_MARKER)
}

/// Returns the line with everything from the first `|` onwards removed.
pub fn strip_hash(line: &str) -> &str {
    match line.split_once(HASH_SEPARATOR) {
        Some((entry, _)) => entry,
        None => line,
    }
}

/// Extracts the blob path from an entry (which must already have its hash stripped):
/// the part after the last `:`, up to the first `;`, without a leading `-`.
pub fn entry_path(entry: &str) -> &str {
    let path = match entry.split_once(META_SEPARATOR) {
        Some((path, _)) => path,
        None => entry,
    };
    let path = match path.rsplit_once(PREFIX_SEPARATOR) {
        Some((_, path)) => path,
        None => path,
    };
    path.strip_prefix(EXCLUDE_MARKER).unwrap_or(path)
}

/// Tally of what happened to the entries seen by a [`LineProcessor`].
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct UpdateStats {
    pub hashed: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Rewrites entries with the hash of the blob they refer to, resolved against `vendor_path`.
pub struct LineProcessor<'a> {
    vendor_path: &'a Path,
    stats: UpdateStats,
}

impl<'a> LineProcessor<'a> {
    pub fn new(vendor_path: &'a Path) -> Self {
        Self { vendor_path, stats: Default::default() }
    }

    pub fn stats(&self) -> UpdateStats {
        self.stats
    }

    /// Processes one line, given whether hashing is enabled at this point of the manifest.
    ///
    /// Returns the rewritten line and whether hashing is enabled for the next line.
    /// Entries whose blob can't be read come back without a hash, and a warning is logged.
    pub fn process(&mut self, line: &str, need_hash: bool) -> (String, bool) {
        if line.is_empty() {
            return (String::new(), need_hash);
        }

        if is_comment(line) {
            return (line.to_owned(), starts_hashed_section(line));
        }

        if !need_hash {
            return (line.to_owned(), need_hash);
        }

        let entry = strip_hash(line);
        match self.hash_entry(entry) {
            Ok(hash) => {
                debug!("{} {}", hash, entry);
                self.stats.hashed += 1;
                (format!("{}{}{}", entry, HASH_SEPARATOR, hash), need_hash)
            }
            Err(e) => {
                match e {
                    HashError::NotFound { .. } => self.stats.missing += 1,
                    HashError::Io { .. } => self.stats.failed += 1,
                }
                warn!("{}", e);
                (entry.to_owned(), need_hash)
            }
        }
    }

    fn hash_entry(&self, entry: &str) -> Result<String, HashError> {
        let path = entry_path(entry);
        if path.is_empty() {
            // would otherwise hash the vendor directory itself; name the whole entry instead
            return Err(HashError::NotFound { path: entry.into() });
        }
        sha1_file(&self.vendor_path.join(path))
    }
}
