//! Maintains the SHA1 pins in a `proprietary-files.txt` blob list.
//!
//! Entries in a section whose heading comment contains ` - from` get the hash of the
//! matching blob in the vendor tree appended (`path|sha1`), so extraction tooling can
//! notice when a vendor blob changed. [`Manifest::cleanup`] strips them all again.

pub mod config;
pub mod digest;
pub mod line;
pub mod manifest;

pub use config::{Config, Mode};
pub use digest::{sha1_file, HashError};
pub use line::{LineProcessor, UpdateStats};
pub use manifest::{Manifest, ManifestError};
