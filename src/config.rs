use std::path::{Path, PathBuf};

pub const DEFAULT_DEVICE: &str = "garnet";
pub const DEFAULT_VENDOR: &str = "xiaomi";
pub const DEFAULT_MANIFEST: &str = "proprietary-files.txt";

// relative to the device tree, e.g. device/xiaomi/garnet
pub const DEFAULT_VENDOR_ROOT: &str = "../../../vendor";

/// Blobs live under `<vendor root>/<vendor>/<device>/` in this directory.
pub const PROPRIETARY_DIR: &str = "proprietary";

/// Comment marker which enables hashing for the entries that follow it.
///
/// Any other comment line disables hashing again, until the next marker.
pub const HASHED_SECTION_MARKER: &str = " - from";

/// What to do with the manifest.
///
/// Displayed as `update` or `cleanup`.
#[derive(Copy, Clone, PartialEq, Eq, parse_display::Display, Debug)]
#[display(style = "lowercase")]
pub enum Mode {
    /// Recompute the hash of every entry in a hashed section.
    Update,

    /// Drop every hash from the manifest.
    Cleanup,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Update
    }
}

/// Everything needed to locate the manifest and the vendor blobs it refers to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    pub device: String,
    pub vendor: String,
    pub manifest: PathBuf,
    pub vendor_root: PathBuf,
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_owned(),
            vendor: DEFAULT_VENDOR.to_owned(),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            vendor_root: PathBuf::from(DEFAULT_VENDOR_ROOT),
            mode: Default::default(),
        }
    }
}

impl Config {
    /// Directory the manifest entries are resolved against:
    /// `<vendor root>/<vendor>/<device>/proprietary`.
    pub fn vendor_path(&self) -> PathBuf {
        vendor_path(&self.vendor_root, &self.vendor, &self.device)
    }
}

pub fn vendor_path(vendor_root: &Path, vendor: &str, device: &str) -> PathBuf {
    vendor_root.join(vendor).join(device).join(PROPRIETARY_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vendor_path() {
        let config = Config::default();
        assert_eq!(
            config.vendor_path(),
            Path::new("../../../vendor/xiaomi/garnet/proprietary")
        );
    }

    #[test]
    fn vendor_path_uses_device_and_vendor() {
        let config = Config {
            device: "marble".into(),
            vendor: "redmi".into(),
            vendor_root: "/src/vendor".into(),
            ..Default::default()
        };
        assert_eq!(config.vendor_path(), Path::new("/src/vendor/redmi/marble/proprietary"));
    }

    #[test]
    fn mode_display() {
        assert_eq!(Mode::Update.to_string(), "update");
        assert_eq!(Mode::Cleanup.to_string(), "cleanup");
    }
}
