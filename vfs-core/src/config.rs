//! Configuration management.
//!
//! Every field is an optional override. Unset fields fall back to the
//! defaults applied by [`crate::paths::resolve`].

use crate::error::{Result, VfsError};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Name of this volume plugin.
pub const PLUGIN_NAME: &str = "com.rexray.vfs";

/// Version of this volume plugin.
pub const VENDOR_VERSION: &str = "0.3.0";

/// Protocol versions this plugin supports.
pub const SUPPORTED_VERSIONS: &str = "0.2.0";

/// Metadata file kept inside every volume directory.
pub const INFO_FILE_NAME: &str = ".info.json";

pub const ENV_DATA_DIR: &str = "X_CSI_VFS_DATA";
pub const ENV_DEV_DIR: &str = "X_CSI_VFS_DEV";
pub const ENV_MNT_DIR: &str = "X_CSI_VFS_MNT";
pub const ENV_VOL_DIR: &str = "X_CSI_VFS_VOL";
pub const ENV_BINDFS: &str = "X_CSI_VFS_BINDFS";

/// Path and tool overrides for the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub dev_dir: Option<PathBuf>,
    pub mnt_dir: Option<PathBuf>,
    pub vol_dir: Option<PathBuf>,
    pub bindfs: Option<String>,
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            data_dir: get(ENV_DATA_DIR).map(PathBuf::from),
            dev_dir: get(ENV_DEV_DIR).map(PathBuf::from),
            mnt_dir: get(ENV_MNT_DIR).map(PathBuf::from),
            vol_dir: get(ENV_VOL_DIR).map(PathBuf::from),
            bindfs: get(ENV_BINDFS),
        }
    }

    /// Load configuration from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(VfsError::configuration(path, "failed to read config", Some(e)));
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            VfsError::configuration(path, format!("failed to parse config: {}", e), None)
        })
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: Config) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            dev_dir: other.dev_dir.or(self.dev_dir),
            mnt_dir: other.mnt_dir.or(self.mnt_dir),
            vol_dir: other.vol_dir.or(self.vol_dir),
            bindfs: other.bindfs.or(self.bindfs),
        }
    }
}
