//! Centralized path configuration for the VFS plugin.
//!
//! All base directories go through [`resolve`] so that later path
//! comparisons (notably against the mount table) see canonical paths.

use crate::config::{self, Config};
use crate::error::{Result, VfsError};
use std::path::{Path, PathBuf};
use tracing::info;

const DATA_DIR_NAME: &str = ".csi-vfs";
const DEFAULT_BINDFS: &str = "bindfs";

/// Canonical base directories used by the store and the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    pub data: PathBuf,
    pub dev: PathBuf,
    pub mnt: PathBuf,
    pub vol: PathBuf,
    pub bindfs: String,
}

/// Get the default data directory.
///
/// Resolution order:
/// 1. `$HOME/.csi-vfs`
/// 2. `$USER_PROFILE/.csi-vfs`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir()
        .or_else(|| std::env::var_os("USER_PROFILE").map(PathBuf::from))
        .filter(|p| !p.as_os_str().is_empty())
        .map(|home| home.join(DATA_DIR_NAME))
}

/// Resolve `config` into existing, canonical directories.
///
/// Missing directories are created. Each directory is canonicalized
/// before the next one is derived from it.
pub fn resolve(config: &Config) -> Result<PluginPaths> {
    let data = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir().ok_or_else(|| {
            VfsError::configuration(
                PathBuf::new(),
                format!("no data directory: set {} or HOME", config::ENV_DATA_DIR),
                None,
            )
        })?,
    };
    let data = ensure_dir(&data)?;

    let dev = ensure_dir(&config.dev_dir.clone().unwrap_or_else(|| data.join("dev")))?;
    let mnt = ensure_dir(&config.mnt_dir.clone().unwrap_or_else(|| data.join("mnt")))?;
    let vol = ensure_dir(&config.vol_dir.clone().unwrap_or_else(|| data.join("vol")))?;

    let bindfs = config.bindfs.clone().unwrap_or_else(|| DEFAULT_BINDFS.to_string());

    info!(
        data = %data.display(),
        dev = %dev.display(),
        mnt = %mnt.display(),
        vol = %vol.display(),
        bindfs = %bindfs,
        "configured {}",
        config::PLUGIN_NAME
    );

    Ok(PluginPaths { data, dev, mnt, vol, bindfs })
}

/// Create `dir` (and parents) if needed, then return its canonical form.
///
/// An existing non-directory at `dir` is a configuration error.
pub fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| VfsError::configuration(dir, "failed to create directory", Some(e)))?;
    let canonical = std::fs::canonicalize(dir)
        .map_err(|e| VfsError::configuration(dir, "failed to resolve symlinks", Some(e)))?;
    if !canonical.is_dir() {
        return Err(VfsError::configuration(dir, "not a directory", None));
    }
    Ok(canonical)
}
