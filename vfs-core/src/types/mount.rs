//! Mount table types.
//!
//! Paths and sources keep the exact bytes the kernel reports, so they can be
//! compared against filesystem paths even when they are not valid UTF-8.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

/// One raw line of the host mount table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Sub-path of the original filesystem exposed by this mount
    pub root: PathBuf,

    /// Where the filesystem is mounted
    pub mount_point: PathBuf,

    /// Per-mount options, in table order
    pub mount_opts: Vec<String>,

    /// Filesystem type (e.g. "ext4", "fuse.bindfs")
    pub fs_type: String,

    /// Device or source string as the kernel reports it
    pub mount_source: OsString,
}

impl MountEntry {
    pub fn new(
        mount_source: impl Into<OsString>,
        mount_point: impl Into<PathBuf>,
        fs_type: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            mount_point: mount_point.into(),
            mount_opts: Vec::new(),
            fs_type: fs_type.into(),
            mount_source: mount_source.into(),
        }
    }
}

/// A mount table entry with bind-mount chains resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountInfo {
    /// Raw mount source
    pub device: OsString,

    /// Mount point
    pub path: PathBuf,

    /// Filesystem type
    pub fs_type: String,

    /// Mount options
    pub opts: Vec<String>,

    /// Effective source: the raw source for the first mount of a device,
    /// otherwise the first mount's point joined with this entry's root
    pub source: PathBuf,
}
