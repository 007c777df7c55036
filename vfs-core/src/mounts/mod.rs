//! Mount table resolution.
//!
//! Turns a raw mount table snapshot into a filtered view in which every
//! bind mount reports the path it was bound from. The first entry seen for a
//! given source anchors that source; later entries for the same source
//! resolve to `anchor.mount_point + entry.root`. The anchor map lives only
//! for one scan.

use crate::observability::metrics;
use crate::types::{MountEntry, MountInfo};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::convert::Infallible;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument};

pub mod mountinfo;

pub use mountinfo::ProcMountInfo;

/// Filesystem types that are always relevant: devtmpfs, FUSE filesystems,
/// NFS variants and overlay.
static RELEVANT_FS_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^devtmpfs|(?:fuse\..*)|(?:nfs\d?)|overlay$")
        .expect("Invalid fs type regex")
});

/// Source of raw mount table entries.
pub trait MountTable {
    type Error;

    fn entries(&self) -> Result<Vec<MountEntry>, Self::Error>;
}

impl MountTable for Vec<MountEntry> {
    type Error = Infallible;

    fn entries(&self) -> Result<Vec<MountEntry>, Self::Error> {
        Ok(self.clone())
    }
}

/// An entry is kept when its filesystem type is known-relevant or its
/// source is an absolute path.
pub fn is_relevant(entry: &MountEntry) -> bool {
    RELEVANT_FS_TYPE.is_match(&entry.fs_type)
        || Path::new(&entry.mount_source).has_root()
}

/// Filter `entries` and resolve bind-mount sources, in table order.
pub fn resolve(entries: &[MountEntry]) -> Vec<MountInfo> {
    let mut anchors: HashMap<&OsStr, &MountEntry> = HashMap::new();
    let mut resolved = Vec::with_capacity(entries.len());

    for entry in entries.iter().filter(|e| is_relevant(e)) {
        let source = match anchors.get(entry.mount_source.as_os_str()) {
            Some(anchor) => join_root(&anchor.mount_point, &entry.root),
            None => {
                anchors.insert(entry.mount_source.as_os_str(), entry);
                PathBuf::from(&entry.mount_source)
            }
        };

        resolved.push(MountInfo {
            device: entry.mount_source.clone(),
            path: entry.mount_point.clone(),
            fs_type: entry.fs_type.clone(),
            opts: entry.mount_opts.clone(),
            source,
        });
    }

    resolved
}

/// Mount points whose resolved source is `mnt_dir/volume_id`.
pub fn volume_mount_paths(
    mounts: &[MountInfo],
    mnt_dir: &Path,
    volume_id: &str,
) -> Vec<PathBuf> {
    let mnt_path = mnt_dir.join(volume_id);
    mounts.iter().filter(|m| m.source == mnt_path).map(|m| m.path.clone()).collect()
}

/// Append a mount-table root fragment to `base`, cleaning the result.
///
/// Unlike `Path::join`, an absolute `root` extends `base` instead of
/// replacing it.
pub fn join_root(base: &Path, root: impl AsRef<Path>) -> PathBuf {
    let mut joined = PathBuf::new();
    for component in base.components().chain(root.as_ref().components()) {
        match component {
            Component::Prefix(_) => joined.push(component.as_os_str()),
            Component::RootDir if joined.as_os_str().is_empty() => joined.push("/"),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                joined.pop();
            }
            Component::Normal(part) => joined.push(part),
        }
    }
    joined
}

/// Answers mount queries against a live mount table.
#[derive(Debug, Clone, Default)]
pub struct MountResolver<T> {
    table: T,
}

impl<T: MountTable> MountResolver<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// A fresh snapshot of the filtered, resolved mount table.
    #[instrument(skip(self))]
    pub fn mounts(&self) -> Result<Vec<MountInfo>, T::Error> {
        let entries = self.table.entries()?;
        let resolved = resolve(&entries);
        metrics::record_mount_scan();
        debug!(raw = entries.len(), relevant = resolved.len(), "scanned mount table");
        Ok(resolved)
    }

    /// Paths at which volume `volume_id` under `mnt_dir` is currently mounted.
    #[instrument(skip(self))]
    pub fn volume_mount_paths(
        &self,
        mnt_dir: &Path,
        volume_id: &str,
    ) -> Result<Vec<PathBuf>, T::Error> {
        Ok(volume_mount_paths(&self.mounts()?, mnt_dir, volume_id))
    }

    /// Whether volume `volume_id` is already mounted at `target`.
    pub fn is_mounted_at(
        &self,
        mnt_dir: &Path,
        volume_id: &str,
        target: &Path,
    ) -> Result<bool, T::Error> {
        Ok(self.volume_mount_paths(mnt_dir, volume_id)?.iter().any(|p| p == target))
    }
}

impl MountResolver<ProcMountInfo> {
    /// Resolver over the current process's mount table.
    pub fn host() -> Self {
        Self::new(ProcMountInfo::default())
    }
}
