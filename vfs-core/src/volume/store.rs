//! Volume lookup and provisioning over the volume root directory.

use crate::config::INFO_FILE_NAME;
use crate::error::{Result, VfsError};
use crate::observability::metrics;
use crate::types::CreateVolumeRequest;
use crate::volume::record::VolumeRecord;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, instrument};

/// Maps volume IDs to directories directly under the volume root.
#[derive(Debug, Clone)]
pub struct VolumeStore {
    vol_dir: PathBuf,
}

impl VolumeStore {
    /// `vol_dir` should already be canonical (see [`crate::paths::resolve`]).
    pub fn new(vol_dir: impl Into<PathBuf>) -> Self {
        Self { vol_dir: vol_dir.into() }
    }

    pub fn vol_dir(&self) -> &Path {
        &self.vol_dir
    }

    /// Directory that backs volume `id`, whether or not it exists.
    pub fn volume_path(&self, id: &str) -> PathBuf {
        self.vol_dir.join(id)
    }

    /// Look up a volume by ID or name.
    #[instrument(skip(self), fields(vol_dir = %self.vol_dir.display()))]
    pub fn get(&self, id: &str) -> Result<VolumeRecord> {
        if !is_single_component(id) {
            return Err(VfsError::not_found(self.volume_path(id)));
        }

        let vol_path = self.volume_path(id);
        self.require(&vol_path, "get")?;

        let info_path = vol_path.join(INFO_FILE_NAME);
        self.require(&info_path, "get")?;

        let mut record = VolumeRecord::bound(vol_path, info_path);
        record.load().inspect_err(|_| metrics::record_store_error("get"))?;
        Ok(record)
    }

    /// Report whether `path` exists. Errors other than "not found" are returned.
    pub fn exists(path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Provision a volume directory and persist its metadata.
    ///
    /// Creating a volume that already exists returns the stored record
    /// unchanged.
    #[instrument(skip(self, request), fields(volume = %request.name))]
    pub fn create(&self, request: &CreateVolumeRequest) -> Result<VolumeRecord> {
        if !is_single_component(&request.name) {
            return Err(VfsError::internal(format!("invalid volume name: {:?}", request.name)));
        }

        match self.get(&request.name) {
            Ok(existing) => {
                debug!("volume already exists");
                return Ok(existing);
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let vol_path = self.volume_path(&request.name);
        std::fs::create_dir_all(&vol_path).map_err(|e| {
            metrics::record_store_error("create");
            VfsError::internal_io(
                format!("failed to create volume directory: {}", vol_path.display()),
                e,
            )
        })?;

        let record =
            VolumeRecord::new(request.clone(), request.requested_capacity()).with_dir(&vol_path);
        record.save().inspect_err(|_| metrics::record_store_error("create"))?;

        metrics::record_volume_created();
        info!(path = %vol_path.display(), capacity_bytes = record.capacity_bytes, "created volume");
        Ok(record)
    }

    /// Remove a volume by deleting its directory.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<()> {
        if !is_single_component(id) {
            return Err(VfsError::not_found(self.volume_path(id)));
        }

        let vol_path = self.volume_path(id);
        self.require(&vol_path, "delete")?;

        std::fs::remove_dir_all(&vol_path).map_err(|e| {
            metrics::record_store_error("delete");
            VfsError::internal_io(
                format!("failed to remove volume directory: {}", vol_path.display()),
                e,
            )
        })?;

        metrics::record_volume_deleted();
        info!(path = %vol_path.display(), "deleted volume");
        Ok(())
    }

    /// All volumes under the root, sorted by name.
    ///
    /// Directories without a metadata file are skipped.
    #[instrument(skip(self), fields(vol_dir = %self.vol_dir.display()))]
    pub fn list(&self) -> Result<Vec<VolumeRecord>> {
        let read_err = |e: io::Error| {
            metrics::record_store_error("list");
            VfsError::internal_io(
                format!("failed to read volume directory: {}", self.vol_dir.display()),
                e,
            )
        };

        let mut records = Vec::new();
        for entry in std::fs::read_dir(&self.vol_dir).map_err(read_err)? {
            let vol_path = entry.map_err(read_err)?.path();
            if !vol_path.is_dir() {
                continue;
            }

            let info_path = vol_path.join(INFO_FILE_NAME);
            let has_info = Self::exists(&info_path).map_err(|e| {
                VfsError::internal_io(format!("failed to stat {}", info_path.display()), e)
            })?;
            if !has_info {
                debug!(path = %vol_path.display(), "skipping directory without volume info");
                continue;
            }

            let mut record = VolumeRecord::bound(vol_path, info_path);
            record.load().inspect_err(|_| metrics::record_store_error("list"))?;
            records.push(record);
        }

        records.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(records)
    }

    /// Fail with `NotFound` unless `path` exists.
    fn require(&self, path: &Path, operation: &'static str) -> Result<()> {
        match Self::exists(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(VfsError::not_found(path)),
            Err(e) => {
                metrics::record_store_error(operation);
                Err(VfsError::internal_io(format!("failed to stat {}", path.display()), e))
            }
        }
    }
}

/// Volume IDs name exactly one directory under the root.
fn is_single_component(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !id.contains('/')
}
