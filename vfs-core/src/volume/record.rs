//! Persistent volume metadata.
//!
//! Each volume directory carries one `.info.json` file:
//!
//! ```json
//! {
//!   "capacity_bytes": 1073741824,
//!   "create_request": { "name": "vol1", "parameters": { "tier": "gold" } }
//! }
//! ```
//!
//! `create_request` is written in the RPC protocol's own JSON mapping and is
//! decoded separately from the envelope, so a change in the request schema
//! cannot corrupt `capacity_bytes`.

use crate::config::INFO_FILE_NAME;
use crate::error::{Result, VfsError};
use crate::types::{CreateVolumeRequest, Volume};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[derive(Serialize)]
struct InfoFileRef<'a> {
    capacity_bytes: i64,
    create_request: &'a CreateVolumeRequest,
}

#[derive(Deserialize)]
struct InfoFile {
    #[serde(default)]
    capacity_bytes: i64,
    create_request: Box<RawValue>,
}

/// A volume's identity, creation parameters and capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeRecord {
    /// The request the volume was created from
    pub request: CreateVolumeRequest,

    /// Recorded capacity in bytes
    pub capacity_bytes: i64,

    path: PathBuf,
    info_path: PathBuf,
}

impl VolumeRecord {
    /// Create a record that is not yet associated with a directory.
    pub fn new(request: CreateVolumeRequest, capacity_bytes: i64) -> Self {
        Self { request, capacity_bytes, ..Default::default() }
    }

    /// An empty record bound to explicit paths, ready for [`load`](Self::load).
    pub fn bound(path: impl Into<PathBuf>, info_path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), info_path: info_path.into(), ..Default::default() }
    }

    /// Associate the record with its backing directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.path = dir.into();
        self.info_path = self.path.join(INFO_FILE_NAME);
        self
    }

    pub fn name(&self) -> &str {
        &self.request.name
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.request.parameters
    }

    /// Directory backing the volume.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the metadata file.
    pub fn info_path(&self) -> &Path {
        &self.info_path
    }

    pub fn to_public_view(&self) -> Volume {
        Volume {
            id: self.request.name.clone(),
            capacity_bytes: self.capacity_bytes,
            attributes: self.request.parameters.clone(),
        }
    }

    /// Write the metadata file, replacing any previous contents.
    #[instrument(skip(self), fields(volume = %self.request.name))]
    pub fn save(&self) -> Result<()> {
        if self.info_path.as_os_str().is_empty() {
            return Err(VfsError::internal("failed to create volume info file: empty path"));
        }

        let file = File::create(&self.info_path).map_err(|e| {
            VfsError::internal_io(
                format!("failed to create volume info file: {}", self.info_path.display()),
                e,
            )
        })?;

        let mut writer = BufWriter::new(file);
        let info =
            InfoFileRef { capacity_bytes: self.capacity_bytes, create_request: &self.request };
        serde_json::to_writer_pretty(&mut writer, &info)
            .map_err(|e| VfsError::internal(format!("failed to marshal volume: {}", e)))?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| {
                VfsError::internal_io(
                    format!("failed to write volume info file: {}", self.info_path.display()),
                    e,
                )
            })?;

        debug!(info_path = %self.info_path.display(), "saved volume info");
        Ok(())
    }

    /// Replace the record's fields with the contents of the metadata file.
    #[instrument(skip(self), fields(info_path = %self.info_path.display()))]
    pub fn load(&mut self) -> Result<()> {
        if self.info_path.as_os_str().is_empty() {
            return Err(VfsError::internal("failed to load volume info file: empty path"));
        }

        let file = File::open(&self.info_path).map_err(|e| {
            VfsError::internal_io(
                format!("failed to open volume info file: {}", self.info_path.display()),
                e,
            )
        })?;

        let info: InfoFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| VfsError::internal(format!("failed to unmarshal volume: {}", e)))?;
        let request: CreateVolumeRequest = serde_json::from_str(info.create_request.get())
            .map_err(|e| {
                VfsError::internal(format!("failed to unmarshal create request: {}", e))
            })?;

        self.request = request;
        self.capacity_bytes = info.capacity_bytes;
        Ok(())
    }
}
