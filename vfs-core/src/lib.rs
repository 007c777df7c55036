//! VFS volume plugin core.
//!
//! Durable volume metadata kept as plain directories under a volume root,
//! and a mount table resolver that answers "where is this volume mounted"
//! through layers of bind mounts.

pub mod config;
pub mod error;
pub mod mounts;
pub mod observability;
pub mod paths;
pub mod types;
pub mod volume;

// Re-export commonly used items
pub use config::Config;
pub use error::{ErrorKind, Result, VfsError};
pub use mounts::{MountResolver, MountTable, ProcMountInfo};
pub use observability::init as init_observability;
pub use paths::PluginPaths;
pub use types::{CreateVolumeRequest, MountEntry, MountInfo, Volume};
pub use volume::{VolumeRecord, VolumeStore};
