//! Core domain types for the VFS plugin.

pub mod mount;
pub mod volume;

pub use mount::{MountEntry, MountInfo};
pub use volume::{
    AccessMode, AccessModeKind, BlockVolume, CapacityRange, CreateVolumeRequest, MountVolume,
    Volume, VolumeCapability,
};
