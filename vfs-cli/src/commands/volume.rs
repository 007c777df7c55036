//! Volume management commands for the VFS CLI.
//!
//! - vfsctl volume ls
//! - vfsctl volume create
//! - vfsctl volume rm
//! - vfsctl volume inspect
//! - vfsctl volume mounts

use anyhow::{Context, Result};
use tabled::{Table, Tabled};
use vfs_core::types::CapacityRange;
use vfs_core::{CreateVolumeRequest, MountResolver, PluginPaths, VolumeStore};

/// List all volumes
pub fn ls(dirs: &PluginPaths) -> Result<()> {
    let volumes = VolumeStore::new(&dirs.vol).list().context("Failed to list volumes")?;

    if volumes.is_empty() {
        println!("No volumes found.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct VolumeRow {
        #[tabled(rename = "VOLUME NAME")]
        name: String,
        #[tabled(rename = "CAPACITY")]
        capacity: String,
        #[tabled(rename = "PATH")]
        path: String,
    }

    let rows: Vec<VolumeRow> = volumes
        .iter()
        .map(|v| VolumeRow {
            name: v.name().to_string(),
            capacity: format_size(v.capacity_bytes),
            path: v.path().display().to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}

/// Create a new volume
pub fn create(
    dirs: &PluginPaths,
    name: &str,
    capacity: Option<i64>,
    params: Vec<(String, String)>,
) -> Result<()> {
    let request = CreateVolumeRequest {
        name: name.to_string(),
        capacity_range: capacity
            .map(|bytes| CapacityRange { required_bytes: bytes, limit_bytes: 0 }),
        parameters: params.into_iter().collect(),
        ..Default::default()
    };

    let record = VolumeStore::new(&dirs.vol)
        .create(&request)
        .with_context(|| format!("Failed to create volume '{}'", name))?;

    println!("{}", record.name());
    Ok(())
}

/// Remove a volume
pub fn rm(dirs: &PluginPaths, name: &str) -> Result<()> {
    VolumeStore::new(&dirs.vol)
        .delete(name)
        .with_context(|| format!("Failed to remove volume '{}'", name))?;
    println!("{}", name);
    Ok(())
}

/// Inspect a volume
pub fn inspect(dirs: &PluginPaths, name: &str) -> Result<()> {
    let record = VolumeStore::new(&dirs.vol)
        .get(name)
        .with_context(|| format!("Volume '{}' not found", name))?;

    let json = serde_json::to_string_pretty(&record.to_public_view())?;
    println!("{}", json);
    Ok(())
}

/// Show where a volume is mounted
pub fn mounts(dirs: &PluginPaths, name: &str) -> Result<()> {
    let mut paths = MountResolver::host()
        .volume_mount_paths(&dirs.mnt, name)
        .context("Failed to read mount table")?;

    if paths.is_empty() {
        println!("Volume '{}' is not mounted.", name);
        return Ok(());
    }

    paths.sort();
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size.abs() >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
