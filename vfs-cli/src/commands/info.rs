//! Plugin identity and directory report.

use anyhow::Result;
use vfs_core::config::{PLUGIN_NAME, SUPPORTED_VERSIONS, VENDOR_VERSION};
use vfs_core::PluginPaths;

pub fn info(dirs: &PluginPaths) -> Result<()> {
    println!("{:<20} {}", "Plugin:", PLUGIN_NAME);
    println!("{:<20} {}", "Version:", VENDOR_VERSION);
    println!("{:<20} {}", "Supported versions:", SUPPORTED_VERSIONS);
    println!("{:<20} {}", "Data dir:", dirs.data.display());
    println!("{:<20} {}", "Device dir:", dirs.dev.display());
    println!("{:<20} {}", "Mount dir:", dirs.mnt.display());
    println!("{:<20} {}", "Volume dir:", dirs.vol.display());
    println!("{:<20} {}", "Bind-mount tool:", dirs.bindfs);
    Ok(())
}
