//! Integration tests for mount table resolution against realistic tables.

use std::io::Write;
use std::path::{Path, PathBuf};
use vfs_core::mounts::{self, MountResolver};
use vfs_core::{MountEntry, ProcMountInfo};

/// A node that published volume `vol1` through plain bind mounts (one of a
/// sub-directory) and twice through bindfs.
const NODE_TABLE: &str = "\
22 1 8:1 / / rw,relatime shared:1 - ext4 /dev/sda1 rw
25 22 0:21 / /proc rw,nosuid shared:12 - proc proc rw
27 22 0:23 / /run rw,nosuid,nodev shared:5 - tmpfs tmpfs rw,mode=755
60 22 8:1 /csi/vol/vol1 /csi/mnt/vol1 rw,relatime shared:1 - ext4 /dev/sda1 rw
61 22 8:1 /csi/mnt/vol1 /pods/a/volume rw,relatime shared:1 - ext4 /dev/sda1 rw
62 22 8:1 /csi/mnt/vol1/data /pods/b/data rw,relatime shared:1 - ext4 /dev/sda1 rw
70 22 0:40 / /pods/c/volume rw,nosuid,nodev - fuse.bindfs /csi/mnt/vol1 rw
71 22 0:41 / /pods/d/volume rw,nosuid,nodev - fuse.bindfs /csi/mnt/vol1 rw
80 22 0:50 / /shared nfs-opts - nfs4 filer:/export rw
";

fn entry(source: &str, point: &str, root: &str) -> MountEntry {
    MountEntry::new(source, point, "ext4", root)
}

#[test]
fn test_bind_chain_queries() {
    let entries = vec![
        entry("/dev/sda1", "/mnt/vol1", "/"),
        entry("/dev/sda1", "/published/x", "/subdir"),
        entry("/dev/sda1", "/published/y", "/"),
    ];
    let resolver = MountResolver::new(entries);

    let resolved = resolver.mounts().unwrap();
    assert_eq!(resolved[1].source, PathBuf::from("/mnt/vol1/subdir"));
    assert_eq!(resolved[2].source, PathBuf::from("/mnt/vol1"));

    let paths = resolver.volume_mount_paths(Path::new("/mnt"), "vol1").unwrap();
    assert_eq!(paths, vec![PathBuf::from("/published/y")]);
    assert!(resolver.volume_mount_paths(Path::new("/mnt"), "vol9").unwrap().is_empty());
}

#[test]
fn test_node_table_from_mountinfo() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(NODE_TABLE.as_bytes()).unwrap();
    let resolver = MountResolver::new(ProcMountInfo::new(file.path()));

    let resolved = resolver.mounts().unwrap();
    let kept: Vec<&Path> = resolved.iter().map(|m| m.path.as_path()).collect();
    assert!(!kept.contains(&Path::new("/proc")));
    assert!(!kept.contains(&Path::new("/run")));
    assert!(kept.contains(&Path::new("/shared")));

    // The bind mount of the staging directory resolves through the "/" anchor.
    let staged = resolved.iter().find(|m| m.path == Path::new("/pods/a/volume")).unwrap();
    assert_eq!(staged.source, PathBuf::from("/csi/mnt/vol1"));
    assert_eq!(staged.device, "/dev/sda1");

    // A second mount of the same bindfs source collapses onto the first one.
    let chained = resolved.iter().find(|m| m.path == Path::new("/pods/d/volume")).unwrap();
    assert_eq!(chained.source, PathBuf::from("/pods/c/volume"));

    let mut paths = resolver.volume_mount_paths(Path::new("/csi/mnt"), "vol1").unwrap();
    paths.sort();
    assert_eq!(paths, vec![PathBuf::from("/pods/a/volume"), PathBuf::from("/pods/c/volume")]);

    assert!(resolver
        .is_mounted_at(Path::new("/csi/mnt"), "vol1", Path::new("/pods/c/volume"))
        .unwrap());
    assert!(!resolver
        .is_mounted_at(Path::new("/csi/mnt"), "vol1", Path::new("/pods/b/data"))
        .unwrap());
}

#[test]
fn test_each_scan_starts_fresh() {
    let entries = vec![entry("/dev/sdb1", "/first", "/"), entry("/dev/sdb1", "/second", "/")];
    let resolver = MountResolver::new(entries.clone());
    assert_eq!(resolver.mounts().unwrap(), resolver.mounts().unwrap());

    // Scanning the tail alone makes "/second" the anchor.
    let tail = mounts::resolve(&entries[1..]);
    assert_eq!(tail[0].source, PathBuf::from("/dev/sdb1"));
}

#[test]
fn test_unreadable_table_passes_io_error_through() {
    let resolver = MountResolver::new(ProcMountInfo::new("/nonexistent/mountinfo"));
    let err = resolver.volume_mount_paths(Path::new("/mnt"), "vol1").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
