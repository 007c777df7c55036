//! Core metrics definitions.
//!
//! All metrics follow Prometheus naming conventions (`_total` suffix for
//! counters). Without an installed recorder these calls are no-ops.

use metrics::{counter, describe_counter};

/// Register all core metrics with descriptions.
pub fn register_core_metrics() {
    describe_counter!("vfs_volumes_created_total", "Total number of volumes provisioned");
    describe_counter!("vfs_volumes_deleted_total", "Total number of volumes removed");
    describe_counter!(
        "vfs_store_errors_total",
        "Total volume store failures (by operation: get, create, delete, list)"
    );
    describe_counter!("vfs_mount_scans_total", "Total number of mount table scans");
}

pub fn record_volume_created() {
    counter!("vfs_volumes_created_total").increment(1);
}

pub fn record_volume_deleted() {
    counter!("vfs_volumes_deleted_total").increment(1);
}

pub fn record_store_error(operation: &'static str) {
    counter!("vfs_store_errors_total", "operation" => operation).increment(1);
}

pub fn record_mount_scan() {
    counter!("vfs_mount_scans_total").increment(1);
}
