use crate::config::INFO_FILE_NAME;
use crate::error::ErrorKind;
use crate::types::{CapacityRange, CreateVolumeRequest};
use crate::volume::{VolumeRecord, VolumeStore};
use tempfile::TempDir;

fn store() -> (TempDir, VolumeStore) {
    let tmp = TempDir::new().unwrap();
    let store = VolumeStore::new(tmp.path());
    (tmp, store)
}

fn request(name: &str, required: i64) -> CreateVolumeRequest {
    let mut req = CreateVolumeRequest::new(name);
    req.capacity_range = Some(CapacityRange { required_bytes: required, limit_bytes: 0 });
    req.parameters.insert("zone".to_string(), "a".to_string());
    req
}

#[test]
fn test_get_missing_directory() {
    let (_tmp, store) = store();
    let err = store.get("vol1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_get_directory_without_info_file() {
    let (tmp, store) = store();
    std::fs::create_dir(tmp.path().join("vol1")).unwrap();

    let err = store.get("vol1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains(INFO_FILE_NAME));
}

#[test]
fn test_get_rejects_path_escapes() {
    let (_tmp, store) = store();
    for id in ["", ".", "..", "a/b", "/etc"] {
        assert_eq!(store.get(id).unwrap_err().kind(), ErrorKind::NotFound, "id {:?}", id);
    }
}

#[test]
fn test_get_unparsable_info_is_internal() {
    let (tmp, store) = store();
    let dir = tmp.path().join("vol1");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join(INFO_FILE_NAME), b"{").unwrap();

    assert_eq!(store.get("vol1").unwrap_err().kind(), ErrorKind::Internal);
}

#[test]
fn test_create_and_get() {
    let (tmp, store) = store();
    let created = store.create(&request("vol1", 2048)).unwrap();
    assert_eq!(created.path(), tmp.path().join("vol1"));
    assert_eq!(created.capacity_bytes, 2048);

    let fetched = store.get("vol1").unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.info_path(), tmp.path().join("vol1").join(INFO_FILE_NAME));

    let view = fetched.to_public_view();
    assert_eq!(view.id, "vol1");
    assert_eq!(view.capacity_bytes, 2048);
    assert_eq!(view.attributes.get("zone").map(String::as_str), Some("a"));
}

#[test]
fn test_create_is_idempotent() {
    let (_tmp, store) = store();
    let first = store.create(&request("vol1", 2048)).unwrap();
    let second = store.create(&request("vol1", 9999)).unwrap();
    assert_eq!(second, first);
    assert_eq!(store.get("vol1").unwrap().capacity_bytes, 2048);
}

#[test]
fn test_create_completes_partial_directory() {
    let (tmp, store) = store();
    std::fs::create_dir(tmp.path().join("vol1")).unwrap();

    let created = store.create(&request("vol1", 1)).unwrap();
    assert_eq!(store.get("vol1").unwrap(), created);
}

#[test]
fn test_create_rejects_bad_names() {
    let (_tmp, store) = store();
    for name in ["", "..", "a/b"] {
        let err = store.create(&CreateVolumeRequest::new(name)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal, "name {:?}", name);
    }
}

#[test]
fn test_delete() {
    let (tmp, store) = store();
    store.create(&request("vol1", 1)).unwrap();
    std::fs::write(tmp.path().join("vol1").join("data.bin"), b"payload").unwrap();

    store.delete("vol1").unwrap();
    assert!(!tmp.path().join("vol1").exists());
    assert_eq!(store.get("vol1").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(store.delete("vol1").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_list_sorted_and_skips_strays() {
    let (tmp, store) = store();
    store.create(&request("beta", 2)).unwrap();
    store.create(&request("alpha", 1)).unwrap();
    std::fs::create_dir(tmp.path().join("no-info")).unwrap();
    std::fs::write(tmp.path().join("loose-file"), b"x").unwrap();

    let names: Vec<String> =
        store.list().unwrap().iter().map(|r| r.name().to_string()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[test]
fn test_list_empty_root() {
    let (_tmp, store) = store();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_exists() {
    let (tmp, _store) = store();
    assert!(VolumeStore::exists(tmp.path()).unwrap());
    assert!(!VolumeStore::exists(&tmp.path().join("nope")).unwrap());
}

#[cfg(unix)]
#[test]
fn test_exists_surfaces_other_errors() {
    let (tmp, _store) = store();
    let file = tmp.path().join("file");
    std::fs::write(&file, b"x").unwrap();

    // A path "under" a regular file fails with ENOTDIR, not ENOENT.
    assert!(VolumeStore::exists(&file.join("child")).is_err());
}

#[test]
fn test_record_survives_new_store_instance() {
    let (tmp, store) = store();
    store.create(&request("vol1", 77)).unwrap();
    drop(store);

    let reopened = VolumeStore::new(tmp.path());
    let vol_path = reopened.volume_path("vol1");
    let mut fresh = VolumeRecord::bound(&vol_path, vol_path.join(INFO_FILE_NAME));
    fresh.load().unwrap();
    assert_eq!(fresh.capacity_bytes, 77);
}
