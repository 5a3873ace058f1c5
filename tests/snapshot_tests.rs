use folio::cache::SnapshotStore;
use folio::content::{Pagination, ResourceRequest};
use tempfile::TempDir;

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf(), 600);

    let data = vec!["weddings".to_string(), "portraits".to_string()];
    store.save("/categories?active_only=true", &data).unwrap();

    let result: Option<Vec<String>> = store.load("/categories?active_only=true");
    assert_eq!(result, Some(data));
}

#[test]
fn test_missing_key_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf(), 600);

    let result: Option<Vec<String>> = store.load("/services?active_only=true");
    assert_eq!(result, None);
}

#[test]
fn test_expired_snapshot_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf(), 0);

    store.save("/photographer", &42u32).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let result: Option<u32> = store.load("/photographer");
    assert_eq!(result, None);
}

#[test]
fn test_colliding_file_names_do_not_mix_keys() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf(), 600);

    // Both sanitize to the same file name.
    store.save("/photos?page=1", &1u32).unwrap();
    let other: Option<u32> = store.load("/photos_page=1");
    assert_eq!(other, None);
    assert_eq!(store.load::<u32>("/photos?page=1"), Some(1));
}

#[test]
fn test_payload_shape_mismatch_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf(), 600);

    store.save("/testimonials", &"not a list").unwrap();
    let result: Option<Vec<u32>> = store.load("/testimonials");
    assert_eq!(result, None);
}

#[test]
fn test_paginated_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf(), 600);
    let key = ResourceRequest::photos(Some("weddings"), 2, 10).cache_key();

    let pagination = Pagination {
        total: 25,
        page: 2,
        per_page: 10,
        total_pages: 3,
    };
    store
        .save(&key, &(vec!["p11".to_string()], Some(pagination)))
        .unwrap();

    let (data, loaded): (Vec<String>, Option<Pagination>) = store.load(&key).unwrap();
    assert_eq!(data, vec!["p11"]);
    assert_eq!(loaded, Some(pagination));
}

#[test]
fn test_clear() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf(), 600);

    store.save("/categories", &1u32).unwrap();
    store.save("/services", &2u32).unwrap();
    store.clear().unwrap();

    assert_eq!(store.load::<u32>("/categories"), None);
    assert_eq!(store.load::<u32>("/services"), None);
}

#[test]
fn test_clear_missing_dir_is_ok() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().join("never-created"), 600);
    assert!(store.clear().is_ok());
}
