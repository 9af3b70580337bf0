use blogstore::codec::encode_id;
use blogstore::model::{Attachment, Header, Index, Item};
use blogstore::store::backend::StorageBackend;
use blogstore::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("blog"));
    (dir, backend)
}

fn persisted_header(sequence: u64, name: &str) -> Header {
    let mut header = Header::new(name, "ann");
    header.id = Some(encode_id(sequence));
    header
}

#[test]
fn test_fs_backend_item_io() {
    let (_dir, backend) = setup();
    let header = persisted_header(1, "Hello");
    let id = header.id.clone().unwrap();
    let item = Item::new(header, "Hello World")
        .with_files(vec![Attachment::new("a.txt", "blob://a")]);

    backend.save_item(&id, &item).unwrap();

    let loaded = backend.load_item(&id).unwrap();
    assert_eq!(loaded, item);
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();
    let header = persisted_header(1, "Atomic");
    let id = header.id.clone().unwrap();

    backend.save_item(&id, &Item::new(header, "Atomic")).unwrap();
    backend.save_index(&Index::new()).unwrap();

    for dir in [backend.root().to_path_buf(), backend.items_dir()] {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }
}

#[test]
fn test_fs_backend_index_io() {
    let (_dir, backend) = setup();
    assert!(backend.load_index().unwrap().is_none());

    let index = Index {
        headers: vec![persisted_header(1, "One"), persisted_header(2, "Two")],
        initialised: true,
    };
    backend.save_index(&index).unwrap();

    let loaded = backend.load_index().unwrap().unwrap();
    assert_eq!(loaded.headers, index.headers);
    assert!(!loaded.initialised);
}

#[test]
fn test_fs_backend_layout() {
    let (dir, backend) = setup();
    let header = persisted_header(7, "Layout");
    let id = header.id.clone().unwrap();

    backend.save_index(&Index::new()).unwrap();
    backend.save_item(&id, &Item::new(header, "")).unwrap();

    let root = dir.path().join("blog");
    assert!(root.join("index.json").is_file());
    assert!(root.join("blogsitems").join(format!("{}.json", id)).is_file());
}

#[test]
fn test_fs_backend_custom_folder_and_extension() {
    let (dir, backend) = setup();
    let backend = backend.with_items_folder("posts").with_extension("dat");
    let header = persisted_header(1, "Custom");
    let id = header.id.clone().unwrap();

    backend.save_index(&Index::new()).unwrap();
    backend.save_item(&id, &Item::new(header, "")).unwrap();

    let root = dir.path().join("blog");
    assert!(root.join("index.dat").is_file());
    assert!(root.join("posts").join(format!("{}.dat", id)).is_file());
}

#[test]
fn test_fs_backend_index_file_format() {
    let (_dir, backend) = setup();
    backend
        .save_index(&Index {
            headers: vec![persisted_header(1, "One")],
            initialised: false,
        })
        .unwrap();

    let raw = fs::read_to_string(backend.index_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let headers = json["Headers"].as_array().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0]["Id"], encode_id(1));
    assert_eq!(headers[0]["Name"], "One");
    assert!(headers[0].get("Content").is_none());
}
