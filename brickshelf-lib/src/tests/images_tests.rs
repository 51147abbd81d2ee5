use super::*;
use tempfile::TempDir;

fn source_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"not really an image").unwrap();
    path
}

#[test]
fn test_sanitize_code() {
    assert_eq!(sanitize_code("10276"), "10276");
    assert_eq!(sanitize_code("a/b\\c:d*e?f\"g<h>i|j k"), "a_b_c_d_e_f_g_h_i_j_k");
}

#[test]
fn test_file_name() {
    assert_eq!(image_file_name(RecordId(7), "SW 001/2", "png"), "7_SW_001_2.png");
}

#[test]
fn test_store_copies_into_library() {
    let src = TempDir::new().unwrap();
    let lib_dir = TempDir::new().unwrap();
    let library = ImageLibrary::new(lib_dir.path().join("images"));

    let source = source_file(&src, "photo.PNG");
    let filename = library.store_image(RecordId(3), "10276", &source).unwrap();

    assert_eq!(filename, "3_10276.png");
    let stored = library.image_path(&filename);
    assert_eq!(std::fs::read(stored).unwrap(), b"not really an image");
    assert!(source.exists());
}

#[test]
fn test_missing_extension_defaults_to_jpg() {
    let src = TempDir::new().unwrap();
    let lib_dir = TempDir::new().unwrap();
    let library = ImageLibrary::new(lib_dir.path());

    let source = source_file(&src, "photo");
    let filename = library.store_image(RecordId(1), "6080", &source).unwrap();
    assert_eq!(filename, "1_6080.jpg");
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let src = TempDir::new().unwrap();
    let lib_dir = TempDir::new().unwrap();
    let library = ImageLibrary::new(lib_dir.path());

    let source = source_file(&src, "notes.txt");
    match library.store_image(RecordId(1), "6080", &source) {
        Err(ImageError::UnsupportedType(ext)) => assert_eq!(ext, "txt"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(std::fs::read_dir(lib_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_remove_is_idempotent() {
    let src = TempDir::new().unwrap();
    let lib_dir = TempDir::new().unwrap();
    let library = ImageLibrary::new(lib_dir.path());

    let filename = library
        .store_image(RecordId(2), "42", &source_file(&src, "a.gif"))
        .unwrap();
    library.remove_image(&filename).unwrap();
    assert!(!library.image_path(&filename).exists());
    library.remove_image(&filename).unwrap();
}

#[test]
fn test_image_path_stays_inside_library() {
    let library = ImageLibrary::new("/lib");
    assert_eq!(library.image_path("../../etc/passwd"), PathBuf::from("/lib/passwd"));
}
