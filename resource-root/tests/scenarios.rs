use resource_root::{
    identity, text_filter, ExtensionMap, ExtensionOverlayRoot, FilesystemRoot, ResourceRoot,
    ResourceRootError,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `base/safe/readme.txt`, `base/safe/unsafe/readme.txt` and the
/// sibling `base/unsafe/readme.txt` outside the sandbox.
fn create_test_directory(base: &Path) -> std::io::Result<PathBuf> {
    let safe = base.join("safe");
    fs::create_dir_all(safe.join("unsafe"))?;
    fs::create_dir_all(base.join("unsafe"))?;
    fs::write(safe.join("readme.txt"), "safe")?;
    fs::write(safe.join("unsafe").join("readme.txt"), "safe_unsafe")?;
    fs::write(base.join("unsafe").join("readme.txt"), "unsafe")?;
    Ok(safe)
}

#[test]
fn absolute_and_relative_targets_read_the_same_file() {
    let temp = tempfile::tempdir().unwrap();
    let safe = create_test_directory(temp.path()).unwrap();
    let root = FilesystemRoot::try_new(safe).unwrap();

    assert_eq!(root.read("/readme.txt").unwrap(), b"safe");
    assert_eq!(root.text("readme.txt").unwrap(), "safe");
    assert_eq!(
        root.resolve("/readme.txt").unwrap(),
        root.resolve("readme.txt").unwrap()
    );
}

#[test]
fn traversal_lands_in_the_sandbox_subtree() {
    let temp = tempfile::tempdir().unwrap();
    let safe = create_test_directory(temp.path()).unwrap();
    let root = FilesystemRoot::try_new(safe).unwrap();

    assert_eq!(root.text("../unsafe/readme.txt").unwrap(), "safe_unsafe");
    assert_eq!(root.resolve("../x").unwrap(), root.resolve("x").unwrap());
}

#[cfg(unix)]
#[test]
fn symlink_out_of_the_sandbox_is_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let safe = create_test_directory(temp.path()).unwrap();
    std::os::unix::fs::symlink(temp.path().join("unsafe"), safe.join("link")).unwrap();
    let root = FilesystemRoot::try_new(&safe).unwrap();

    assert!(matches!(
        root.resolve("link"),
        Err(ResourceRootError::NotFound { .. })
    ));
    match root.text("link/readme.txt") {
        Err(ResourceRootError::NotFound { target }) => assert_eq!(target, "link/readme.txt"),
        Ok(content) => panic!("escaped the sandbox and read {content:?}"),
        Err(other) => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn overlay_reads_through_identity_decoder() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("readme.txt"), "text file").unwrap();
    let root =
        ExtensionOverlayRoot::try_new(temp.path(), ExtensionMap::new().with(".txt", identity))
            .unwrap();
    assert_eq!(root.text("readme").unwrap(), "text file");
}

#[test]
fn overlay_precedence_and_malformed_entries() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("readme.md"), "A").unwrap();
    fs::write(temp.path().join("readme.txt"), "B").unwrap();

    let map = ExtensionMap::new()
        .with(".md", text_filter(|text| format!("f1({text})")))
        .with(".txt", text_filter(|text| format!("f2({text})")));
    let root = ExtensionOverlayRoot::try_new(temp.path(), map).unwrap();
    assert_eq!(root.text("readme").unwrap(), "f1(A)");

    let malformed = ExtensionOverlayRoot::try_new(
        temp.path(),
        ExtensionMap::new().with("txt", identity),
    )
    .unwrap();
    assert!(malformed.text("readme").unwrap_err().is_not_found());
}

#[test]
fn roots_compose_behind_the_trait() {
    let temp = tempfile::tempdir().unwrap();
    let safe = create_test_directory(temp.path()).unwrap();
    let roots: Vec<(Box<dyn ResourceRoot>, &str)> = vec![
        (Box::new(FilesystemRoot::try_new(&safe).unwrap()), "readme.txt"),
        (
            Box::new(
                ExtensionOverlayRoot::try_new(&safe, ExtensionMap::new().with(".txt", identity))
                    .unwrap(),
            ),
            "readme",
        ),
    ];
    for (root, target) in &roots {
        assert_eq!(root.text((*target).into()).unwrap(), "safe");
    }
}

#[cfg(feature = "serde")]
#[test]
fn json_targets_from_a_request_body() {
    use resource_root::Target;

    let temp = tempfile::tempdir().unwrap();
    let safe = create_test_directory(temp.path()).unwrap();
    let root = FilesystemRoot::try_new(safe).unwrap();

    let body: serde_json::Value =
        serde_json::from_str(r#"{"a": "../readme.txt", "b": ["unsafe", "readme.txt"], "c": 3}"#)
            .unwrap();
    let a = Target::from_json_value(&body["a"]).unwrap();
    let b = Target::from_json_value(&body["b"]).unwrap();
    assert_eq!(root.text(a).unwrap(), "safe");
    assert_eq!(root.text(b).unwrap(), "safe_unsafe");
    assert!(matches!(
        Target::from_json_value(&body["c"]),
        Err(ResourceRootError::InvalidInput { .. })
    ));
}
