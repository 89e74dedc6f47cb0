use super::path_history::{PathHistory, Raw};
use std::path::{Path, PathBuf};

fn chain(raw: &str) -> PathBuf {
    PathHistory::<Raw>::new(raw).strip_anchor().into_inner()
}

#[test]
fn strip_anchor_collapses_dots_without_filesystem() {
    assert_eq!(chain("/a/./b/../c"), Path::new("a/c"));
    assert_eq!(chain("/a/b/.."), Path::new("a"));
    assert_eq!(chain("/link/../readme.txt"), Path::new("readme.txt"));
}

#[test]
fn strip_anchor_drops_parent_dirs_at_the_anchor() {
    assert_eq!(chain("/../unsafe/readme.txt"), Path::new("unsafe/readme.txt"));
    assert_eq!(chain("/../../../../etc/passwd"), Path::new("etc/passwd"));
    assert_eq!(chain("/.."), Path::new(""));
}

#[test]
fn strip_anchor_never_yields_parent_or_root_components() {
    for raw in ["/../x/../..", "/a/../../b", "/./../.", "/x//y/", "/"] {
        let stripped = chain(raw);
        assert!(
            stripped
                .components()
                .all(|c| matches!(c, std::path::Component::Normal(_))),
            "unexpected component in {stripped:?} (from {raw})"
        );
    }
}

#[test]
fn with_suffix_appends_to_final_component() {
    let anchored = PathHistory::<Raw>::new("/docs/readme").strip_anchor();
    let extended = anchored.with_suffix(".md").unwrap();
    assert_eq!(extended.into_inner(), Path::new("docs/readme.md"));

    let dotted = PathHistory::<Raw>::new("/readme.").strip_anchor();
    assert_eq!(
        dotted.with_suffix("txt").unwrap().into_inner(),
        Path::new("readme.txt")
    );
}

#[test]
fn with_suffix_on_empty_chain_is_none() {
    let anchored = PathHistory::<Raw>::new("/..").strip_anchor();
    assert!(anchored.with_suffix(".txt").is_none());
}

#[test]
fn containment_is_component_wise() {
    let temp = tempfile::tempdir().unwrap();
    let safe = temp.path().join("safe");
    let sibling = temp.path().join("safe2");
    std::fs::create_dir(&safe).unwrap();
    std::fs::create_dir(&sibling).unwrap();

    let root = PathHistory::<Raw>::new(&safe).canonicalize().unwrap();
    let outside = PathHistory::<Raw>::new(&sibling).canonicalize().unwrap();
    assert!(outside.contained_in(&root).is_err());

    let itself = PathHistory::<Raw>::new(&safe).canonicalize().unwrap();
    assert!(itself.contained_in(&root).is_ok());
}

#[test]
fn canonicalize_under_keeps_missing_tail() {
    let temp = tempfile::tempdir().unwrap();
    let root = PathHistory::<Raw>::new(temp.path()).canonicalize().unwrap();
    let resolved = PathHistory::<Raw>::new("/missing/file.txt")
        .strip_anchor()
        .canonicalize_under(&root)
        .unwrap();
    assert_eq!(resolved.into_inner(), root.join("missing").join("file.txt"));
}
