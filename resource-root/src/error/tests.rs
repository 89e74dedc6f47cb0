use super::*;
use std::io;

#[test]
fn truncate_display_preserves_short_targets() {
    let rendered = truncate_display("docs/readme.txt", 256);
    assert_eq!(rendered, "docs/readme.txt");
}

#[test]
fn truncate_display_inserts_ellipsis_for_long_targets() {
    let segment = "verylongcomponent".repeat(20);
    let target = format!("../{segment}/tail.txt");
    let max_len = 48;
    let rendered = truncate_display(&target, max_len);
    assert!(rendered.chars().count() <= max_len);
    assert!(rendered.contains("..."));
    assert!(rendered.starts_with("../"));
    assert!(rendered.ends_with("tail.txt"));
}

#[test]
fn error_sources_are_reported() {
    let invalid = ResourceRootError::InvalidRoot {
        root: PathBuf::from("/root"),
        source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    };
    assert!(invalid.source().is_some());

    let decode = ResourceRootError::decode(".md", "bad markup".into());
    let source = decode.source().expect("decode keeps its source");
    assert_eq!(source.to_string(), "bad markup");

    let not_found = ResourceRootError::not_found("link/readme.txt");
    assert!(not_found.source().is_none());
    assert!(not_found.is_not_found());

    let configuration = ResourceRootError::configuration("no client");
    assert!(configuration.source().is_none());
    assert!(!configuration.is_not_found());
}

#[test]
fn not_found_display_mentions_only_the_target() {
    let error = ResourceRootError::not_found("../unsafe/readme.txt");
    let rendered = error.to_string();
    assert!(rendered.contains("not found"));
    assert!(rendered.contains("../unsafe/readme.txt"));
}

#[test]
fn decode_display_names_the_extension() {
    let error = ResourceRootError::decode(".rst", "unterminated directive".into());
    let rendered = error.to_string();
    assert!(rendered.contains("'.rst'"));
    assert!(rendered.contains("unterminated directive"));
}
