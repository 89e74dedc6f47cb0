use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;


/// `base/{safe,unsafe,safe/unsafe}` each holding a `readme.txt` named after
/// its directory.
struct Layout {
    base: TempDir,
}

impl Layout {
    fn new() -> Self {
        let base = tempfile::tempdir().unwrap();
        fs::create_dir_all(base.path().join("safe").join("unsafe")).unwrap();
        fs::create_dir(base.path().join("unsafe")).unwrap();
        fs::write(base.path().join("safe").join("readme.txt"), "safe").unwrap();
        fs::write(
            base.path().join("safe").join("unsafe").join("readme.txt"),
            "safe_unsafe",
        )
        .unwrap();
        fs::write(base.path().join("unsafe").join("readme.txt"), "unsafe").unwrap();
        Self { base }
    }

    fn base(&self) -> PathBuf {
        self.base.path().to_path_buf()
    }

    fn safe(&self) -> PathBuf {
        self.base.path().join("safe")
    }

    fn unsafe_dir(&self) -> PathBuf {
        self.base.path().join("unsafe")
    }
}
