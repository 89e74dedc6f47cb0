//! Shared workloads for the resolution benchmarks.

use std::path::{Path, PathBuf};
use std::{fs, io};
use tempfile::TempDir;

/// A static site: `page_N.md` / `page_N.txt` files and the request paths a
/// server would receive for them, with some traversal attempts mixed in.
pub struct SiteWorkload {
    _temp_dir: TempDir,
    site_root: PathBuf,
    requests: Vec<String>,
}

impl SiteWorkload {
    pub fn new(page_count: usize) -> io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let site_root = temp_dir.path().join("site");
        fs::create_dir_all(site_root.join("docs"))?;
        for i in 0..page_count {
            let ext = if i % 2 == 0 { "md" } else { "txt" };
            fs::write(site_root.join("docs").join(format!("page_{i}.{ext}")), "content")?;
        }

        let requests = (0..page_count)
            .map(|i| match i % 4 {
                0 => format!("/docs/page_{i}"),
                1 => format!("docs/page_{i}"),
                2 => format!("../docs/page_{i}"),
                _ => format!("docs/./sub/../page_{i}"),
            })
            .collect();

        Ok(Self {
            _temp_dir: temp_dir,
            site_root,
            requests,
        })
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}
