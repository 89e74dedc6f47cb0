// Type-state record of what has been proven about a path during resolution.
use soft_canonicalize::soft_canonicalize;
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::marker::PhantomData;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Raw;
#[derive(Debug, Clone)]
pub struct Anchored;
#[derive(Debug, Clone)]
pub struct Canonicalized;
#[derive(Debug, Clone)]
pub struct Directory;
#[derive(Debug, Clone)]
pub struct Contained;
#[derive(Debug, Clone)]
pub struct RegularFile;

#[derive(Debug, Clone)]
pub struct PathHistory<History> {
    inner: PathBuf,
    _marker: PhantomData<History>,
}

impl<H> AsRef<Path> for PathHistory<H> {
    #[inline]
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl<H> Deref for PathHistory<H> {
    type Target = Path;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl PathHistory<Raw> {
    #[inline]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        PathHistory {
            inner: path.into(),
            _marker: PhantomData,
        }
    }
}

impl<H> PathHistory<H> {
    #[inline]
    fn advance<Next>(inner: PathBuf) -> PathHistory<Next> {
        PathHistory {
            inner,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn into_inner(self) -> PathBuf {
        self.inner
    }

    /// Collapses `.` and `..` lexically and drops every root or prefix
    /// component, leaving a relative chain made only of normal components.
    ///
    /// Semantics:
    /// - The raw path is expected to start at the OS root anchor, so `..`
    ///   at the anchor has nothing to consume and is dropped.
    /// - A root or prefix met later (a segment that was itself absolute)
    ///   restarts the chain, as joining it onto the anchor would.
    /// - Never consults the filesystem.
    pub fn strip_anchor(self) -> PathHistory<(H, Anchored)> {
        let mut parts: Vec<OsString> = Vec::new();
        for comp in self.inner.components() {
            match comp {
                Component::Normal(name) => parts.push(name.to_os_string()),
                Component::CurDir => {}
                Component::ParentDir => {
                    parts.pop();
                }
                Component::RootDir | Component::Prefix(_) => parts.clear(),
            }
        }
        Self::advance(parts.into_iter().collect())
    }

    /// Re-anchors this path under `root` and canonicalizes it once,
    /// following whatever symlinks exist. Missing trailing components are
    /// kept lexically.
    ///
    /// A dangling link whose destination has no existing parent survives
    /// soft canonicalization as-is; it is read and followed here so the
    /// result names where the link points.
    pub fn canonicalize_under(
        self,
        root: &Path,
    ) -> std::io::Result<PathHistory<(H, Canonicalized)>> {
        let mut canon = soft_canonicalize(root.join(&self.inner))?;
        for _ in 0..MAX_LINK_HOPS {
            match dangling_link(&canon)? {
                Some(destination) => canon = soft_canonicalize(destination)?,
                None => return Ok(Self::advance(canon)),
            }
        }
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "too many levels of symbolic links",
        ))
    }

    pub fn canonicalize(self) -> std::io::Result<PathHistory<(H, Canonicalized)>> {
        let canon = soft_canonicalize(&self.inner)?;
        Ok(Self::advance(canon))
    }
}

const MAX_LINK_HOPS: usize = 40;

/// The deepest symlink still present in an already canonicalized path is
/// dangling. Returns its destination with the remaining tail re-attached.
fn dangling_link(path: &Path) -> std::io::Result<Option<PathBuf>> {
    for link in path.ancestors() {
        let is_link = std::fs::symlink_metadata(link)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link {
            continue;
        }
        let destination = std::fs::read_link(link)?;
        let base = link.parent().unwrap_or(link);
        let mut followed = base.join(destination);
        match path.strip_prefix(link) {
            Ok(tail) if !tail.as_os_str().is_empty() => followed.push(tail),
            _ => {}
        }
        return Ok(Some(followed));
    }
    Ok(None)
}

impl<H> PathHistory<(H, Anchored)> {
    /// Appends `suffix` to the final component. `None` for an empty chain.
    pub fn with_suffix(&self, suffix: &str) -> Option<Self> {
        let name = self.inner.file_name()?;
        let mut extended: OsString = name.to_os_string();
        extended.push(OsStr::new(suffix));
        Some(Self::advance(self.inner.with_file_name(extended)))
    }
}

impl<H> PathHistory<(H, Canonicalized)> {
    pub fn verify_directory(self) -> Option<PathHistory<((H, Canonicalized), Directory)>> {
        self.inner.is_dir().then(|| Self::advance(self.inner))
    }

    /// Accepts the path only if it is `root` or lies below it; hands the
    /// path back otherwise.
    #[inline]
    pub fn contained_in<R>(
        self,
        root: &PathHistory<R>,
    ) -> Result<PathHistory<((H, Canonicalized), Contained)>, Self> {
        if self.inner.starts_with(&root.inner) {
            Ok(Self::advance(self.inner))
        } else {
            Err(self)
        }
    }
}

impl<H> PathHistory<(H, Contained)> {
    pub fn verify_regular_file(self) -> Result<PathHistory<((H, Contained), RegularFile)>, Self> {
        let is_file = std::fs::metadata(&self.inner)
            .map(|meta| meta.file_type().is_file())
            .unwrap_or(false);
        if is_file {
            Ok(Self::advance(self.inner))
        } else {
            Err(self)
        }
    }
}

impl<H> PathHistory<(H, RegularFile)> {
    pub fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut file = std::fs::File::open(&self.inner)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    pub fn read_text(&self) -> std::io::Result<String> {
        let mut file = std::fs::File::open(&self.inner)?;
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
