use crate::error::ResourceRootError;
use crate::resolver::path_history::*;
use crate::root::ResourceRoot;
use crate::{Result, Target};

use std::io::{Error as IoError, ErrorKind};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Relative chain of normal components, produced lexically from a target.
pub(crate) type Chain = PathHistory<(Raw, Anchored)>;

/// A confined path: canonicalized and inside the sandbox.
pub(crate) type Confined<H> = PathHistory<((H, Canonicalized), Contained)>;

/// A confined path that names an existing regular file.
pub(crate) type ConfinedFile<H> = PathHistory<(((H, Canonicalized), Contained), RegularFile)>;

struct Sandbox {
    root: PathHistory<((Raw, Canonicalized), Directory)>,
    os_anchor: PathBuf,
}

/// SUMMARY:
/// Lock a directory as the root for reading untrusted targets.
///
/// DETAILS:
/// Every target is normalized lexically against the OS root anchor (so
/// `..` cannot climb and a leading separator means "the sandbox root"),
/// re-anchored under the sandbox, canonicalized exactly once, then checked
/// for containment. Reads additionally require an existing regular file.
/// All of these failures surface as the same `NotFound`.
///
/// EXAMPLE:
/// ```rust
/// use resource_root::FilesystemRoot;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("readme.txt"), "safe")?;
/// let root = FilesystemRoot::try_new(dir.path())?;
/// assert_eq!(root.read("/readme.txt")?, b"safe");
/// assert_eq!(root.text(["readme.txt"])?, "safe");
/// assert!(root.text("../../etc/passwd").is_err());
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct FilesystemRoot {
    sandbox: Arc<Sandbox>,
}

impl FilesystemRoot {
    /// SUMMARY:
    /// Create a root anchored at an existing directory.
    ///
    /// DETAILS:
    /// The directory is canonicalized here, once; symlinks in the directory's
    /// own path are resolved now and never again.
    ///
    /// ERRORS:
    /// - `ResourceRootError::InvalidRoot`: missing, not a directory, or not canonicalizable.
    pub fn try_new<P: AsRef<Path>>(root_directory: P) -> Result<Self> {
        let requested = root_directory.as_ref();
        let canonicalized = PathHistory::<Raw>::new(requested)
            .canonicalize()
            .map_err(|e| ResourceRootError::invalid_root(requested, e))?;

        if !canonicalized.exists() {
            let io = IoError::new(
                ErrorKind::NotFound,
                "The specified root directory does not exist.",
            );
            return Err(ResourceRootError::invalid_root(requested, io));
        }

        let root = match canonicalized.verify_directory() {
            Some(root) => root,
            None => {
                let io = IoError::new(
                    ErrorKind::InvalidInput,
                    "The specified root path exists but is not a directory.",
                );
                return Err(ResourceRootError::invalid_root(requested, io));
            }
        };

        let os_anchor: PathBuf = root
            .components()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();

        debug!(root = %root.display(), "filesystem root established");
        Ok(Self {
            sandbox: Arc::new(Sandbox { root, os_anchor }),
        })
    }

    /// The canonical sandbox directory.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.sandbox.root
    }

    /// SUMMARY:
    /// Resolve `target` to a path inside the sandbox without reading it.
    ///
    /// DETAILS:
    /// The returned path need not exist; it is guaranteed to be the sandbox
    /// root or a descendant of it.
    ///
    /// ERRORS:
    /// - `ResourceRootError::NotFound`: the target escapes or cannot be canonicalized.
    /// - `ResourceRootError::InvalidInput`: the target contains a NUL byte.
    pub fn resolve<'a>(&self, target: impl Into<Target<'a>>) -> Result<PathBuf> {
        let target = target.into();
        let chain = self.chain(&target)?;
        self.confine(chain, &target)
            .map(PathHistory::into_inner)
            .ok_or_else(|| ResourceRootError::not_found(target.to_string()))
    }

    /// Read the target as raw bytes.
    pub fn read<'a>(&self, target: impl Into<Target<'a>>) -> Result<Vec<u8>> {
        let target = target.into();
        let file = self.resolve_file(&target)?;
        file.read_bytes().map_err(|e| read_error(&target, e))
    }

    /// Read the target as UTF-8 text.
    pub fn text<'a>(&self, target: impl Into<Target<'a>>) -> Result<String> {
        let target = target.into();
        let file = self.resolve_file(&target)?;
        file.read_text().map_err(|e| read_error(&target, e))
    }

    fn resolve_file(&self, target: &Target<'_>) -> Result<ConfinedFile<(Raw, Anchored)>> {
        let chain = self.chain(target)?;
        self.confine_file(chain, target)
            .ok_or_else(|| ResourceRootError::not_found(target.to_string()))
    }

    /// Segment the target, normalize it on the OS anchor and strip the anchor.
    pub(crate) fn chain(&self, target: &Target<'_>) -> Result<Chain> {
        let joined = target.join_onto(&self.sandbox.os_anchor)?;
        let chain = PathHistory::<Raw>::new(joined).strip_anchor();
        trace!(requested = %target, chain = %chain.display(), "target normalized");
        Ok(chain)
    }

    /// Re-anchor under the sandbox, canonicalize once, enforce containment.
    pub(crate) fn confine<H>(
        &self,
        chain: PathHistory<H>,
        target: &Target<'_>,
    ) -> Option<Confined<H>> {
        let canonical = match chain.canonicalize_under(self.root()) {
            Ok(canonical) => canonical,
            Err(err) => {
                debug!(
                    requested = %target,
                    error = %err,
                    "target rejected: canonicalization failed"
                );
                return None;
            }
        };
        match canonical.contained_in(&self.sandbox.root) {
            Ok(confined) => Some(confined),
            Err(escaped) => {
                debug!(
                    requested = %target,
                    resolved = %escaped.display(),
                    "target rejected: resolves outside the sandbox"
                );
                None
            }
        }
    }

    /// Confine, then require an existing regular file.
    pub(crate) fn confine_file<H>(
        &self,
        chain: PathHistory<H>,
        target: &Target<'_>,
    ) -> Option<ConfinedFile<H>> {
        match self.confine(chain, target)?.verify_regular_file() {
            Ok(file) => Some(file),
            Err(other) => {
                debug!(
                    requested = %target,
                    resolved = %other.display(),
                    "target rejected: not an existing regular file"
                );
                None
            }
        }
    }
}

/// Maps a failure to read a validated file. A file that vanished between
/// the check and the open is still `NotFound`.
pub(crate) fn read_error(target: &Target<'_>, err: IoError) -> ResourceRootError {
    if err.kind() == ErrorKind::NotFound {
        ResourceRootError::not_found(target.to_string())
    } else {
        ResourceRootError::io(target.to_string(), err)
    }
}

impl ResourceRoot for FilesystemRoot {
    #[inline]
    fn read(&self, target: Target<'_>) -> Result<Vec<u8>> {
        FilesystemRoot::read(self, target)
    }

    #[inline]
    fn text(&self, target: Target<'_>) -> Result<String> {
        FilesystemRoot::text(self, target)
    }
}

impl std::fmt::Debug for FilesystemRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesystemRoot")
            .field("root", &self.root())
            .finish()
    }
}

impl PartialEq for FilesystemRoot {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl Eq for FilesystemRoot {}

impl std::str::FromStr for FilesystemRoot {
    type Err = ResourceRootError;

    /// Parse a root from a directory path string (clap arguments, config values).
    #[inline]
    fn from_str(path: &str) -> std::result::Result<Self, Self::Err> {
        Self::try_new(path)
    }
}
