//! Resource roots: the capability trait and its implementations.
use crate::{Result, Target};

pub mod filesystem;
pub mod overlay;
pub mod remote;

/// SUMMARY:
/// Capability to fetch a resource by target, as raw bytes or as text.
///
/// DETAILS:
/// Object safe, so heterogeneous roots can sit behind
/// `Box<dyn ResourceRoot + Send + Sync>`. Implementors perform no caching:
/// every call fetches afresh.
///
/// Only `&R` forwards. A root behind `Box` or `Arc` reaches its inherent
/// methods through deref, so `Arc<FilesystemRoot>` still accepts a `&str`.
///
/// EXAMPLE:
/// ```rust
/// use resource_root::{FilesystemRoot, ResourceRoot};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("readme.txt"), "safe")?;
/// let root: Box<dyn ResourceRoot> = Box::new(FilesystemRoot::try_new(dir.path())?);
/// assert_eq!(root.text("/readme.txt".into())?, "safe");
/// # Ok(()) }
/// ```
pub trait ResourceRoot {
    /// Fetch the target and return its raw bytes.
    fn read(&self, target: Target<'_>) -> Result<Vec<u8>>;

    /// Fetch the target and return it as a string.
    fn text(&self, target: Target<'_>) -> Result<String>;
}

impl<R: ResourceRoot + ?Sized> ResourceRoot for &R {
    #[inline]
    fn read(&self, target: Target<'_>) -> Result<Vec<u8>> {
        (**self).read(target)
    }

    #[inline]
    fn text(&self, target: Target<'_>) -> Result<String> {
        (**self).text(target)
    }
}

#[cfg(test)]
mod tests;
