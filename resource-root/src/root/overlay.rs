use crate::decode::{Content, Decoder, ExtensionMap};
use crate::error::ResourceRootError;
use crate::resolver::path_history::{Anchored, Raw};
use crate::root::filesystem::{read_error, Chain, ConfinedFile, FilesystemRoot};
use crate::root::ResourceRoot;
use crate::{Result, Target};

use std::path::{Path, PathBuf};
use tracing::trace;

struct Selected<'m> {
    file: ConfinedFile<(Raw, Anchored)>,
    extension: &'m str,
    decoder: &'m dyn Decoder,
}

/// SUMMARY:
/// A filesystem root that adds filename extensions and decodes on read.
///
/// DETAILS:
/// For a target `docs/readme` and a map `[(".md", f1), (".txt", f2)]` the
/// candidates are `docs/readme.md` then `docs/readme.txt`. Each candidate goes
/// through the full confinement of [`FilesystemRoot`]. The first one that is
/// an existing regular file wins and its content is passed through the
/// decoder registered for its extension. Extensions that do not begin with
/// `.` never produce a candidate.
///
/// EXAMPLE:
/// ```rust
/// use resource_root::{identity, text_filter, ExtensionMap, ExtensionOverlayRoot};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("readme.md"), "markdown file")?;
/// std::fs::write(dir.path().join("readme.txt"), "text file")?;
/// let map = ExtensionMap::new()
///     .with(".md", text_filter(|text| format!("<p>{text}</p>")))
///     .with(".txt", identity);
/// let root = ExtensionOverlayRoot::try_new(dir.path(), map)?;
/// assert_eq!(root.text("readme")?, "<p>markdown file</p>");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct ExtensionOverlayRoot {
    root: FilesystemRoot,
    extensions: ExtensionMap,
}

impl ExtensionOverlayRoot {
    /// Create an overlay over an existing directory.
    ///
    /// ERRORS:
    /// - `ResourceRootError::InvalidRoot`: as for [`FilesystemRoot::try_new`].
    pub fn try_new<P: AsRef<Path>>(root_directory: P, extensions: ExtensionMap) -> Result<Self> {
        Ok(Self::from_root(FilesystemRoot::try_new(root_directory)?, extensions))
    }

    /// Share an already constructed sandbox.
    #[inline]
    pub fn from_root(root: FilesystemRoot, extensions: ExtensionMap) -> Self {
        Self { root, extensions }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        self.root.root()
    }

    #[inline]
    pub fn filesystem_root(&self) -> &FilesystemRoot {
        &self.root
    }

    #[inline]
    pub fn extensions(&self) -> &ExtensionMap {
        &self.extensions
    }

    fn candidates<'m>(&'m self, chain: &Chain) -> Vec<(Chain, &'m str, &'m dyn Decoder)> {
        self.extensions
            .usable()
            .filter_map(|(extension, decoder)| {
                chain
                    .with_suffix(extension)
                    .map(|candidate| (candidate, extension, decoder))
            })
            .collect()
    }

    /// SUMMARY:
    /// Resolve to the first candidate that stays inside the sandbox.
    ///
    /// DETAILS:
    /// Like [`FilesystemRoot::resolve`], the result need not exist.
    ///
    /// ERRORS:
    /// - `ResourceRootError::NotFound`: no candidate stays inside, or there
    ///   are no candidates (empty map, or the target is the sandbox itself).
    pub fn resolve<'a>(&self, target: impl Into<Target<'a>>) -> Result<PathBuf> {
        let target = target.into();
        let chain = self.root.chain(&target)?;
        self.candidates(&chain)
            .into_iter()
            .find_map(|(candidate, _, _)| self.root.confine(candidate, &target))
            .map(|confined| confined.into_inner())
            .ok_or_else(|| ResourceRootError::not_found(target.to_string()))
    }

    fn select(&self, target: &Target<'_>) -> Result<Selected<'_>> {
        let chain = self.root.chain(target)?;
        for (candidate, extension, decoder) in self.candidates(&chain) {
            trace!(requested = %target, extension, "probing candidate");
            if let Some(file) = self.root.confine_file(candidate, target) {
                return Ok(Selected {
                    file,
                    extension,
                    decoder,
                });
            }
        }
        Err(ResourceRootError::not_found(target.to_string()))
    }

    /// Read the first matching candidate as bytes and decode it.
    ///
    /// ERRORS:
    /// - `ResourceRootError::NotFound`: no candidate is an existing regular file.
    /// - `ResourceRootError::Decode`: the decoder failed; its error is the source.
    pub fn read<'a>(&self, target: impl Into<Target<'a>>) -> Result<Vec<u8>> {
        let target = target.into();
        let selected = self.select(&target)?;
        let raw = selected.file.read_bytes().map_err(|e| read_error(&target, e))?;
        let decoded = selected.decode(Content::Bytes(raw))?;
        Ok(decoded.into_bytes())
    }

    /// Read the first matching candidate as text and decode it.
    ///
    /// ERRORS:
    /// - `ResourceRootError::NotFound`: no candidate is an existing regular file.
    /// - `ResourceRootError::Decode`: the decoder failed, or returned bytes that are not UTF-8.
    pub fn text<'a>(&self, target: impl Into<Target<'a>>) -> Result<String> {
        let target = target.into();
        let selected = self.select(&target)?;
        let raw = selected.file.read_text().map_err(|e| read_error(&target, e))?;
        let decoded = selected.decode(Content::Text(raw))?;
        decoded
            .into_text()
            .map_err(|e| ResourceRootError::decode(selected.extension, Box::new(e)))
    }
}

impl Selected<'_> {
    fn decode(&self, content: Content) -> Result<Content> {
        self.decoder
            .decode(content)
            .map_err(|source| ResourceRootError::decode(self.extension, source))
    }
}

impl ResourceRoot for ExtensionOverlayRoot {
    #[inline]
    fn read(&self, target: Target<'_>) -> Result<Vec<u8>> {
        ExtensionOverlayRoot::read(self, target)
    }

    #[inline]
    fn text(&self, target: Target<'_>) -> Result<String> {
        ExtensionOverlayRoot::text(self, target)
    }
}
