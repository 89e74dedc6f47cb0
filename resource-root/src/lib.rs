//! # resource-root
//!
//! Resolve untrusted targets to files inside a sandbox directory, or to
//! remote documents through an injected client, without ever escaping the
//! declared root.
//!
//! A target usually arrives from somebody else: a URL path, a JSON field, a
//! manifest entry. This crate treats it as data, never as structure:
//! - `..` cannot climb out: the target is normalized lexically against the OS
//!   root anchor first, so there is nothing above it to reach.
//! - Absolute targets are not absolute: `/readme.txt` means "readme.txt in the
//!   sandbox", not the real filesystem root.
//! - Symlinks are consulted exactly once, after the target has been re-anchored
//!   under the sandbox. A link that lands outside is rejected.
//! - Every failure to reach a target is the same `NotFound`, so callers learn
//!   nothing about what exists behind a blocked path.
//!
//! ## Quick start
//!
//! ```rust
//! use resource_root::{FilesystemRoot, ResourceRootError};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! std::fs::create_dir(dir.path().join("safe"))?;
//! std::fs::write(dir.path().join("safe/readme.txt"), "safe")?;
//!
//! let root = FilesystemRoot::try_new(dir.path().join("safe"))?;
//! assert_eq!(root.read("/readme.txt")?, b"safe");
//! assert_eq!(root.text("../safe/../readme.txt")?, "safe");
//! assert!(matches!(
//!     root.text("../../../etc/passwd"),
//!     Err(ResourceRootError::NotFound { .. })
//! ));
//! # Ok(()) }
//! ```
//!
//! ## Roots
//!
//! - [`FilesystemRoot`]: reads bytes or UTF-8 text of a confined regular file;
//!   [`FilesystemRoot::resolve`] exposes the confined path without reading.
//! - [`ExtensionOverlayRoot`]: given `readme`, probes `readme.md`,
//!   `readme.txt`, ... in the order of an [`ExtensionMap`] and decodes the
//!   winner with the decoder registered for its extension.
//! - [`RemoteRoot`]: hands targets to an [`HttpClient`] you provide (feature
//!   `http` supplies one backed by `reqwest`).
//!
//! All three implement [`ResourceRoot`], so code that only needs bytes or text
//! can take `&dyn ResourceRoot`.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Target`] and
//!   `Target::from_json_value`.
//! - `http`: `HttpClient` for `reqwest::blocking::Client`.
//!
//! ## Logging
//!
//! Rejections are reported through `tracing` at `debug` level with the real
//! reason (escape, missing file, directory). Install a subscriber to see them;
//! the caller-facing error stays uniform.
#![forbid(unsafe_code)]

pub mod decode;
pub mod error;
mod resolver;
pub mod root;
pub mod target;

// Public exports
pub use decode::{identity, text_filter, Content, Decoder, ExtensionMap};
pub use error::{BoxError, ResourceRootError};
pub use root::filesystem::FilesystemRoot;
pub use root::overlay::ExtensionOverlayRoot;
pub use root::remote::{HttpClient, HttpResponse, RemoteRoot, Transport};
pub use root::ResourceRoot;
pub use target::Target;

/// Result type alias for this crate's operations.
pub type Result<T> = std::result::Result<T, ResourceRootError>;
