//! SUMMARY:
//! Define the error type shared by every resource root.
//!
//! OVERVIEW:
//! `ResourceRootError` covers sandbox construction failures, unreachable
//! targets, malformed targets, missing transports and decoder failures.
//! `NotFound` deliberately folds every resolution failure into one signal so a
//! caller cannot tell a blocked path from an absent one.
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

const MAX_ERROR_TARGET_LEN: usize = 256;

/// Boxed error produced by injected collaborators (decoders, HTTP clients).
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

// Internal helper: render error-friendly target display (truncate long values).
pub(crate) fn truncate_display(value: &str, max_len: usize) -> String {
    let char_count = value.chars().count();
    if char_count <= max_len {
        return value.to_owned();
    }
    let keep = max_len.saturating_sub(5) / 2;
    let start: String = value.chars().take(keep).collect();
    let mut tail_chars: Vec<char> = value.chars().rev().take(keep).collect();
    tail_chars.reverse();
    let end: String = tail_chars.into_iter().collect();
    format!("{start}...{end}")
}

/// SUMMARY:
/// Represent every failure a resource root can report.
///
/// DETAILS:
/// The variants are the categories callers match on. `NotFound` carries only
/// the target as the caller supplied it, never the resolved location.
#[derive(Debug)]
pub enum ResourceRootError {
    /// The target is unreachable: it escaped the sandbox, does not exist, or
    /// is not a regular file.
    NotFound { target: String },
    /// The target has a shape that cannot be resolved.
    InvalidInput { reason: &'static str },
    /// The sandbox directory is missing, not a directory, or unresolvable.
    InvalidRoot {
        root: PathBuf,
        source: std::io::Error,
    },
    /// A required backing resource was not available at construction.
    Configuration { reason: String },
    /// A decoder registered for `extension` rejected the content.
    Decode { extension: String, source: BoxError },
    /// Reading an already validated file failed.
    Io {
        target: String,
        source: std::io::Error,
    },
    /// The injected client failed to fetch `identifier`.
    Remote {
        identifier: String,
        source: BoxError,
    },
}

impl ResourceRootError {
    #[inline]
    pub(crate) fn not_found(target: impl Into<String>) -> Self {
        Self::NotFound {
            target: target.into(),
        }
    }

    #[inline]
    pub(crate) fn invalid_input(reason: &'static str) -> Self {
        Self::InvalidInput { reason }
    }

    #[inline]
    pub(crate) fn invalid_root(root: &Path, source: std::io::Error) -> Self {
        Self::InvalidRoot {
            root: root.to_path_buf(),
            source,
        }
    }

    #[inline]
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn decode(extension: impl Into<String>, source: BoxError) -> Self {
        Self::Decode {
            extension: extension.into(),
            source,
        }
    }

    #[inline]
    pub(crate) fn io(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            target: target.into(),
            source,
        }
    }

    #[inline]
    pub(crate) fn remote(identifier: impl Into<String>, source: BoxError) -> Self {
        Self::Remote {
            identifier: identifier.into(),
            source,
        }
    }

    /// Returns true for the collapsed "unreachable target" signal.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for ResourceRootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRootError::NotFound { target } => {
                let truncated = truncate_display(target, MAX_ERROR_TARGET_LEN);
                write!(f, "Resource not found: '{truncated}'")
            }
            ResourceRootError::InvalidInput { reason } => {
                write!(f, "Invalid target: {reason}")
            }
            ResourceRootError::InvalidRoot { root, .. } => {
                write!(f, "Invalid sandbox root directory: {}", root.display())
            }
            ResourceRootError::Configuration { reason } => {
                write!(f, "Resource root is not configured: {reason}")
            }
            ResourceRootError::Decode { extension, source } => {
                write!(f, "Decoder for '{extension}' failed: {source}")
            }
            ResourceRootError::Io { target, .. } => {
                let truncated = truncate_display(target, MAX_ERROR_TARGET_LEN);
                write!(f, "Cannot read resource: '{truncated}'")
            }
            ResourceRootError::Remote { identifier, .. } => {
                let truncated = truncate_display(identifier, MAX_ERROR_TARGET_LEN);
                write!(f, "Remote fetch failed: '{truncated}'")
            }
        }
    }
}

impl Error for ResourceRootError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ResourceRootError::InvalidRoot { source, .. }
            | ResourceRootError::Io { source, .. } => Some(source),
            ResourceRootError::Decode { source, .. }
            | ResourceRootError::Remote { source, .. } => Some(source.as_ref()),
            ResourceRootError::NotFound { .. }
            | ResourceRootError::InvalidInput { .. }
            | ResourceRootError::Configuration { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
