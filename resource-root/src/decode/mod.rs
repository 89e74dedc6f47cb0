//! SUMMARY:
//! Ordered table of filename extensions and the decoders applied on read.
//!
//! DETAILS:
//! `ExtensionMap` keeps insertion order; that order is the precedence used
//! when an `ExtensionOverlayRoot` probes candidates. Entries whose extension
//! does not begin with `.` stay in the table but are never matched.
use crate::BoxError;
use std::fmt;
use std::sync::Arc;

/// Raw or decoded resource content handed to and returned from decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Bytes(Vec<u8>),
    Text(String),
}

impl Content {
    /// Consume into bytes; text is returned as its UTF-8 encoding.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Bytes(bytes) => bytes,
            Content::Text(text) => text.into_bytes(),
        }
    }

    /// Consume into a string; bytes must be valid UTF-8.
    pub fn into_text(self) -> Result<String, std::string::FromUtf8Error> {
        match self {
            Content::Bytes(bytes) => String::from_utf8(bytes),
            Content::Text(text) => Ok(text),
        }
    }
}

/// A transform applied to the content of a file selected by its extension.
///
/// Any `Fn(Content) -> Result<Content, BoxError>` is a decoder.
pub trait Decoder: Send + Sync {
    fn decode(&self, content: Content) -> Result<Content, BoxError>;
}

impl<F> Decoder for F
where
    F: Fn(Content) -> Result<Content, BoxError> + Send + Sync,
{
    #[inline]
    fn decode(&self, content: Content) -> Result<Content, BoxError> {
        self(content)
    }
}

/// Pass-through decoder.
pub fn identity(content: Content) -> Result<Content, BoxError> {
    Ok(content)
}

/// SUMMARY:
/// Lift an infallible text transform into a decoder.
///
/// DETAILS:
/// Byte content is interpreted as UTF-8 first; invalid UTF-8 is reported as
/// a decode failure.
///
/// EXAMPLE:
/// ```rust
/// use resource_root::{text_filter, Content, Decoder};
/// let paragraph = text_filter(|text| format!("<p>{text}</p>"));
/// let decoded = paragraph.decode(Content::Text("hi".into())).unwrap();
/// assert_eq!(decoded, Content::Text("<p>hi</p>".into()));
/// ```
pub fn text_filter<F>(filter: F) -> impl Decoder
where
    F: Fn(String) -> String + Send + Sync,
{
    move |content: Content| -> Result<Content, BoxError> {
        let text = content.into_text()?;
        Ok(Content::Text(filter(text)))
    }
}

#[derive(Clone)]
struct Entry {
    extension: String,
    decoder: Arc<dyn Decoder>,
}

/// SUMMARY:
/// Ordered `(extension, decoder)` table.
///
/// DETAILS:
/// Registering an extension a second time replaces its decoder but keeps the
/// position of the first registration.
///
/// EXAMPLE:
/// ```rust
/// use resource_root::{identity, text_filter, ExtensionMap};
/// let map = ExtensionMap::new()
///     .with(".md", text_filter(|text| format!("<p>{text}</p>")))
///     .with(".txt", identity);
/// assert_eq!(map.extensions().collect::<Vec<_>>(), [".md", ".txt"]);
/// ```
#[derive(Clone, Default)]
pub struct ExtensionMap {
    entries: Vec<Entry>,
}

impl ExtensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ExtensionMap::insert`].
    pub fn with(mut self, extension: impl Into<String>, decoder: impl Decoder + 'static) -> Self {
        self.insert(extension, decoder);
        self
    }

    pub fn insert(&mut self, extension: impl Into<String>, decoder: impl Decoder + 'static) {
        let extension = extension.into();
        let decoder: Arc<dyn Decoder> = Arc::new(decoder);
        match self.entries.iter_mut().find(|e| e.extension == extension) {
            Some(existing) => existing.decoder = decoder,
            None => self.entries.push(Entry { extension, decoder }),
        }
    }

    /// All registered extensions in precedence order, malformed ones included.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.extension.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that may produce candidates: the extension starts with `.`.
    pub(crate) fn usable(&self) -> impl Iterator<Item = (&str, &dyn Decoder)> {
        self.entries
            .iter()
            .filter(|e| e.extension.starts_with('.'))
            .map(|e| (e.extension.as_str(), e.decoder.as_ref()))
    }
}

impl fmt::Debug for ExtensionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionMap")
            .field("extensions", &self.extensions().collect::<Vec<_>>())
            .finish()
    }
}

impl<S, D> FromIterator<(S, D)> for ExtensionMap
where
    S: Into<String>,
    D: Decoder + 'static,
{
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut map = ExtensionMap::new();
        for (extension, decoder) in iter {
            map.insert(extension, decoder);
        }
        map
    }
}
