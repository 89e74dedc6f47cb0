//! Untrusted target identifiers.
//!
//! A target is either one string, split into components with host path
//! separator semantics, or an already split sequence of segments. Segments
//! are pushed one after another, so a segment that carries its own separators
//! or a leading root is interpreted by the same lexical rules as a string.
use crate::{ResourceRootError, Result};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// SUMMARY:
/// Caller supplied identifier of a resource inside a root.
///
/// EXAMPLE:
/// ```rust
/// use resource_root::Target;
/// let from_str: Target = "docs/readme.txt".into();
/// let from_segments: Target = ["docs", "readme.txt"].into();
/// assert_eq!(from_str.to_string(), from_segments.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target<'a> {
    /// A single string such as one taken from a request URL.
    Path(Cow<'a, str>),
    /// Ordered path segments.
    Segments(Vec<Cow<'a, str>>),
}

impl<'a> Target<'a> {
    /// Convert into a target that owns its strings.
    pub fn into_owned(self) -> Target<'static> {
        match self {
            Target::Path(path) => Target::Path(Cow::Owned(path.into_owned())),
            Target::Segments(segments) => Target::Segments(
                segments
                    .into_iter()
                    .map(|segment| Cow::Owned(segment.into_owned()))
                    .collect(),
            ),
        }
    }

    fn pieces(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Target::Path(path) => Box::new(std::iter::once(path.as_ref())),
            Target::Segments(segments) => Box::new(segments.iter().map(|s| s.as_ref())),
        }
    }

    /// Join the target onto `anchor` without touching the filesystem.
    ///
    /// Fails with `InvalidInput` when any piece contains a NUL byte, which no
    /// filesystem path can carry.
    pub(crate) fn join_onto(&self, anchor: &Path) -> Result<PathBuf> {
        let mut joined = anchor.to_path_buf();
        for piece in self.pieces() {
            if piece.contains('\0') {
                return Err(ResourceRootError::invalid_input(
                    "target contains a NUL byte",
                ));
            }
            joined.push(piece);
        }
        Ok(joined)
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Path(path) => f.write_str(path),
            Target::Segments(segments) => {
                for (index, segment) in segments.iter().enumerate() {
                    if index > 0 {
                        f.write_str("/")?;
                    }
                    f.write_str(segment)?;
                }
                Ok(())
            }
        }
    }
}

impl<'a> From<&'a str> for Target<'a> {
    #[inline]
    fn from(path: &'a str) -> Self {
        Target::Path(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a String> for Target<'a> {
    #[inline]
    fn from(path: &'a String) -> Self {
        Target::Path(Cow::Borrowed(path.as_str()))
    }
}

impl From<String> for Target<'static> {
    #[inline]
    fn from(path: String) -> Self {
        Target::Path(Cow::Owned(path))
    }
}

impl<'a> From<&'a [&'a str]> for Target<'a> {
    fn from(segments: &'a [&'a str]) -> Self {
        Target::Segments(segments.iter().map(|s| Cow::Borrowed(*s)).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Target<'a> {
    fn from(segments: [&'a str; N]) -> Self {
        Target::Segments(segments.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<'a> From<Vec<&'a str>> for Target<'a> {
    fn from(segments: Vec<&'a str>) -> Self {
        Target::Segments(segments.into_iter().map(Cow::Borrowed).collect())
    }
}

impl From<Vec<String>> for Target<'static> {
    fn from(segments: Vec<String>) -> Self {
        Target::Segments(segments.into_iter().map(Cow::Owned).collect())
    }
}

impl<'a, 'b> From<&'b Target<'a>> for Target<'b> {
    fn from(target: &'b Target<'a>) -> Self {
        match target {
            Target::Path(path) => Target::Path(Cow::Borrowed(path.as_ref())),
            Target::Segments(segments) => {
                Target::Segments(segments.iter().map(|s| Cow::Borrowed(s.as_ref())).collect())
            }
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Target;
    use crate::{ResourceRootError, Result};
    use serde::de::{self, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::borrow::Cow;
    use std::fmt;

    const SHAPE_MESSAGE: &str = "target must be either a string or a sequence of strings";

    impl Serialize for Target<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            match self {
                Target::Path(path) => serializer.serialize_str(path),
                Target::Segments(segments) => serializer.collect_seq(segments.iter()),
            }
        }
    }

    struct TargetVisitor;

    impl<'de> Visitor<'de> for TargetVisitor {
        type Value = Target<'static>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(SHAPE_MESSAGE)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
            Ok(Target::Path(Cow::Owned(value.to_owned())))
        }

        fn visit_string<E: de::Error>(
            self,
            value: String,
        ) -> std::result::Result<Self::Value, E> {
            Ok(Target::Path(Cow::Owned(value)))
        }

        fn visit_seq<A: SeqAccess<'de>>(
            self,
            mut seq: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let mut segments = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(segment) = seq.next_element::<String>()? {
                segments.push(Cow::Owned(segment));
            }
            Ok(Target::Segments(segments))
        }
    }

    impl<'de> Deserialize<'de> for Target<'static> {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> std::result::Result<Self, D::Error> {
            deserializer.deserialize_any(TargetVisitor)
        }
    }

    impl Target<'static> {
        /// SUMMARY:
        /// Build a target from an arbitrary JSON value (e.g. a request body field).
        ///
        /// ERRORS:
        /// - `ResourceRootError::InvalidInput`: the value is neither a string
        ///   nor an array made only of strings.
        pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
            Target::deserialize(value).map_err(|_| ResourceRootError::invalid_input(SHAPE_MESSAGE))
        }
    }
}
