// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, TomeError};
use crate::value::write_escaped;

static BARE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// An ordered, non-empty sequence of key segments, e.g. `server.host`.
///
/// Key paths only address tables. Array elements are never addressed by
/// path; an array is retrieved whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Build a path from segments. Fails with [`TomeError::EmptyKeyPath`] if
    /// there are none.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(TomeError::EmptyKeyPath);
        }
        Ok(Self(segments))
    }

    pub fn from_segment(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Parse a dotted path (`"db.conn.timeout"`).
    ///
    /// No quoting is understood here; use [`KeyPath::new`] for segments that
    /// contain a dot.
    pub fn parse(dotted: &str) -> Result<Self> {
        if dotted.is_empty() {
            return Err(TomeError::EmptyKeyPath);
        }
        let segments: Vec<&str> = dotted.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TomeError::InvalidKeyPath {
                text: dotted.to_string(),
            });
        }
        Self::new(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn last(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// The final segment and everything before it.
    pub fn split_last(&self) -> (&str, &[String]) {
        let (last, parents) = self.0.split_last().expect("key path is never empty");
        (last.as_str(), parents)
    }

    /// The path of the first `n` segments, clamped to `1..=len`.
    pub fn prefix(&self, n: usize) -> KeyPath {
        let n = n.clamp(1, self.0.len());
        KeyPath(self.0[..n].to_vec())
    }

    pub fn child(&self, segment: impl Into<String>) -> KeyPath {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        KeyPath(segments)
    }

    pub fn join(&self, other: &KeyPath) -> KeyPath {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        KeyPath(segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write_segment(f, segment)?;
        }
        Ok(())
    }
}

/// Write one segment, quoting it unless it is a bare key.
pub(crate) fn write_segment(f: &mut fmt::Formatter<'_>, segment: &str) -> fmt::Result {
    if BARE_KEY.is_match(segment) {
        f.write_str(segment)
    } else {
        write_escaped(f, segment)
    }
}

impl std::str::FromStr for KeyPath {
    type Err = TomeError;

    fn from_str(s: &str) -> Result<Self> {
        KeyPath::parse(s)
    }
}

/// Anything a caller can hand to a lookup or insertion as a path.
///
/// Strings are read as dotted paths; slices, arrays and vectors are taken
/// segment by segment.
pub trait ToKeyPath {
    fn to_key_path(&self) -> Result<KeyPath>;
}

impl ToKeyPath for KeyPath {
    fn to_key_path(&self) -> Result<KeyPath> {
        Ok(self.clone())
    }
}

impl ToKeyPath for str {
    fn to_key_path(&self) -> Result<KeyPath> {
        KeyPath::parse(self)
    }
}

impl ToKeyPath for String {
    fn to_key_path(&self) -> Result<KeyPath> {
        KeyPath::parse(self)
    }
}

impl<S: AsRef<str>> ToKeyPath for [S] {
    fn to_key_path(&self) -> Result<KeyPath> {
        KeyPath::new(self.iter().map(|s| s.as_ref().to_string()))
    }
}

impl<S: AsRef<str>, const N: usize> ToKeyPath for [S; N] {
    fn to_key_path(&self) -> Result<KeyPath> {
        self.as_slice().to_key_path()
    }
}

impl<S: AsRef<str>> ToKeyPath for Vec<S> {
    fn to_key_path(&self) -> Result<KeyPath> {
        self.as_slice().to_key_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        let path = KeyPath::parse("server.host").unwrap();
        assert_eq!(path.segments(), &["server".to_string(), "host".to_string()]);
        assert_eq!(path.first(), "server");
        assert_eq!(path.last(), "host");
        assert_eq!(path.to_string(), "server.host");
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(KeyPath::parse(""), Err(TomeError::EmptyKeyPath));
        let none: [&str; 0] = [];
        assert_eq!(none.to_key_path(), Err(TomeError::EmptyKeyPath));
        assert_eq!(Vec::<String>::new().to_key_path(), Err(TomeError::EmptyKeyPath));
    }

    #[test]
    fn test_empty_segment_rejected() {
        for text in ["a..b", ".a", "a."] {
            assert_eq!(
                KeyPath::parse(text),
                Err(TomeError::InvalidKeyPath { text: text.to_string() })
            );
        }
    }

    #[test]
    fn test_slices_keep_dots_inside_segments() {
        let path = ["site", "example.com"].to_key_path().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), "example.com");
        assert_eq!(path.to_string(), "site.\"example.com\"");
    }

    #[test]
    fn test_prefix_child_join() {
        let path = KeyPath::parse("a.b.c").unwrap();
        assert_eq!(path.prefix(2).to_string(), "a.b");
        assert_eq!(path.prefix(0).to_string(), "a");
        assert_eq!(path.prefix(9), path);
        assert_eq!(path.child("d").to_string(), "a.b.c.d");

        let base = KeyPath::parse("db.conn").unwrap();
        let rel = KeyPath::parse("timeout").unwrap();
        assert_eq!(base.join(&rel).to_string(), "db.conn.timeout");

        let (last, parents) = path.split_last();
        assert_eq!(last, "c");
        assert_eq!(parents.len(), 2);
    }
}
