//! # Entity Tags
//!
//! Wire form is `"<tag>"` for a strong tag and `W/"<tag>"` for a weak one.
//! The inner tag is restricted to `[a-zA-Z0-9_-]`, narrower than the ASCII
//! range the RFC allows, so the tag string itself can never contain quote or
//! slash characters.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::errors::EtagError;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[a-zA-Z0-9_-]*$").expect("tag pattern is valid"))
}

/// An opaque version marker for a stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ETag {
    weak: bool,
    tag: String,
}

impl ETag {
    /// Build a tag from an already-validated opaque string.
    pub fn new(weak: bool, tag: impl Into<String>) -> Self {
        Self {
            weak,
            tag: tag.into(),
        }
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// The opaque tag string, without quotes or weakness marker.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Weak comparison: tag strings equal, weakness ignored.
    pub fn match_weak(&self, other: &ETag) -> bool {
        self.tag == other.tag
    }

    /// Strong comparison: both tags strong and tag strings equal. A weak tag
    /// never strongly matches anything, including itself.
    pub fn match_strong(&self, other: &ETag) -> bool {
        if self.weak || other.weak {
            return false;
        }

        self.tag == other.tag
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            write!(f, "W/\"{}\"", self.tag)
        } else {
            write!(f, "\"{}\"", self.tag)
        }
    }
}

impl FromStr for ETag {
    type Err = EtagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EtagError::Empty);
        }

        // Shortest valid form is a single tag character inside quotes.
        if s.len() < 3 {
            return Err(EtagError::TooShort);
        }

        let (weak, rest) = match s.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let inner = rest
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .ok_or(EtagError::MissingQuotes)?;

        if !tag_pattern().is_match(inner) {
            return Err(EtagError::BadCharacters);
        }

        Ok(ETag {
            weak,
            tag: inner.to_string(),
        })
    }
}
