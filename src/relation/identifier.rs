//! # Identifier Grammar
//!
//! Field and column names end up interpolated into statement text as quoted
//! identifiers, so the grammar check must happen before any interpolation.
//! `Identifier` can only be constructed through the check: holding one proves
//! the name is safe to splice into a statement.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::errors::IdentifierError;

/// Deliberately narrower than what the database itself would accept:
/// lowercase ASCII and underscores only.
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[a-z_]*$").expect("identifier pattern is valid"))
}

/// A column or field name that has passed the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// The raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The double-quoted form used in statement text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !identifier_pattern().is_match(s) {
            return Err(IdentifierError::new(s));
        }

        Ok(Identifier(s.to_string()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
