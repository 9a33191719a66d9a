//! Tokenized path expression.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{PathElement, PathError};

/// One token: a word run, optionally followed by a bracket suffix that runs
/// to the first `]`. Bracket content is taken verbatim (quotes, nested `[`)
/// so that element validation sees and rejects it. Everything between
/// tokens is a separator.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Za-z_]+\[[^\]]*\]|[0-9A-Za-z_]+").expect("token pattern is valid")
});

/// Ordered chain of [`PathElement`]s, e.g. `books[currentBook].pages`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathExpression {
    elements: Vec<PathElement>,
}

impl PathExpression {
    /// Tokenize and validate a path string.
    pub fn parse(source: &str) -> Result<Self, PathError> {
        if source.is_empty() {
            return Err(PathError::EmptyExpression);
        }
        let elements = TOKEN_PATTERN
            .find_iter(source)
            .map(|token| PathElement::parse(token.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a PathExpression {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, element) in self.elements.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

impl FromStr for PathExpression {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PathExpression {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&Value> for PathExpression {
    type Error = PathError;

    /// Null, numbers, and other non-string values count as a missing path.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(source) => Self::parse(source),
            _ => Err(PathError::EmptyExpression),
        }
    }
}
