//! A single path segment: `name` or `name[subpath]`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{PathError, PathExpression};

/// Bare identifier with an optional bracket suffix whose content is limited
/// to `[A-Za-z0-9_.]`.
static ELEMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9A-Za-z_]+)(?:\[([0-9A-Za-z_.]+)\])?$").expect("element pattern is valid")
});

/// One segment of a path expression.
///
/// A complex element (`books[currentBook]`) carries a nested expression whose
/// resolved value is used as the index into `books`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    property_name: String,
    sub_expression: Option<PathExpression>,
}

impl PathElement {
    /// Parse and validate one segment.
    pub fn parse(token: &str) -> Result<Self, PathError> {
        if token.is_empty() {
            return Err(PathError::EmptyElement);
        }
        let invalid = || PathError::InvalidElement(token.to_string());
        let captures = ELEMENT_PATTERN.captures(token).ok_or_else(invalid)?;
        let property_name = captures[1].to_string();
        let sub_expression = match captures.get(2) {
            Some(inner) => {
                // A purely numeric index would be a literal position, which
                // the grammar does not allow.
                if inner.as_str().bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                Some(PathExpression::parse(inner.as_str())?)
            }
            None => None,
        };
        Ok(Self {
            property_name,
            sub_expression,
        })
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// `true` for `name[subpath]`, `false` for a bare `name`.
    pub fn is_complex(&self) -> bool {
        self.sub_expression.is_some()
    }

    pub fn sub_expression(&self) -> Option<&PathExpression> {
        self.sub_expression.as_ref()
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.property_name)?;
        if let Some(sub) = &self.sub_expression {
            write!(f, "[{sub}]")?;
        }
        Ok(())
    }
}

impl FromStr for PathElement {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PathElement {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&Value> for PathElement {
    type Error = PathError;

    /// Only JSON strings can name a segment.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(token) => Self::parse(token),
            _ => Err(PathError::EmptyElement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_identifier() {
        let el = PathElement::parse("name").unwrap();
        assert_eq!(el.property_name(), "name");
        assert!(!el.is_complex());
        assert!(el.sub_expression().is_none());
        assert_eq!(el.to_string(), "name");

        let el = PathElement::parse("0").unwrap();
        assert_eq!(el.property_name(), "0");
    }

    #[test]
    fn bracket_suffix() {
        let el = PathElement::parse("books[currentBook]").unwrap();
        assert_eq!(el.property_name(), "books");
        assert!(el.is_complex());
        let sub = el.sub_expression().unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.elements()[0].property_name(), "currentBook");
        assert_eq!(el.to_string(), "books[currentBook]");

        let el = PathElement::parse("a[b.c_1]").unwrap();
        assert_eq!(el.sub_expression().unwrap().len(), 2);
        assert_eq!(el.to_string(), "a[b.c_1]");

        assert!(PathElement::parse("a[1b]").is_ok());
    }

    #[test]
    fn rejects_literal_and_quoted_indices() {
        for token in ["address[1]", "address[42]", "address['city']", "a[\"b\"]"] {
            assert_eq!(
                PathElement::parse(token),
                Err(PathError::InvalidElement(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["a.b", "a[]", "[b]", "a[b", "a b", "a[b]c", "a[b][c]", "é"] {
            assert_eq!(
                PathElement::parse(token),
                Err(PathError::InvalidElement(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn empty_and_non_textual_tokens() {
        assert_eq!(PathElement::parse(""), Err(PathError::EmptyElement));
        assert_eq!(PathElement::try_from(&json!(null)), Err(PathError::EmptyElement));
        assert_eq!(PathElement::try_from(&json!(7)), Err(PathError::EmptyElement));
        assert!(PathElement::try_from(&json!("city")).is_ok());
    }
}
