//! Error taxonomy for path parsing and resolution.

use std::fmt;

use thiserror::Error;

/// Stable identifier of a [`PathError`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    PropertyNotFound,
    EmptyContext,
    EmptyExpression,
    EmptyElement,
    InvalidElement,
}

impl ErrorCode {
    /// Identifier string, e.g. `"PropertyNotFound"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PropertyNotFound => "PropertyNotFound",
            Self::EmptyContext => "EmptyContext",
            Self::EmptyExpression => "EmptyExpression",
            Self::EmptyElement => "EmptyElement",
            Self::InvalidElement => "InvalidElement",
        }
    }

    /// Numeric code used by earlier consumers of this format.
    ///
    /// - `ERR_CODE_100`: property not found
    /// - `ERR_CODE_101`: context is empty
    /// - `ERR_CODE_200`: path expression is empty
    /// - `ERR_CODE_300`: path element is empty
    /// - `ERR_CODE_301`: path element is not valid
    pub fn legacy_code(self) -> &'static str {
        match self {
            Self::PropertyNotFound => "ERR_CODE_100",
            Self::EmptyContext => "ERR_CODE_101",
            Self::EmptyExpression => "ERR_CODE_200",
            Self::EmptyElement => "ERR_CODE_300",
            Self::InvalidElement => "ERR_CODE_301",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path failure. Messages are the same text earlier consumers of the
/// `ERR_CODE_*` codes received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Property {0} not found")]
    PropertyNotFound(String),
    #[error("Context is empty")]
    EmptyContext,
    #[error("Query String is empty")]
    EmptyExpression,
    #[error("Query Element is empty")]
    EmptyElement,
    #[error("Query Element with value '{0}' is not valid")]
    InvalidElement(String),
}

impl PathError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::PropertyNotFound(_) => ErrorCode::PropertyNotFound,
            Self::EmptyContext => ErrorCode::EmptyContext,
            Self::EmptyExpression => ErrorCode::EmptyExpression,
            Self::EmptyElement => ErrorCode::EmptyElement,
            Self::InvalidElement(_) => ErrorCode::InvalidElement,
        }
    }

    /// Human-readable message; same text as `Display`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
