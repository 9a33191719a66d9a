//! context-path - resolve path expressions against JSON context trees.
//!
//! A path is a chain of identifiers separated by `.`; any identifier may
//! carry a bracketed sub-path whose value, looked up from the root context,
//! indexes into the identifier's value:
//!
//! ```
//! use serde_json::json;
//!
//! let context = json!({
//!     "books": [{"pages": 312}, {"pages": 299}],
//!     "currentBook": 1
//! });
//! let pages = context_path::parse(&context, "books[currentBook].pages").unwrap();
//! assert_eq!(pages, &json!(299));
//! ```
//!
//! Literal indices (`books[1]`) and quoted keys (`address['city']`) are
//! rejected by the grammar.

mod element;
mod error;
mod eval;
mod expression;
pub mod util;

pub use element::PathElement;
pub use error::{ErrorCode, PathError};
pub use eval::{parse, parse_value, Evaluator};
pub use expression::PathExpression;
pub use util::{accessed_properties, path_to_string, referenced_properties};
