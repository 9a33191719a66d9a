//! Path evaluator.
//!
//! Walks a [`PathExpression`] over a JSON context. Bracket sub-expressions
//! are always resolved against the root context held by the evaluator, never
//! against the node currently being visited.

use std::borrow::Cow;

use serde_json::{Map, Number, Value};

use crate::{PathError, PathExpression};

/// Evaluator bound to one root context.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    context: Cow<'a, Value>,
}

impl Default for Evaluator<'_> {
    /// Evaluator over an empty mapping; every lookup misses.
    fn default() -> Self {
        Self {
            context: Cow::Owned(Value::Object(Map::new())),
        }
    }
}

impl From<Value> for Evaluator<'static> {
    fn from(context: Value) -> Self {
        Self {
            context: Cow::Owned(context),
        }
    }
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a Value) -> Self {
        Self {
            context: Cow::Borrowed(context),
        }
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    /// Parse `path` and resolve it against the bound context.
    pub fn parse(&self, path: &str) -> Result<&Value, PathError> {
        let expression = PathExpression::parse(path)?;
        self.resolve(&expression)
    }

    /// Resolve a pre-parsed expression against the bound context.
    pub fn resolve(&self, expression: &PathExpression) -> Result<&Value, PathError> {
        resolve_in(&self.context, expression)
    }
}

/// Resolve `path` against `context` in one call.
///
/// A `null` context is rejected up front with [`PathError::EmptyContext`].
pub fn parse<'a>(context: &'a Value, path: &str) -> Result<&'a Value, PathError> {
    if context.is_null() {
        return Err(PathError::EmptyContext);
    }
    let expression = PathExpression::parse(path)?;
    resolve_in(context, &expression)
}

/// Like [`parse`], for callers that receive the path as a JSON value.
pub fn parse_value<'a>(context: &'a Value, path: &Value) -> Result<&'a Value, PathError> {
    if context.is_null() {
        return Err(PathError::EmptyContext);
    }
    let expression = PathExpression::try_from(path)?;
    resolve_in(context, &expression)
}

fn resolve_in<'a>(root: &'a Value, expression: &PathExpression) -> Result<&'a Value, PathError> {
    let mut current = root;
    for element in expression {
        let name = element.property_name();
        log::trace!("resolving element `{element}`");
        current = own_property(current, name).ok_or_else(|| {
            log::debug!("property `{name}` not found while resolving `{expression}`");
            PathError::PropertyNotFound(name.to_string())
        })?;
        if let Some(sub) = element.sub_expression() {
            let index = resolve_in(root, sub)?;
            // Report the element as written; the index value itself may be
            // arbitrarily large context data.
            current = index_into(current, index).ok_or_else(|| {
                log::debug!("index from `{sub}` not found under `{name}`");
                PathError::PropertyNotFound(element.to_string())
            })?;
        }
    }
    Ok(current)
}

/// Member lookup by name. Arrays own their in-range canonical positions.
fn own_property<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(name),
        Value::Array(items) => canonical_position(name).and_then(|idx| items.get(idx)),
        _ => None,
    }
}

/// Member lookup by a resolved index value.
fn index_into<'a>(value: &'a Value, index: &Value) -> Option<&'a Value> {
    match value {
        Value::Object(map) => key_of(index).and_then(|key| map.get(key.as_ref())),
        Value::Array(items) => position_of(index).and_then(|idx| items.get(idx)),
        _ => None,
    }
}

/// `"0"`, `"12"`; no sign, no leading zeros.
fn canonical_position(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    text.parse().ok()
}

fn position_of(index: &Value) -> Option<usize> {
    match index {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return usize::try_from(u).ok();
            }
            let f = n.as_f64()?;
            if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 {
                Some(f as usize)
            } else {
                None
            }
        }
        Value::String(text) => canonical_position(text),
        _ => None,
    }
}

/// Key text for a resolved index. Arrays and objects never act as keys.
fn key_of(index: &Value) -> Option<Cow<'_, str>> {
    match index {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_key(n))),
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        Value::Bool(false) => Some(Cow::Borrowed("false")),
        Value::Null => Some(Cow::Borrowed("null")),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// JavaScript number-to-string form: `1.0` keys as `"1"`, `1.5` as `"1.5"`,
/// and magnitudes of at least `1e21` or below `1e-6` in exponent notation
/// (`"1e+300"`, `"1.5e-7"`).
fn number_key(n: &Number) -> String {
    let f = match n.as_f64() {
        Some(f) if n.is_f64() => f,
        _ => return n.to_string(),
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{f:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    format!("{f}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_positions() {
        assert_eq!(canonical_position("0"), Some(0));
        assert_eq!(canonical_position("17"), Some(17));
        assert_eq!(canonical_position("01"), None);
        assert_eq!(canonical_position("-1"), None);
        assert_eq!(canonical_position(""), None);
        assert_eq!(canonical_position("1a"), None);
    }

    #[test]
    fn index_values_as_positions() {
        assert_eq!(position_of(&json!(2)), Some(2));
        assert_eq!(position_of(&json!(2.0)), Some(2));
        assert_eq!(position_of(&json!(2.5)), None);
        assert_eq!(position_of(&json!(-1)), None);
        assert_eq!(position_of(&json!("3")), Some(3));
        assert_eq!(position_of(&json!(true)), None);
    }

    #[test]
    fn index_values_as_keys() {
        assert_eq!(key_of(&json!("k")).as_deref(), Some("k"));
        assert_eq!(key_of(&json!(1)).as_deref(), Some("1"));
        assert_eq!(key_of(&json!(1.0)).as_deref(), Some("1"));
        assert_eq!(key_of(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(key_of(&json!(1e300)).as_deref(), Some("1e+300"));
        assert_eq!(key_of(&json!(-2.5e21)).as_deref(), Some("-2.5e+21"));
        assert_eq!(key_of(&json!(1.5e-7)).as_deref(), Some("1.5e-7"));
        assert_eq!(key_of(&json!(0.000001)).as_deref(), Some("0.000001"));
        assert_eq!(key_of(&json!(-0.0)).as_deref(), Some("0"));
        assert_eq!(key_of(&json!(false)).as_deref(), Some("false"));
        assert_eq!(key_of(&json!(null)).as_deref(), Some("null"));
        assert_eq!(key_of(&json!([1])), None);
        assert_eq!(key_of(&json!({})), None);
    }

    #[test]
    fn own_property_on_scalars_misses() {
        assert_eq!(own_property(&json!("abc"), "length"), None);
        assert_eq!(own_property(&json!(null), "a"), None);
        assert_eq!(own_property(&json!([1, 2]), "1"), Some(&json!(2)));
        assert_eq!(own_property(&json!([1, 2]), "2"), None);
    }

    #[test]
    fn default_evaluator_has_empty_context() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.context(), &json!({}));
        assert_eq!(
            evaluator.parse("age"),
            Err(PathError::PropertyNotFound("age".into()))
        );
        assert_eq!(evaluator.parse(""), Err(PathError::EmptyExpression));
    }

    #[test]
    fn unmatched_index_reports_element_not_value() {
        let ctx = json!({"a": {"k": 1}, "big": "x".repeat(4096), "arr": [1, 2]});
        assert_eq!(
            parse(&ctx, "a[.]"),
            Err(PathError::PropertyNotFound("a[]".into()))
        );
        assert_eq!(
            parse(&ctx, "arr[big]"),
            Err(PathError::PropertyNotFound("arr[big]".into()))
        );
    }

    #[test]
    fn exponent_keys_on_objects() {
        let ctx = json!({"n": 1e300, "table": {"1e+300": "huge"}});
        assert_eq!(parse(&ctx, "table[n]"), Ok(&json!("huge")));
    }

    #[test]
    fn owned_context() {
        let evaluator = Evaluator::from(json!({"a": {"b": 1}}));
        assert_eq!(evaluator.parse("a.b"), Ok(&json!(1)));
    }
}
