//! Props and prop comparison.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::callback::Callback;

/// String-keyed props of a node.
pub type Props = BTreeMap<String, PropValue>;

/// A single prop value.
#[derive(Debug, Clone)]
pub enum PropValue {
	/// Plain data: scalars, arrays and objects.
	Value(Value),
	/// An event handler.
	Handler(Callback),
}

impl PropValue {
	/// The data value, if this is not a handler.
	pub fn as_value(&self) -> Option<&Value> {
		match self {
			Self::Value(value) => Some(value),
			Self::Handler(_) => None,
		}
	}

	/// The handler, if this is one.
	pub fn as_handler(&self) -> Option<&Callback> {
		match self {
			Self::Handler(callback) => Some(callback),
			Self::Value(_) => None,
		}
	}

	/// The string content, if this is a string value.
	pub fn as_str(&self) -> Option<&str> {
		self.as_value().and_then(Value::as_str)
	}

	/// Tolerant equality used by the reconciler.
	///
	/// Handlers match when they come from the same closure. Arrays and
	/// objects match when their canonical serialization matches. Everything
	/// else uses strict equality.
	pub fn is_equivalent(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Handler(a), Self::Handler(b)) => a.same_source(b),
			(Self::Value(a), Self::Value(b)) if is_composite(a) || is_composite(b) => {
				canonical_json(a) == canonical_json(b)
			}
			(Self::Value(a), Self::Value(b)) => a == b,
			_ => false,
		}
	}

	/// The string written to a host attribute, `None` for handlers.
	pub fn to_attribute_value(&self) -> Option<String> {
		match self {
			Self::Value(Value::String(s)) => Some(s.clone()),
			Self::Value(value) => Some(canonical_json(value)),
			Self::Handler(_) => None,
		}
	}
}

/// Whether two prop maps are equivalent under [`PropValue::is_equivalent`].
///
/// Maps with different key counts never match, even when one is a subset of
/// the other.
pub fn props_equivalent(a: &Props, b: &Props) -> bool {
	a.len() == b.len()
		&& a.iter().all(|(key, value)| {
			b.get(key)
				.is_some_and(|other| value.is_equivalent(other))
		})
}

fn is_composite(value: &Value) -> bool {
	matches!(value, Value::Array(_) | Value::Object(_))
}

/// Compact JSON form of `value`.
///
/// `serde_json::Map` is a `BTreeMap` (the `preserve_order` feature stays off),
/// so object keys always serialize sorted.
pub(crate) fn canonical_json(value: &Value) -> String {
	value.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn props(entries: &[(&str, PropValue)]) -> Props {
		entries
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	#[rstest]
	#[case(json!(1), json!(1), true)]
	#[case(json!(1), json!(2), false)]
	#[case(json!("a"), json!("a"), true)]
	#[case(json!("1"), json!(1), false)]
	#[case(json!(null), json!(null), true)]
	#[case(json!(true), json!(false), false)]
	#[case(json!({"a": 1, "b": [1, 2]}), json!({"b": [1, 2], "a": 1}), true)]
	#[case(json!({"a": 1}), json!({"a": 2}), false)]
	#[case(json!([1, 2]), json!([2, 1]), false)]
	#[case(json!([]), json!({}), false)]
	fn test_value_equivalence(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
		assert_eq!(PropValue::from(a).is_equivalent(&PropValue::from(b)), expected);
	}

	#[rstest]
	fn test_handler_never_equals_value() {
		let handler = PropValue::from(Callback::new(|_event| {}));
		assert!(!handler.is_equivalent(&PropValue::from("x")));
		assert!(handler.is_equivalent(&handler.clone()));
	}

	#[rstest]
	fn test_props_key_count_must_match() {
		let a = props(&[("id", "x".into())]);
		let b = props(&[("id", "x".into()), ("title", "t".into())]);
		assert!(!props_equivalent(&a, &b));
		assert!(!props_equivalent(&b, &a));
		assert!(props_equivalent(&a, &a.clone()));
	}

	#[rstest]
	fn test_props_same_count_different_keys() {
		let a = props(&[("id", "x".into())]);
		let b = props(&[("name", "x".into())]);
		assert!(!props_equivalent(&a, &b));
	}

	#[rstest]
	#[case(PropValue::from("plain"), Some("plain"))]
	#[case(PropValue::from(3), Some("3"))]
	#[case(PropValue::from(true), Some("true"))]
	#[case(PropValue::from(json!({"b": 1, "a": 2})), Some("{\"a\":2,\"b\":1}"))]
	#[case(PropValue::from(Callback::new(|_event| {})), None)]
	fn test_attribute_value(#[case] value: PropValue, #[case] expected: Option<&str>) {
		assert_eq!(value.to_attribute_value().as_deref(), expected);
	}

	#[rstest]
	fn test_canonical_json_escapes_keys() {
		assert_eq!(
			canonical_json(&json!({"q\"k": "v\n"})),
			"{\"q\\\"k\":\"v\\n\"}"
		);
	}
}
