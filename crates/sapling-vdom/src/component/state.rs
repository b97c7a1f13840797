//! Deep merge of partial state.

use serde_json::{Map, Value};

/// Merges `patch` into `target`.
///
/// Objects merge key by key and arrays index by index, recursively. A
/// composite patch over a destination of another shape replaces the
/// destination with an empty container of the patch's shape first. Scalars,
/// including `null`, overwrite.
///
/// ```
/// use sapling_vdom::component::deep_merge;
/// use serde_json::json;
///
/// let mut state = json!({"a": {"x": 1}});
/// deep_merge(&mut state, &json!({"a": {"y": 2}}));
/// assert_eq!(state, json!({"a": {"x": 1, "y": 2}}));
/// ```
pub fn deep_merge(target: &mut Value, patch: &Value) {
	match patch {
		Value::Object(entries) => {
			if !target.is_object() {
				*target = Value::Object(Map::new());
			}
			if let Value::Object(map) = target {
				for (key, value) in entries {
					deep_merge(map.entry(key.clone()).or_insert(Value::Null), value);
				}
			}
		}
		Value::Array(items) => {
			if !target.is_array() {
				*target = Value::Array(Vec::new());
			}
			if let Value::Array(slots) = target {
				if slots.len() < items.len() {
					slots.resize(items.len(), Value::Null);
				}
				for (slot, item) in slots.iter_mut().zip(items) {
					deep_merge(slot, item);
				}
			}
		}
		scalar => *target = scalar.clone(),
	}
}
