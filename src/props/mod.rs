//! Property classification and change detection.
//!
//! Each component variant declares its settable properties as a typed struct
//! of optional fields (see [`force_graph_props!`](crate::force_graph_props)).
//! The adapter diffs two such structs field by field and applies one setter
//! per changed field. Construction-time configuration lives in a separate
//! [`InitConfig`] struct that the adapter only reads at mount.

mod macros;

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::convert::IntoJs;
use crate::value::FromJson;

/// How a named property reaches the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropKind {
	/// Applied through its setter whenever the value changes.
	Regular,
	/// Passed once to the engine constructor, ignored afterwards.
	InitOnly,
	/// Not a property: an engine method exposed on the handle.
	BoundMethod,
}

/// One entry of a variant's property classification table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertySpec {
	pub name: &'static str,
	pub kind: PropKind,
}

/// Container size. Either side may be left to the engine's default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: Option<f64>,
	pub height: Option<f64>,
}

impl Size {
	pub fn is_empty(&self) -> bool {
		self.width.is_none() && self.height.is_none()
	}
}

/// A single setter call: property name plus new value, or unset.
pub trait PropChange: Clone + fmt::Debug + IntoJs {
	/// Engine-side property (and setter) name.
	fn name(&self) -> &'static str;
}

/// A variant's typed set of Regular properties.
pub trait PropSet: Clone + Default + PartialEq + fmt::Debug + 'static {
	type Prop: PropChange;

	/// Engine names of every Regular property, in declaration order.
	const NAMES: &'static [&'static str];

	fn size(&self) -> Size;

	/// Setter calls that turn `prev` into `self`, skipping sizing.
	fn changes(&self, prev: &Self) -> Vec<Self::Prop>;

	/// Typed view of a loose bag. Keys that are not properties of this set
	/// are ignored.
	fn from_bag(bag: &PropsBag) -> Self;
}

/// Construction-time configuration of a variant.
pub trait InitConfig: Clone + Default + PartialEq + fmt::Debug + IntoJs + 'static {
	/// Engine names of every InitOnly property.
	const NAMES: &'static [&'static str];

	/// Names of the InitOnly properties that carry a value.
	fn present(&self) -> Vec<&'static str>;

	fn from_bag(bag: &PropsBag) -> Self;
}

/// Configuration for variants without InitOnly properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct NoInit {}

impl IntoJs for NoInit {
	fn into_js(&self) -> wasm_bindgen::JsValue {
		wasm_bindgen::JsValue::UNDEFINED
	}
}

impl InitConfig for NoInit {
	const NAMES: &'static [&'static str] = &[];

	fn present(&self) -> Vec<&'static str> {
		Vec::new()
	}

	fn from_bag(_: &PropsBag) -> Self {
		Self {}
	}
}

/// Loosely typed property values keyed by engine name, e.g. parsed from a
/// JSON config block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropsBag(Map<String, Value>);

impl PropsBag {
	pub fn new(map: Map<String, Value>) -> Self {
		Self(map)
	}

	pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text).map(Self)
	}

	pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
		self.0.insert(key.to_string(), value.into());
		self
	}

	pub fn raw(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.0.remove(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Typed value of `key`. A present key whose value has the wrong shape is
	/// dropped with a warning.
	pub fn get<T: FromJson>(&self, key: &str) -> Option<T> {
		let raw = self.0.get(key)?;
		let value = T::from_json(raw);
		if value.is_none() {
			warn!("force-graph: dropping `{}`, value {} does not fit", key, raw);
		}
		value
	}

	/// Keys with no entry in `table`.
	pub fn unknown_keys<'a>(&'a self, table: &[PropertySpec]) -> Vec<&'a str> {
		let known: HashSet<&str> = table.iter().map(|spec| spec.name).collect();
		self.keys().filter(|key| !known.contains(key)).collect()
	}

	/// Log the keys `table` does not know about; they never reach the engine.
	pub(crate) fn report_unknown(&self, component: &str, table: &[PropertySpec]) {
		for key in self.unknown_keys(table) {
			debug!("force-graph: {} ignores unknown property `{}`", component, key);
		}
	}
}

impl From<Map<String, Value>> for PropsBag {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn table() -> Vec<PropertySpec> {
		vec![
			PropertySpec {
				name: "nodeColor",
				kind: PropKind::Regular,
			},
			PropertySpec {
				name: "controlType",
				kind: PropKind::InitOnly,
			},
		]
	}

	#[test]
	fn unknown_keys_are_reported_not_rejected() {
		let bag = PropsBag::from_json_str(r#"{"nodeColor":"red","bogus":1}"#).unwrap();
		assert_eq!(bag.unknown_keys(&table()), vec!["bogus"]);
	}

	#[test]
	fn wrongly_shaped_values_are_dropped() {
		let mut bag = PropsBag::default();
		bag.insert("width", "wide").insert("height", 300.0);
		assert_eq!(bag.get::<f64>("width"), None);
		assert_eq!(bag.get::<f64>("height"), Some(300.0));
		assert_eq!(bag.get::<f64>("missing"), None);
	}

	#[test]
	fn no_init_has_nothing_present() {
		assert!(NoInit::default().present().is_empty());
		assert_eq!(NoInit::from_bag(&PropsBag::new(Map::new())), NoInit {});
		assert_eq!(bag_from(json!({"a": 1})).raw("a"), Some(&json!(1)));
	}

	fn bag_from(value: Value) -> PropsBag {
		match value {
			Value::Object(map) => PropsBag::from(map),
			_ => PropsBag::default(),
		}
	}
}
