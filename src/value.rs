//! Property value types and their change-detection semantics.
//!
//! Primitives and field names compare by value. Callables, graph data and
//! engine-side objects compare by pointer identity, so a parent that rebuilds a
//! closure on every render causes a re-apply while one that keeps it does not.

use std::fmt;
use std::rc::Rc;

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::JsValue;

use crate::graph::{
	CanvasObjectMode, ControlType, DagMode, ForceEngine, GraphData, NumDimensions,
};

/// Reference-counted value compared by pointer identity.
pub struct Shared<T>(Rc<T>);

impl<T> Shared<T> {
	pub fn new(value: T) -> Self {
		Self(Rc::new(value))
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl<T> Clone for Shared<T> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<T> PartialEq for Shared<T> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl<T> std::ops::Deref for Shared<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.0
	}
}

impl<T> From<T> for Shared<T> {
	fn from(value: T) -> Self {
		Self::new(value)
	}
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// An engine-side object (THREE objects, d3 forces, renderers) held opaquely.
#[derive(Clone)]
pub struct JsObject(Rc<JsValue>);

impl JsObject {
	pub fn new(value: JsValue) -> Self {
		Self(Rc::new(value))
	}

	/// A `null` placeholder, e.g. for an object the engine has not created yet.
	pub fn null() -> Self {
		Self::new(JsValue::NULL)
	}

	pub fn as_js(&self) -> &JsValue {
		&self.0
	}
}

impl PartialEq for JsObject {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for JsObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "JsObject({:p})", Rc::as_ptr(&self.0))
	}
}

/// A host callable, invoked with a tuple of arguments.
pub struct Callback<A, R = ()>(Rc<dyn Fn(A) -> R>);

impl<A, R> Callback<A, R> {
	pub fn new(f: impl Fn(A) -> R + 'static) -> Self {
		Self(Rc::new(f))
	}

	pub fn call(&self, args: A) -> R {
		(self.0)(args)
	}
}

impl<A, R> Clone for Callback<A, R> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<A, R> PartialEq for Callback<A, R> {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl<A, R> fmt::Debug for Callback<A, R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Callback({:p})", Rc::as_ptr(&self.0) as *const ())
	}
}

/// Per-node or per-link style input: a constant, the name of a field on each
/// item, or a function of the item.
#[derive(Clone, Debug, PartialEq)]
pub enum Accessor<T> {
	Value(T),
	Field(String),
	Func(Callback<(crate::graph::GraphObject,), T>),
}

impl<T> Accessor<T> {
	/// Read the named field of each item.
	pub fn field(name: impl Into<String>) -> Self {
		Self::Field(name.into())
	}

	pub fn func(f: impl Fn(crate::graph::GraphObject) -> T + 'static) -> Self {
		Self::Func(Callback::new(move |(obj,)| f(obj)))
	}
}

impl<T> From<T> for Accessor<T> {
	fn from(value: T) -> Self {
		Self::Value(value)
	}
}

impl From<&str> for Accessor<String> {
	fn from(value: &str) -> Self {
		Self::Value(value.to_string())
	}
}

/// Decoding of a single property from a loosely typed JSON bag.
///
/// `None` means the JSON shape cannot represent this property; the caller
/// drops the key.
pub trait FromJson: Sized {
	fn from_json(value: &Value) -> Option<Self>;
}

fn via_serde<T: DeserializeOwned>(value: &Value) -> Option<T> {
	serde_json::from_value(value.clone()).ok()
}

macro_rules! from_json_via_serde {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromJson for $ty {
				fn from_json(value: &Value) -> Option<Self> {
					via_serde(value)
				}
			}
		)*
	};
}

from_json_via_serde!(
	f64,
	bool,
	String,
	Vec<f64>,
	Value,
	DagMode,
	ForceEngine,
	NumDimensions,
	ControlType,
	CanvasObjectMode,
);

impl FromJson for Shared<GraphData> {
	fn from_json(value: &Value) -> Option<Self> {
		match serde_json::from_value::<GraphData>(value.clone()) {
			Ok(data) => Some(Shared::new(data)),
			Err(e) => {
				warn!("force-graph: graphData does not parse: {}", e);
				None
			}
		}
	}
}

impl<T: FromJson> FromJson for Accessor<T> {
	fn from_json(value: &Value) -> Option<Self> {
		if let Some(v) = T::from_json(value) {
			return Some(Self::Value(v));
		}
		value.as_str().map(Self::field)
	}
}

impl<A, R> FromJson for Callback<A, R> {
	fn from_json(_: &Value) -> Option<Self> {
		None
	}
}

impl FromJson for JsObject {
	fn from_json(_: &Value) -> Option<Self> {
		None
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn callbacks_compare_by_identity() {
		let a: Callback<()> = Callback::new(|()| {});
		let b: Callback<()> = Callback::new(|()| {});
		assert_eq!(a, a.clone());
		assert_ne!(a, b);
	}

	#[test]
	fn shared_compares_by_identity_not_contents() {
		let a = Shared::new(GraphData::default());
		let b = Shared::new(GraphData::default());
		assert_eq!(a, a.clone());
		assert_ne!(a, b);
	}

	#[test]
	fn accessor_literals_compare_by_value() {
		assert_eq!(Accessor::from("red"), Accessor::Value("red".to_string()));
		assert_ne!(Accessor::<f64>::Value(1.0), Accessor::Field("val".into()));
	}

	#[test]
	fn accessor_from_json_prefers_literal() {
		assert_eq!(
			Accessor::<f64>::from_json(&json!(4.0)),
			Some(Accessor::Value(4.0))
		);
		assert_eq!(
			Accessor::<f64>::from_json(&json!("size")),
			Some(Accessor::Field("size".into()))
		);
		assert_eq!(Accessor::<f64>::from_json(&json!([1])), None);
	}

	#[test]
	fn callables_never_come_from_json() {
		assert!(Callback::<()>::from_json(&json!("onClick")).is_none());
	}
}
