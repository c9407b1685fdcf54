//! Conversions across the JS boundary.
//!
//! [`IntoJs`] turns a property value into the argument of an engine setter.
//! Callables become JS functions owned by the JS garbage collector; their
//! arguments come back through [`FromJs`].

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, MouseEvent};

use crate::graph::{
	CanvasObjectMode, DagMode, ForceEngine, GraphData, GraphObject, LinkCoords, NodeId,
	NumDimensions, Translate, ZoomTransform,
};
use crate::value::{Accessor, Callback, JsObject, Shared};

/// Conversion of a Rust value into the JS value an engine expects.
pub trait IntoJs {
	fn into_js(&self) -> JsValue;
}

/// Serialize with plain objects for maps, which is what the engines read.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
	let serializer = serde_wasm_bindgen::Serializer::json_compatible();
	match value.serialize(&serializer) {
		Ok(js) => js,
		Err(e) => {
			warn!("force-graph: value does not convert to JS: {}", e);
			JsValue::UNDEFINED
		}
	}
}

/// Deserialize an engine return value or callback argument.
pub fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, serde_wasm_bindgen::Error> {
	serde_wasm_bindgen::from_value(value)
}

impl<T: IntoJs> IntoJs for Option<T> {
	fn into_js(&self) -> JsValue {
		match self {
			Some(v) => v.into_js(),
			None => JsValue::UNDEFINED,
		}
	}
}

impl IntoJs for () {
	fn into_js(&self) -> JsValue {
		JsValue::UNDEFINED
	}
}

impl IntoJs for f64 {
	fn into_js(&self) -> JsValue {
		JsValue::from_f64(*self)
	}
}

impl IntoJs for bool {
	fn into_js(&self) -> JsValue {
		JsValue::from_bool(*self)
	}
}

impl IntoJs for String {
	fn into_js(&self) -> JsValue {
		JsValue::from_str(self)
	}
}

impl IntoJs for Vec<f64> {
	fn into_js(&self) -> JsValue {
		self.iter()
			.map(|n| JsValue::from_f64(*n))
			.collect::<js_sys::Array>()
			.into()
	}
}

impl IntoJs for serde_json::Value {
	fn into_js(&self) -> JsValue {
		to_js(self)
	}
}

impl IntoJs for Shared<GraphData> {
	fn into_js(&self) -> JsValue {
		to_js(&**self)
	}
}

impl IntoJs for JsObject {
	fn into_js(&self) -> JsValue {
		self.as_js().clone()
	}
}

impl IntoJs for DagMode {
	fn into_js(&self) -> JsValue {
		JsValue::from_str(self.as_str())
	}
}

impl IntoJs for ForceEngine {
	fn into_js(&self) -> JsValue {
		JsValue::from_str(self.as_str())
	}
}

impl IntoJs for CanvasObjectMode {
	fn into_js(&self) -> JsValue {
		JsValue::from_str(self.as_str())
	}
}

impl IntoJs for NumDimensions {
	fn into_js(&self) -> JsValue {
		JsValue::from(u8::from(*self))
	}
}

impl<T: IntoJs + 'static> IntoJs for Accessor<T> {
	fn into_js(&self) -> JsValue {
		match self {
			Accessor::Value(v) => v.into_js(),
			Accessor::Field(name) => JsValue::from_str(name),
			Accessor::Func(f) => f.into_js(),
		}
	}
}

impl<A, R> IntoJs for Callback<A, R>
where
	A: FromJsArgs + 'static,
	R: IntoJs + 'static,
{
	fn into_js(&self) -> JsValue {
		let f = self.clone();
		Closure::<dyn Fn(JsValue, JsValue, JsValue, JsValue) -> JsValue>::new(
			move |a, b, c, d| f.call(A::from_js_args([a, b, c, d])).into_js(),
		)
		.into_js_value()
	}
}

/// Conversion of one callback argument coming from an engine.
pub trait FromJs: Sized {
	fn from_js(value: JsValue) -> Self;
}

impl FromJs for JsValue {
	fn from_js(value: JsValue) -> Self {
		value
	}
}

impl FromJs for JsObject {
	fn from_js(value: JsValue) -> Self {
		JsObject::new(value)
	}
}

impl FromJs for GraphObject {
	fn from_js(value: JsValue) -> Self {
		GraphObject::Engine(JsObject::new(value))
	}
}

impl<T: FromJs> FromJs for Option<T> {
	fn from_js(value: JsValue) -> Self {
		if value.is_null() || value.is_undefined() {
			None
		} else {
			Some(T::from_js(value))
		}
	}
}

impl FromJs for f64 {
	fn from_js(value: JsValue) -> Self {
		value.as_f64().unwrap_or(f64::NAN)
	}
}

impl FromJs for String {
	fn from_js(value: JsValue) -> Self {
		value.as_string().unwrap_or_default()
	}
}

impl FromJs for MouseEvent {
	fn from_js(value: JsValue) -> Self {
		value.unchecked_into()
	}
}

impl FromJs for CanvasRenderingContext2d {
	fn from_js(value: JsValue) -> Self {
		value.unchecked_into()
	}
}

macro_rules! from_js_via_serde {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromJs for $ty {
				fn from_js(value: JsValue) -> Self {
					from_js(value).unwrap_or_default()
				}
			}
		)*
	};
}

from_js_via_serde!(Vec<NodeId>, Translate, ZoomTransform, LinkCoords);

/// Conversion of a callback's argument list. Engines call with up to four
/// positional arguments; missing ones arrive as `undefined`.
pub trait FromJsArgs: Sized {
	fn from_js_args(args: [JsValue; 4]) -> Self;
}

impl FromJsArgs for () {
	fn from_js_args(_: [JsValue; 4]) -> Self {}
}

impl<A: FromJs> FromJsArgs for (A,) {
	fn from_js_args([a, ..]: [JsValue; 4]) -> Self {
		(A::from_js(a),)
	}
}

impl<A: FromJs, B: FromJs> FromJsArgs for (A, B) {
	fn from_js_args([a, b, ..]: [JsValue; 4]) -> Self {
		(A::from_js(a), B::from_js(b))
	}
}

impl<A: FromJs, B: FromJs, C: FromJs> FromJsArgs for (A, B, C) {
	fn from_js_args([a, b, c, _]: [JsValue; 4]) -> Self {
		(A::from_js(a), B::from_js(b), C::from_js(c))
	}
}

impl<A: FromJs, B: FromJs, C: FromJs, D: FromJs> FromJsArgs for (A, B, C, D) {
	fn from_js_args([a, b, c, d]: [JsValue; 4]) -> Self {
		(A::from_js(a), B::from_js(b), C::from_js(c), D::from_js(d))
	}
}
