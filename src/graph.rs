//! Graph data structures and the small value types exchanged with engines.

use std::fmt;

use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use wasm_bindgen::JsValue;

use crate::value::JsObject;

/// Identifier of a node, as referenced by links.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	Num(Number),
	Str(String),
}

impl NodeId {
	/// Read an id out of a JSON scalar. Objects (links whose end points the
	/// engine already resolved to nodes) carry their id in an `id` field.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(n) => Some(Self::Num(n.clone())),
			Value::String(s) => Some(Self::Str(s.clone())),
			Value::Object(map) => map.get("id").and_then(Self::from_value),
			_ => None,
		}
	}
}

impl From<i64> for NodeId {
	fn from(id: i64) -> Self {
		Self::Num(id.into())
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self::Str(id.to_string())
	}
}

impl From<NodeId> for Value {
	fn from(id: NodeId) -> Value {
		match id {
			NodeId::Num(n) => Value::Number(n),
			NodeId::Str(s) => Value::String(s),
		}
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Num(n) => write!(f, "{}", n),
			Self::Str(s) => f.write_str(s),
		}
	}
}

/// JS numbers are doubles; integral ones map to JSON integers so they compare
/// equal to ids parsed from JSON text.
fn number_from_f64(n: f64) -> Option<Number> {
	if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
		Some(Number::from(n as i64))
	} else {
		Number::from_f64(n)
	}
}

/// A node in the graph.
///
/// Every field is free-form: which one holds the id is decided by the
/// `nodeId` property, so nothing here requires an `id` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphNode {
	pub fields: Map<String, Value>,
}

impl GraphNode {
	/// A node with its id in the default `id` field.
	pub fn new(id: impl Into<NodeId>) -> Self {
		Self::default().with_id("id", id)
	}

	pub fn with_id(self, key: &str, id: impl Into<NodeId>) -> Self {
		let id: NodeId = id.into();
		self.with(key, id)
	}

	/// Attach a field, e.g. the one named by a `nodeColor` field accessor.
	pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.fields.insert(key.to_string(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}

	/// The id stored under `key`, the field the `nodeId` property names.
	pub fn id_in(&self, key: &str) -> Option<NodeId> {
		self.get(key).and_then(NodeId::from_value)
	}

	pub fn id(&self) -> Option<NodeId> {
		self.id_in("id")
	}
}

/// A directed edge between two nodes. End point fields are named by the
/// `linkSource` and `linkTarget` properties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphLink {
	pub fields: Map<String, Value>,
}

impl GraphLink {
	/// A link with its end points in the default `source` and `target` fields.
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
		let (source, target): (NodeId, NodeId) = (source.into(), target.into());
		Self::default().with("source", source).with("target", target)
	}

	pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.fields.insert(key.to_string(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}

	pub fn source(&self) -> Option<NodeId> {
		self.get("source").and_then(NodeId::from_value)
	}

	pub fn target(&self) -> Option<NodeId> {
		self.get("target").and_then(NodeId::from_value)
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

/// A node or link as seen by a callback.
///
/// Items coming from an engine stay on the JS side and are read one field at
/// a time. The 3D engines hang cyclic scene objects off every item
/// (`__threeObj`), so an item is never copied as a whole.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphObject {
	/// The engine's own object, handed back as-is to methods that match by
	/// identity (`emitParticle`).
	Engine(JsObject),
	/// An item built on the Rust side.
	Data(Value),
}

impl GraphObject {
	pub fn from_data(data: Value) -> Self {
		Self::Data(data)
	}

	/// Read a scalar field (string, number, bool or null), e.g.
	/// `obj.get("group")`. Nested objects are not copied; use
	/// [`GraphObject::object`] for those.
	pub fn get(&self, key: &str) -> Option<Value> {
		match self {
			Self::Data(data) => data.get(key).filter(|v| !v.is_object() && !v.is_array()).cloned(),
			Self::Engine(raw) => js_field(raw, key).and_then(|v| js_scalar(&v)),
		}
	}

	/// A nested object, e.g. a link's `source` once the engine has resolved
	/// it to the node.
	pub fn object(&self, key: &str) -> Option<GraphObject> {
		match self {
			Self::Data(data) => data
				.get(key)
				.filter(|v| v.is_object() || v.is_array())
				.map(|v| Self::Data(v.clone())),
			Self::Engine(raw) => js_field(raw, key)
				.filter(|v| v.is_object())
				.map(|v| Self::Engine(JsObject::new(v))),
		}
	}

	pub fn id(&self) -> Option<NodeId> {
		self.get("id").as_ref().and_then(NodeId::from_value)
	}

	/// Id of a link end point, whether the engine has replaced it with the
	/// node object yet or not.
	pub fn end_id(&self, key: &str) -> Option<NodeId> {
		match self.get(key) {
			Some(v) => NodeId::from_value(&v),
			None => self.object(key).and_then(|node| node.id()),
		}
	}

	pub fn raw(&self) -> Option<&JsObject> {
		match self {
			Self::Engine(raw) => Some(raw),
			Self::Data(_) => None,
		}
	}
}

fn js_field(raw: &JsObject, key: &str) -> Option<JsValue> {
	if !raw.as_js().is_object() {
		return None;
	}
	Reflect::get(raw.as_js(), &JsValue::from_str(key))
		.ok()
		.filter(|v| !v.is_undefined())
}

fn js_scalar(value: &JsValue) -> Option<Value> {
	if value.is_null() {
		Some(Value::Null)
	} else if let Some(b) = value.as_bool() {
		Some(Value::Bool(b))
	} else if let Some(n) = value.as_f64() {
		number_from_f64(n).map(Value::Number)
	} else {
		value.as_string().map(Value::String)
	}
}

/// Node passed to callbacks.
pub type NodeObject = GraphObject;
/// Link passed to callbacks.
pub type LinkObject = GraphObject;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

/// Camera target for `cameraPosition`; omitted axes keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub z: Option<f64>,
}

/// Extent of all node positions, per axis as `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphBbox {
	pub x: (f64, f64),
	pub y: (f64, f64),
	#[serde(default)]
	pub z: Option<(f64, f64)>,
}

/// Drag offset reported by `onNodeDrag` / `onNodeDragEnd`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Translate {
	pub x: f64,
	pub y: f64,
}

/// Pan/zoom transform reported by `onZoom` / `onZoomEnd`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
	pub k: f64,
	pub x: f64,
	pub y: f64,
}

/// End points handed to `linkPositionUpdate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkCoords {
	pub start: Point3,
	pub end: Point3,
}

/// Hierarchical layout constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DagMode {
	Td,
	Bu,
	Lr,
	Rl,
	Zout,
	Zin,
	Radialout,
	Radialin,
}

impl DagMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Td => "td",
			Self::Bu => "bu",
			Self::Lr => "lr",
			Self::Rl => "rl",
			Self::Zout => "zout",
			Self::Zin => "zin",
			Self::Radialout => "radialout",
			Self::Radialin => "radialin",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceEngine {
	D3,
	Ngraph,
}

impl ForceEngine {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::D3 => "d3",
			Self::Ngraph => "ngraph",
		}
	}
}

/// Number of dimensions the simulation runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NumDimensions {
	One,
	Two,
	Three,
}

impl TryFrom<u8> for NumDimensions {
	type Error = String;

	fn try_from(n: u8) -> Result<Self, Self::Error> {
		match n {
			1 => Ok(Self::One),
			2 => Ok(Self::Two),
			3 => Ok(Self::Three),
			_ => Err(format!("numDimensions must be 1, 2 or 3, got {}", n)),
		}
	}
}

impl From<NumDimensions> for u8 {
	fn from(n: NumDimensions) -> u8 {
		match n {
			NumDimensions::One => 1,
			NumDimensions::Two => 2,
			NumDimensions::Three => 3,
		}
	}
}

/// Camera controls of the 3D engine, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
	Trackball,
	Orbit,
	Fly,
}

/// How a custom canvas painter combines with the default drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasObjectMode {
	Replace,
	Before,
	After,
}

impl CanvasObjectMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Replace => "replace",
			Self::Before => "before",
			Self::After => "after",
		}
	}
}
