//! AR.js marker variant, driving the `ForceGraphAR` engine.

use serde::Serialize;
use serde_json::Value;

use crate::convert::{IntoJs, to_js};
use crate::engine::methods::FORCE;
use crate::props::{InitConfig, PropsBag};

use super::Variant;

crate::force_graph_props! {
	/// Settable properties of the AR graph.
	pub struct ForceGraphARProps / ForceGraphARProp : [common, three, xr] {
		/// Height of the graph above the marker, in marker units.
		y_offset / YOffset: f64 = "yOffset",
		/// World units per marker unit.
		gl_scale / GlScale: f64 = "glScale",
	}
}

/// Construction options of the AR engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceGraphARInit {
	/// Attributes of the tracked `a-marker` element.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub marker_attrs: Option<Value>,
}

impl IntoJs for ForceGraphARInit {
	fn into_js(&self) -> wasm_bindgen::JsValue {
		to_js(self)
	}
}

impl InitConfig for ForceGraphARInit {
	const NAMES: &'static [&'static str] = &["markerAttrs"];

	fn present(&self) -> Vec<&'static str> {
		match self.marker_attrs {
			Some(_) => vec!["markerAttrs"],
			None => Vec::new(),
		}
	}

	fn from_bag(bag: &PropsBag) -> Self {
		Self {
			marker_attrs: bag.get("markerAttrs"),
		}
	}
}

/// The `3d-force-graph-ar` component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphAr;

impl Variant for GraphAr {
	const NAME: &'static str = "ForceGraphAR";
	const METHODS: &'static [&'static str] = FORCE;

	type Init = ForceGraphARInit;
	type Props = ForceGraphARProps;
}
