//! WebGL variant, driving the `ForceGraph3D` engine.

use serde::Serialize;
use serde_json::Value;

use crate::convert::{IntoJs, to_js};
use crate::engine::methods;
use crate::graph::ControlType;
use crate::props::{InitConfig, PropsBag};

use super::{Animated, Variant};

crate::force_graph_props! {
	/// Settable properties of the 3D WebGL graph.
	pub struct ForceGraph3DProps / ForceGraph3DProp : [common, pointer, three] {
		/// Show the mouse controls hint at the bottom of the canvas.
		show_nav_info / ShowNavInfo: bool = "showNavInfo",
		enable_navigation_controls / EnableNavigationControls: bool = "enableNavigationControls",
	}
}

/// Construction options of the 3D engine. Changing them after mount has no
/// effect.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceGraph3DInit {
	/// Camera controls flavor.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub control_type: Option<ControlType>,
	/// Passed through to the WebGL renderer constructor.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub renderer_config: Option<Value>,
}

impl IntoJs for ForceGraph3DInit {
	fn into_js(&self) -> wasm_bindgen::JsValue {
		to_js(self)
	}
}

impl InitConfig for ForceGraph3DInit {
	const NAMES: &'static [&'static str] = &["controlType", "rendererConfig"];

	fn present(&self) -> Vec<&'static str> {
		let mut present = Vec::new();
		if self.control_type.is_some() {
			present.push("controlType");
		}
		if self.renderer_config.is_some() {
			present.push("rendererConfig");
		}
		present
	}

	fn from_bag(bag: &PropsBag) -> Self {
		Self {
			control_type: bag.get("controlType"),
			renderer_config: bag.get("rendererConfig"),
		}
	}
}

/// The `3d-force-graph` component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Graph3D;

const METHODS: &[&str] = &[
	methods::D3_FORCE,
	methods::D3_REHEAT_SIMULATION,
	methods::EMIT_PARTICLE,
	methods::REFRESH,
	methods::GET_GRAPH_BBOX,
	methods::PAUSE_ANIMATION,
	methods::RESUME_ANIMATION,
	methods::STOP_ANIMATION,
	methods::ZOOM_TO_FIT,
	methods::CAMERA_POSITION,
	methods::SCENE,
	methods::CAMERA,
	methods::RENDERER,
	methods::CONTROLS,
	methods::LIGHTS,
	methods::POST_PROCESSING_COMPOSER,
	methods::SCREEN_TO_GRAPH_COORDS,
	methods::GRAPH_TO_SCREEN_COORDS,
];

impl Variant for Graph3D {
	const NAME: &'static str = "ForceGraph3D";
	const METHODS: &'static [&'static str] = METHODS;

	type Init = ForceGraph3DInit;
	type Props = ForceGraph3DProps;
}

impl Animated for Graph3D {}
