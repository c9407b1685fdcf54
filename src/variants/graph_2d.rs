//! HTML5 canvas variant, driving the `ForceGraph` engine.

use web_sys::CanvasRenderingContext2d;

use crate::engine::methods;
use crate::graph::{CanvasObjectMode, LinkObject, NodeObject, ZoomTransform};
use crate::props::NoInit;
use crate::value::{Accessor, Callback};

use super::{Animated, Variant};

crate::force_graph_props! {
	/// Settable properties of the 2D canvas graph.
	pub struct ForceGraph2DProps / ForceGraph2DProp : [common, pointer] {
		/// Whether custom node paint replaces, precedes or follows the default.
		node_canvas_object_mode / NodeCanvasObjectMode: Accessor<CanvasObjectMode> = "nodeCanvasObjectMode",
		/// Custom node paint: node, context, global scale.
		node_canvas_object / NodeCanvasObject: Callback<(NodeObject, CanvasRenderingContext2d, f64)> = "nodeCanvasObject",
		/// Hit-area paint: node, shadow color, context, global scale.
		node_pointer_area_paint / NodePointerAreaPaint: Callback<(NodeObject, String, CanvasRenderingContext2d, f64)> = "nodePointerAreaPaint",
		link_line_dash / LinkLineDash: Accessor<Vec<f64>> = "linkLineDash",
		link_canvas_object_mode / LinkCanvasObjectMode: Accessor<CanvasObjectMode> = "linkCanvasObjectMode",
		link_canvas_object / LinkCanvasObject: Callback<(LinkObject, CanvasRenderingContext2d, f64)> = "linkCanvasObject",
		link_pointer_area_paint / LinkPointerAreaPaint: Callback<(LinkObject, String, CanvasRenderingContext2d, f64)> = "linkPointerAreaPaint",
		/// Stop redrawing once the simulation has cooled and nothing moves.
		auto_pause_redraw / AutoPauseRedraw: bool = "autoPauseRedraw",
		min_zoom / MinZoom: f64 = "minZoom",
		max_zoom / MaxZoom: f64 = "maxZoom",
		on_render_frame_pre / OnRenderFramePre: Callback<(CanvasRenderingContext2d, f64)> = "onRenderFramePre",
		on_render_frame_post / OnRenderFramePost: Callback<(CanvasRenderingContext2d, f64)> = "onRenderFramePost",
		on_zoom / OnZoom: Callback<(ZoomTransform,)> = "onZoom",
		on_zoom_end / OnZoomEnd: Callback<(ZoomTransform,)> = "onZoomEnd",
		enable_zoom_interaction / EnableZoomInteraction: bool = "enableZoomInteraction",
		enable_pan_interaction / EnablePanInteraction: bool = "enablePanInteraction",
	}
}

/// The `force-graph` canvas component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Graph2D;

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
	methods::CENTER_AT,
	methods::ZOOM,
	methods::SCREEN_TO_GRAPH_COORDS,
	methods::GRAPH_TO_SCREEN_COORDS,
];

impl Variant for Graph2D {
	const NAME: &'static str = "ForceGraph2D";
	const METHODS: &'static [&'static str] = METHODS;

	type Init = NoInit;
	type Props = ForceGraph2DProps;
}

impl Animated for Graph2D {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::methods::{ANIMATION, FORCE};
	use crate::graph::NodeId;
	use crate::props::{PropChange, PropSet, PropsBag};

	#[test]
	fn methods_cover_force_and_animation() {
		for name in FORCE.iter().chain(ANIMATION) {
			assert!(Graph2D::METHODS.contains(name), "missing `{}`", name);
		}
	}

	#[test]
	fn canvas_only_changes_are_named_for_the_engine() {
		let prev = ForceGraph2DProps::default();
		let next = ForceGraph2DProps {
			min_zoom: Some(0.5),
			link_line_dash: Some(Accessor::Value(vec![2.0, 1.0])),
			..Default::default()
		};

		let names: Vec<_> = next.changes(&prev).iter().map(PropChange::name).collect();
		assert_eq!(names, vec!["linkLineDash", "minZoom"]);
	}

	#[test]
	fn graph_data_follows_renamed_id_fields() {
		let bag = PropsBag::from_json_str(
			r#"{
				"nodeId": "key",
				"linkSource": "from",
				"linkTarget": "to",
				"graphData": {
					"nodes": [{ "key": "a" }, { "key": "b" }],
					"links": [{ "from": "a", "to": "b" }]
				}
			}"#,
		)
		.unwrap();
		let (_, props) = Graph2D::from_bag(&bag);

		assert_eq!(props.node_id.as_deref(), Some("key"));
		assert_eq!(props.link_source.as_deref(), Some("from"));
		let data = props.graph_data.expect("graph data decodes");
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[1].id_in("key"), Some(NodeId::from("b")));
	}

	#[test]
	fn graph_data_with_fractional_ids_decodes() {
		let bag = PropsBag::from_json_str(r#"{"graphData": {"nodes": [{"id": 1.5}], "links": []}}"#)
			.unwrap();
		let (_, props) = Graph2D::from_bag(&bag);
		let data = props.graph_data.expect("graph data decodes");
		assert_eq!(data.nodes[0].id().map(|id| id.to_string()), Some("1.5".to_string()));
	}
}
