//! The engine contract the adapter drives.
//!
//! An engine is the external, stateful visualization object: constructed once
//! against a container with its InitOnly configuration, then fed one setter
//! call per changed property, and finally torn down. Bound methods are split
//! into small traits so a handle only offers what its engine implements.

mod js;

pub use js::{JsEngine, JsForceGraph2D, JsForceGraph3D, JsForceGraphAR, JsForceGraphVR, JsVariant};

use crate::error::EngineError;
use crate::graph::{CameraPosition, GraphBbox, LinkObject, Point2, Point3};
use crate::props::{PropSet, Size};
use crate::value::JsObject;
use crate::variants::Variant;

/// Engine-side method names, shared by the bindings and the tables.
pub mod methods {
	pub const D3_FORCE: &str = "d3Force";
	pub const D3_REHEAT_SIMULATION: &str = "d3ReheatSimulation";
	pub const EMIT_PARTICLE: &str = "emitParticle";
	pub const REFRESH: &str = "refresh";
	pub const GET_GRAPH_BBOX: &str = "getGraphBbox";
	pub const PAUSE_ANIMATION: &str = "pauseAnimation";
	pub const RESUME_ANIMATION: &str = "resumeAnimation";
	pub const STOP_ANIMATION: &str = "stopAnimation";
	pub const ZOOM_TO_FIT: &str = "zoomToFit";
	pub const CENTER_AT: &str = "centerAt";
	pub const ZOOM: &str = "zoom";
	pub const SCREEN_TO_GRAPH_COORDS: &str = "screen2GraphCoords";
	pub const GRAPH_TO_SCREEN_COORDS: &str = "graph2ScreenCoords";
	pub const CAMERA_POSITION: &str = "cameraPosition";
	pub const SCENE: &str = "scene";
	pub const CAMERA: &str = "camera";
	pub const RENDERER: &str = "renderer";
	pub const CONTROLS: &str = "controls";
	pub const LIGHTS: &str = "lights";
	pub const POST_PROCESSING_COMPOSER: &str = "postProcessingComposer";

	/// Methods every variant forwards.
	pub const FORCE: &[&str] = &[D3_FORCE, D3_REHEAT_SIMULATION, EMIT_PARTICLE, REFRESH, GET_GRAPH_BBOX];
	/// Render-loop control of the 2D and 3D engines.
	pub const ANIMATION: &[&str] = &[PAUSE_ANIMATION, RESUME_ANIMATION, STOP_ANIMATION, ZOOM_TO_FIT];
}

/// Regular properties of an engine's variant.
pub type PropsOf<E> = <<E as Engine>::Variant as Variant>::Props;
/// A single setter call on an engine.
pub type PropOf<E> = <PropsOf<E> as PropSet>::Prop;
/// Construction configuration of an engine's variant.
pub type InitOf<E> = <<E as Engine>::Variant as Variant>::Init;

/// A stateful engine instance bound to one container.
pub trait Engine: Sized + 'static {
	type Variant: Variant;

	/// What the engine renders into.
	type Container;

	/// Construct against `container`. Absent InitOnly values fall back to
	/// the engine's own defaults.
	fn create(container: &Self::Container, init: &InitOf<Self>) -> Result<Self, EngineError>;

	/// Apply one Regular property.
	fn set(&mut self, prop: PropOf<Self>) -> Result<(), EngineError>;

	fn resize(&mut self, size: Size) -> Result<(), EngineError>;

	/// Release everything tied to the container.
	fn destroy(self) -> Result<(), EngineError>;
}

/// Force simulation access shared by every variant.
pub trait ForceMethods {
	/// The named d3 force, if one is installed.
	fn d3_force(&self, name: &str) -> Result<Option<JsObject>, EngineError>;

	/// Replace (or remove, with `None`) the named force.
	fn set_d3_force(&self, name: &str, force: Option<&JsObject>) -> Result<(), EngineError>;

	fn d3_reheat_simulation(&self) -> Result<(), EngineError>;

	/// Send a single particle along `link`.
	fn emit_particle(&self, link: &LinkObject) -> Result<(), EngineError>;

	fn refresh(&self) -> Result<(), EngineError>;

	/// Bounding box of all nodes, `None` while the graph is empty.
	fn graph_bbox(&self) -> Result<Option<GraphBbox>, EngineError>;
}

/// Render-loop control.
pub trait AnimationMethods {
	fn pause_animation(&self) -> Result<(), EngineError>;
	fn resume_animation(&self) -> Result<(), EngineError>;
	fn stop_animation(&self) -> Result<(), EngineError>;
	fn zoom_to_fit(&self, duration_ms: Option<f64>, padding: Option<f64>) -> Result<(), EngineError>;
}

/// Viewport control of the 2D canvas engine.
pub trait CanvasMethods {
	fn center_at(&self) -> Result<Option<Point2>, EngineError>;
	fn set_center_at(&self, x: f64, y: f64, duration_ms: Option<f64>) -> Result<(), EngineError>;
	fn zoom(&self) -> Result<f64, EngineError>;
	fn set_zoom(&self, k: f64, duration_ms: Option<f64>) -> Result<(), EngineError>;
	fn screen_to_graph_coords(&self, x: f64, y: f64) -> Result<Point2, EngineError>;
	fn graph_to_screen_coords(&self, x: f64, y: f64) -> Result<Point2, EngineError>;
}

/// Camera and scene access of the WebGL engine.
pub trait SceneMethods {
	fn camera_position(&self) -> Result<Point3, EngineError>;
	fn set_camera_position(
		&self,
		position: CameraPosition,
		look_at: Option<Point3>,
		transition_ms: Option<f64>,
	) -> Result<(), EngineError>;
	fn scene(&self) -> Result<JsObject, EngineError>;
	fn camera(&self) -> Result<JsObject, EngineError>;
	fn renderer(&self) -> Result<JsObject, EngineError>;
	fn controls(&self) -> Result<JsObject, EngineError>;
	fn lights(&self) -> Result<JsObject, EngineError>;
	fn post_processing_composer(&self) -> Result<JsObject, EngineError>;
	fn screen_to_graph_coords(&self, x: f64, y: f64, distance: f64) -> Result<Point3, EngineError>;
	fn graph_to_screen_coords(&self, x: f64, y: f64, z: f64) -> Result<Point3, EngineError>;
}
