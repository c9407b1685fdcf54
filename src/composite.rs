//! The mode-dispatching component.
//!
//! [`CompositeAdapter`] holds exactly one variant adapter at a time. Changing
//! the mode tears the old engine down and mounts a new one; nothing carries
//! over between engines. The [`ForceGraphHandle`] survives the switch and
//! forwards to whichever engine is current, rejecting methods the active mode
//! does not have.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::adapter::Adapter;
use crate::engine::methods::*;
use crate::engine::{
	AnimationMethods, CanvasMethods, Engine, ForceMethods, JsForceGraph2D, JsForceGraph3D,
	JsForceGraphAR, JsForceGraphVR, SceneMethods,
};
use crate::error::{AdapterError, AdapterResult};
use crate::graph::{CameraPosition, GraphBbox, GraphData, LinkObject, Point2, Point3};
use crate::handle::Handle;
use crate::props::PropsBag;
use crate::value::{JsObject, Shared};
use crate::variants::{
	ForceGraph2DProps, ForceGraph3DInit, ForceGraph3DProps, ForceGraphARInit, ForceGraphARProps,
	ForceGraphVRProps, Graph2D, Graph3D, GraphAr, GraphVr, Variant,
};

const COMPONENT: &str = "ForceGraph";

/// Which engine the composite renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceGraphMode {
	#[serde(rename = "2D")]
	TwoD,
	#[default]
	#[serde(rename = "3D")]
	ThreeD,
	#[serde(rename = "VR")]
	Vr,
	#[serde(rename = "AR")]
	Ar,
}

impl ForceGraphMode {
	pub const ALL: [Self; 4] = [Self::TwoD, Self::ThreeD, Self::Vr, Self::Ar];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::TwoD => "2D",
			Self::ThreeD => "3D",
			Self::Vr => "VR",
			Self::Ar => "AR",
		}
	}
}

impl fmt::Display for ForceGraphMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An unrecognized mode string.
#[derive(Debug, thiserror::Error)]
#[error("unknown force graph mode `{0}`, expected 2D, 3D, VR or AR")]
pub struct UnknownMode(pub String);

impl FromStr for ForceGraphMode {
	type Err = UnknownMode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|mode| mode.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownMode(s.to_string()))
	}
}

/// Properties for whichever variant the mode selects.
#[derive(Clone, Debug, PartialEq)]
pub enum ModeProps {
	TwoD(ForceGraph2DProps),
	ThreeD(ForceGraph3DInit, ForceGraph3DProps),
	Vr(ForceGraphVRProps),
	Ar(ForceGraphARInit, ForceGraphARProps),
}

impl Default for ModeProps {
	fn default() -> Self {
		Self::ThreeD(Default::default(), Default::default())
	}
}

impl ModeProps {
	pub fn mode(&self) -> ForceGraphMode {
		match self {
			Self::TwoD(_) => ForceGraphMode::TwoD,
			Self::ThreeD(..) => ForceGraphMode::ThreeD,
			Self::Vr(_) => ForceGraphMode::Vr,
			Self::Ar(..) => ForceGraphMode::Ar,
		}
	}

	/// Read the `mode` key (default 3D) and hand every other key to the
	/// selected variant.
	pub fn from_bag(bag: &PropsBag) -> Self {
		let mode = match bag.raw("mode").and_then(|v| v.as_str()) {
			Some(name) => name.parse().unwrap_or_else(|e: UnknownMode| {
				warn!("force-graph: {}; using 3D", e);
				ForceGraphMode::default()
			}),
			None => ForceGraphMode::default(),
		};
		let mut rest = bag.clone();
		rest.remove("mode");
		Self::for_mode(mode, &rest)
	}

	pub fn for_mode(mode: ForceGraphMode, bag: &PropsBag) -> Self {
		match mode {
			ForceGraphMode::TwoD => Self::TwoD(Graph2D::from_bag(bag).1),
			ForceGraphMode::ThreeD => {
				let (init, props) = Graph3D::from_bag(bag);
				Self::ThreeD(init, props)
			}
			ForceGraphMode::Vr => Self::Vr(GraphVr::from_bag(bag).1),
			ForceGraphMode::Ar => {
				let (init, props) = GraphAr::from_bag(bag);
				Self::Ar(init, props)
			}
		}
	}

	/// Replace the graph data, whatever the mode.
	pub fn with_graph_data(mut self, data: Shared<GraphData>) -> Self {
		let slot = match &mut self {
			Self::TwoD(props) => &mut props.graph_data,
			Self::ThreeD(_, props) => &mut props.graph_data,
			Self::Vr(props) => &mut props.graph_data,
			Self::Ar(_, props) => &mut props.graph_data,
		};
		*slot = Some(data);
		self
	}
}

/// The engine used for each mode.
pub trait EngineSet: 'static {
	type Container;
	type TwoD: Engine<Variant = Graph2D, Container = Self::Container>
		+ ForceMethods
		+ AnimationMethods
		+ CanvasMethods;
	type ThreeD: Engine<Variant = Graph3D, Container = Self::Container>
		+ ForceMethods
		+ AnimationMethods
		+ SceneMethods;
	type Vr: Engine<Variant = GraphVr, Container = Self::Container> + ForceMethods;
	type Ar: Engine<Variant = GraphAr, Container = Self::Container> + ForceMethods;
}

/// The page-global engine bundles.
#[derive(Debug)]
pub struct JsEngines;

impl EngineSet for JsEngines {
	type Container = web_sys::HtmlElement;
	type TwoD = JsForceGraph2D;
	type ThreeD = JsForceGraph3D;
	type Vr = JsForceGraphVR;
	type Ar = JsForceGraphAR;
}

enum ActiveHandle<S: EngineSet> {
	TwoD(Handle<S::TwoD>),
	ThreeD(Handle<S::ThreeD>),
	Vr(Handle<S::Vr>),
	Ar(Handle<S::Ar>),
}

impl<S: EngineSet> ActiveHandle<S> {
	fn mode(&self) -> ForceGraphMode {
		match self {
			Self::TwoD(_) => ForceGraphMode::TwoD,
			Self::ThreeD(_) => ForceGraphMode::ThreeD,
			Self::Vr(_) => ForceGraphMode::Vr,
			Self::Ar(_) => ForceGraphMode::Ar,
		}
	}

	fn is_attached(&self) -> bool {
		match self {
			Self::TwoD(h) => h.is_attached(),
			Self::ThreeD(h) => h.is_attached(),
			Self::Vr(h) => h.is_attached(),
			Self::Ar(h) => h.is_attached(),
		}
	}
}

/// Stable handle of the composite component. Clones share state.
pub struct ForceGraphHandle<S: EngineSet = JsEngines>(Rc<RefCell<ActiveHandle<S>>>);

impl<S: EngineSet> Clone for ForceGraphHandle<S> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<S: EngineSet> Default for ForceGraphHandle<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: EngineSet> fmt::Debug for ForceGraphHandle<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ForceGraphHandle")
			.field(&self.0.try_borrow().map(|active| active.mode()).ok())
			.finish()
	}
}

/// Forward to the active engine; `$unsupported` arms name the modes that lack
/// the method.
macro_rules! dispatch {
	($self:ident, $method:expr, |$h:ident| $call:expr, [$($mode:ident),*]) => {
		$self.with_active($method, |active| match active {
			$( ActiveHandle::$mode($h) => $call, )*
			#[allow(unreachable_patterns)]
			other => Err(AdapterError::Unsupported {
				mode: other.mode(),
				method: $method,
			}),
		})
	};
}

impl<S: EngineSet> ForceGraphHandle<S> {
	pub fn new() -> Self {
		Self(Rc::new(RefCell::new(ActiveHandle::ThreeD(Handle::new()))))
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	/// Mode of the engine the handle currently forwards to.
	pub fn mode(&self) -> Option<ForceGraphMode> {
		self.0.try_borrow().map(|active| active.mode()).ok()
	}

	pub fn is_attached(&self) -> bool {
		self.0.try_borrow().map_or(true, |active| active.is_attached())
	}

	fn replace(&self, active: ActiveHandle<S>) -> AdapterResult<()> {
		let mut slot = self.0.try_borrow_mut().map_err(|_| AdapterError::Busy {
			component: COMPONENT,
			method: "switch",
		})?;
		*slot = active;
		Ok(())
	}

	fn with_active<T>(
		&self,
		method: &'static str,
		f: impl FnOnce(&ActiveHandle<S>) -> AdapterResult<T>,
	) -> AdapterResult<T> {
		let active = self.0.try_borrow().map_err(|_| AdapterError::Busy {
			component: COMPONENT,
			method,
		})?;
		f(&active)
	}

	pub fn d3_force(&self, name: &str) -> AdapterResult<Option<JsObject>> {
		dispatch!(self, D3_FORCE, |h| h.d3_force(name), [TwoD, ThreeD, Vr, Ar])
	}

	pub fn set_d3_force(&self, name: &str, force: Option<&JsObject>) -> AdapterResult<&Self> {
		dispatch!(self, D3_FORCE, |h| h.set_d3_force(name, force).map(drop), [TwoD, ThreeD, Vr, Ar])?;
		Ok(self)
	}

	pub fn d3_reheat_simulation(&self) -> AdapterResult<&Self> {
		dispatch!(self, D3_REHEAT_SIMULATION, |h| h.d3_reheat_simulation().map(drop), [TwoD, ThreeD, Vr, Ar])?;
		Ok(self)
	}

	pub fn emit_particle(&self, link: &LinkObject) -> AdapterResult<&Self> {
		dispatch!(self, EMIT_PARTICLE, |h| h.emit_particle(link).map(drop), [TwoD, ThreeD, Vr, Ar])?;
		Ok(self)
	}

	pub fn refresh(&self) -> AdapterResult<&Self> {
		dispatch!(self, REFRESH, |h| h.refresh().map(drop), [TwoD, ThreeD, Vr, Ar])?;
		Ok(self)
	}

	pub fn graph_bbox(&self) -> AdapterResult<Option<GraphBbox>> {
		dispatch!(self, GET_GRAPH_BBOX, |h| h.graph_bbox(), [TwoD, ThreeD, Vr, Ar])
	}

	pub fn pause_animation(&self) -> AdapterResult<&Self> {
		dispatch!(self, PAUSE_ANIMATION, |h| h.pause_animation().map(drop), [TwoD, ThreeD])?;
		Ok(self)
	}

	pub fn resume_animation(&self) -> AdapterResult<&Self> {
		dispatch!(self, RESUME_ANIMATION, |h| h.resume_animation().map(drop), [TwoD, ThreeD])?;
		Ok(self)
	}

	pub fn stop_animation(&self) -> AdapterResult<&Self> {
		dispatch!(self, STOP_ANIMATION, |h| h.stop_animation().map(drop), [TwoD, ThreeD])?;
		Ok(self)
	}

	pub fn zoom_to_fit(&self, duration_ms: Option<f64>, padding: Option<f64>) -> AdapterResult<&Self> {
		dispatch!(self, ZOOM_TO_FIT, |h| h.zoom_to_fit(duration_ms, padding).map(drop), [TwoD, ThreeD])?;
		Ok(self)
	}

	pub fn center_at(&self) -> AdapterResult<Option<Point2>> {
		dispatch!(self, CENTER_AT, |h| h.center_at(), [TwoD])
	}

	pub fn set_center_at(&self, x: f64, y: f64, duration_ms: Option<f64>) -> AdapterResult<&Self> {
		dispatch!(self, CENTER_AT, |h| h.set_center_at(x, y, duration_ms).map(drop), [TwoD])?;
		Ok(self)
	}

	pub fn zoom(&self) -> AdapterResult<f64> {
		dispatch!(self, ZOOM, |h| h.zoom(), [TwoD])
	}

	pub fn set_zoom(&self, k: f64, duration_ms: Option<f64>) -> AdapterResult<&Self> {
		dispatch!(self, ZOOM, |h| h.set_zoom(k, duration_ms).map(drop), [TwoD])?;
		Ok(self)
	}

	pub fn camera_position(&self) -> AdapterResult<Point3> {
		dispatch!(self, CAMERA_POSITION, |h| h.camera_position(), [ThreeD])
	}

	pub fn set_camera_position(
		&self,
		position: CameraPosition,
		look_at: Option<Point3>,
		transition_ms: Option<f64>,
	) -> AdapterResult<&Self> {
		dispatch!(
			self,
			CAMERA_POSITION,
			|h| h.set_camera_position(position, look_at, transition_ms).map(drop),
			[ThreeD]
		)?;
		Ok(self)
	}

	pub fn scene(&self) -> AdapterResult<JsObject> {
		dispatch!(self, SCENE, |h| h.scene(), [ThreeD])
	}

	pub fn camera(&self) -> AdapterResult<JsObject> {
		dispatch!(self, CAMERA, |h| h.camera(), [ThreeD])
	}

	pub fn renderer(&self) -> AdapterResult<JsObject> {
		dispatch!(self, RENDERER, |h| h.renderer(), [ThreeD])
	}

	pub fn controls(&self) -> AdapterResult<JsObject> {
		dispatch!(self, CONTROLS, |h| h.controls(), [ThreeD])
	}

	pub fn lights(&self) -> AdapterResult<JsObject> {
		dispatch!(self, LIGHTS, |h| h.lights(), [ThreeD])
	}

	pub fn post_processing_composer(&self) -> AdapterResult<JsObject> {
		dispatch!(self, POST_PROCESSING_COMPOSER, |h| h.post_processing_composer(), [ThreeD])
	}

	pub fn screen_to_graph_coords(&self, x: f64, y: f64) -> AdapterResult<Point2> {
		dispatch!(self, SCREEN_TO_GRAPH_COORDS, |h| h.screen_to_graph_coords(x, y), [TwoD])
	}

	pub fn graph_to_screen_coords(&self, x: f64, y: f64) -> AdapterResult<Point2> {
		dispatch!(self, GRAPH_TO_SCREEN_COORDS, |h| h.graph_to_screen_coords(x, y), [TwoD])
	}

	pub fn screen_to_scene_coords(&self, x: f64, y: f64, distance: f64) -> AdapterResult<Point3> {
		dispatch!(self, SCREEN_TO_GRAPH_COORDS, |h| h.screen_to_scene_coords(x, y, distance), [ThreeD])
	}

	pub fn scene_to_screen_coords(&self, x: f64, y: f64, z: f64) -> AdapterResult<Point3> {
		dispatch!(self, GRAPH_TO_SCREEN_COORDS, |h| h.scene_to_screen_coords(x, y, z), [ThreeD])
	}
}

enum Active<S: EngineSet> {
	TwoD(Adapter<S::TwoD>),
	ThreeD(Adapter<S::ThreeD>),
	Vr(Adapter<S::Vr>),
	Ar(Adapter<S::Ar>),
}

impl<S: EngineSet> Active<S> {
	fn fresh(mode: ForceGraphMode) -> (Self, ActiveHandle<S>) {
		match mode {
			ForceGraphMode::TwoD => {
				let adapter = Adapter::new();
				let handle = ActiveHandle::TwoD(adapter.handle());
				(Self::TwoD(adapter), handle)
			}
			ForceGraphMode::ThreeD => {
				let adapter = Adapter::new();
				let handle = ActiveHandle::ThreeD(adapter.handle());
				(Self::ThreeD(adapter), handle)
			}
			ForceGraphMode::Vr => {
				let adapter = Adapter::new();
				let handle = ActiveHandle::Vr(adapter.handle());
				(Self::Vr(adapter), handle)
			}
			ForceGraphMode::Ar => {
				let adapter = Adapter::new();
				let handle = ActiveHandle::Ar(adapter.handle());
				(Self::Ar(adapter), handle)
			}
		}
	}

	fn mode(&self) -> ForceGraphMode {
		match self {
			Self::TwoD(_) => ForceGraphMode::TwoD,
			Self::ThreeD(_) => ForceGraphMode::ThreeD,
			Self::Vr(_) => ForceGraphMode::Vr,
			Self::Ar(_) => ForceGraphMode::Ar,
		}
	}

	fn is_mounted(&self) -> bool {
		match self {
			Self::TwoD(a) => a.is_mounted(),
			Self::ThreeD(a) => a.is_mounted(),
			Self::Vr(a) => a.is_mounted(),
			Self::Ar(a) => a.is_mounted(),
		}
	}

	fn unmount(&mut self) -> AdapterResult<()> {
		match self {
			Self::TwoD(a) => a.unmount(),
			Self::ThreeD(a) => a.unmount(),
			Self::Vr(a) => a.unmount(),
			Self::Ar(a) => a.unmount(),
		}
	}
}

/// Adapter for the mode-dispatching component.
pub struct CompositeAdapter<S: EngineSet = JsEngines> {
	active: Active<S>,
	handle: ForceGraphHandle<S>,
}

impl<S: EngineSet> Default for CompositeAdapter<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: EngineSet> CompositeAdapter<S> {
	pub fn new() -> Self {
		Self::with_handle(ForceGraphHandle::new())
	}

	/// Adapter publishing through a host-created handle.
	pub fn with_handle(handle: ForceGraphHandle<S>) -> Self {
		let (active, published) = Active::fresh(ForceGraphMode::default());
		// A fresh handle is never borrowed, so this cannot be busy.
		if let Ok(mut slot) = handle.0.try_borrow_mut() {
			*slot = published;
		}
		Self { active, handle }
	}

	pub fn handle(&self) -> ForceGraphHandle<S> {
		self.handle.clone()
	}

	pub fn mode(&self) -> ForceGraphMode {
		self.active.mode()
	}

	pub fn is_mounted(&self) -> bool {
		self.active.is_mounted()
	}

	/// Mount the variant `props` selects. A mounted composite is left as it
	/// is; mode changes go through [`update`](Self::update).
	pub fn mount(&mut self, container: Option<&S::Container>, props: ModeProps) -> AdapterResult<()> {
		if self.is_mounted() {
			return Err(AdapterError::AlreadyMounted { component: COMPONENT });
		}
		if props.mode() != self.mode() {
			self.switch(props.mode())?;
		}
		match (&mut self.active, props) {
			(Active::TwoD(a), ModeProps::TwoD(p)) => a.mount(container, Default::default(), p),
			(Active::ThreeD(a), ModeProps::ThreeD(i, p)) => a.mount(container, i, p),
			(Active::Vr(a), ModeProps::Vr(p)) => a.mount(container, Default::default(), p),
			(Active::Ar(a), ModeProps::Ar(i, p)) => a.mount(container, i, p),
			(active, props) => Err(mismatch(active.mode(), props.mode())),
		}
	}

	/// Re-sync the active engine, or replace it when the mode changed.
	/// Returns the number of setter and sizing calls; a mode switch counts
	/// as zero.
	pub fn update(&mut self, container: Option<&S::Container>, props: ModeProps) -> AdapterResult<usize> {
		if props.mode() != self.mode() {
			let was_mounted = self.is_mounted();
			info!("force-graph: switching {} -> {}", self.mode(), props.mode());
			let torn_down = self.active.unmount();
			self.switch(props.mode())?;
			if was_mounted {
				self.mount(container, props)?;
			} else {
				self.update(container, props)?;
			}
			return torn_down.map(|_| 0);
		}
		match (&mut self.active, props) {
			(Active::TwoD(a), ModeProps::TwoD(p)) => a.update(p),
			(Active::ThreeD(a), ModeProps::ThreeD(i, p)) => a.sync(&i, p),
			(Active::Vr(a), ModeProps::Vr(p)) => a.update(p),
			(Active::Ar(a), ModeProps::Ar(i, p)) => a.sync(&i, p),
			(active, props) => Err(mismatch(active.mode(), props.mode())),
		}
	}

	pub fn unmount(&mut self) -> AdapterResult<()> {
		self.active.unmount()
	}

	/// Drop the current adapter and publish a fresh one for `mode`.
	fn switch(&mut self, mode: ForceGraphMode) -> AdapterResult<()> {
		let (active, published) = Active::fresh(mode);
		self.handle.replace(published)?;
		self.active = active;
		Ok(())
	}
}

fn mismatch(active: ForceGraphMode, requested: ForceGraphMode) -> AdapterError {
	AdapterError::Unsupported {
		mode: active,
		method: match requested {
			ForceGraphMode::TwoD => "mount 2D",
			ForceGraphMode::ThreeD => "mount 3D",
			ForceGraphMode::Vr => "mount VR",
			ForceGraphMode::Ar => "mount AR",
		},
	}
}
