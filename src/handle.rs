//! Stable reference to whichever engine instance an adapter currently owns.
//!
//! The host keeps a [`Handle`] across renders. It resolves the engine at
//! call time, so a handle created before mount starts working once the
//! adapter mounts and reports [`AdapterError::Detached`] after unmount.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::engine::methods::*;
use crate::engine::{AnimationMethods, CanvasMethods, Engine, ForceMethods, SceneMethods};
use crate::error::{AdapterError, AdapterResult, EngineError};
use crate::graph::{CameraPosition, GraphBbox, LinkObject, Point2, Point3};
use crate::value::JsObject;
use crate::variants::Variant;

/// Shared, late-bound access to an engine instance.
pub struct Handle<E> {
	slot: Rc<RefCell<Option<E>>>,
	component: &'static str,
}

impl<E> Clone for Handle<E> {
	fn clone(&self) -> Self {
		Self {
			slot: Rc::clone(&self.slot),
			component: self.component,
		}
	}
}

impl<E: Engine> Default for Handle<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> fmt::Debug for Handle<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let attached = self.slot.try_borrow().map(|slot| slot.is_some()).ok();
		f.debug_struct("Handle")
			.field("component", &self.component)
			.field("attached", &attached)
			.finish()
	}
}

impl<E: Engine> Handle<E> {
	pub fn new() -> Self {
		Self {
			slot: Rc::new(RefCell::new(None)),
			component: E::Variant::NAME,
		}
	}
}

impl<E> Handle<E> {
	/// Whether an engine instance is currently attached. A handle whose
	/// engine is busy counts as attached.
	pub fn is_attached(&self) -> bool {
		self.slot.try_borrow().map_or(true, |slot| slot.is_some())
	}

	/// Whether both handles refer to the same slot.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.slot, &other.slot)
	}

	pub(crate) fn attach(&self, method: &'static str, engine: E) -> AdapterResult<()> {
		let mut slot = self.slot.try_borrow_mut().map_err(|_| self.busy(method))?;
		if slot.is_some() {
			return Err(AdapterError::AlreadyMounted {
				component: self.component,
			});
		}
		*slot = Some(engine);
		Ok(())
	}

	pub(crate) fn detach(&self, method: &'static str) -> AdapterResult<Option<E>> {
		self.slot
			.try_borrow_mut()
			.map(|mut slot| slot.take())
			.map_err(|_| self.busy(method))
	}

	/// Run `f` against the attached engine.
	pub(crate) fn with<T>(
		&self,
		method: &'static str,
		f: impl FnOnce(&E) -> Result<T, EngineError>,
	) -> AdapterResult<T> {
		let slot = self.slot.try_borrow().map_err(|_| self.busy(method))?;
		let engine = slot.as_ref().ok_or(self.detached(method))?;
		f(engine).map_err(AdapterError::engine(self.component))
	}

	pub(crate) fn with_mut<T>(
		&self,
		method: &'static str,
		f: impl FnOnce(&mut E) -> Result<T, EngineError>,
	) -> AdapterResult<T> {
		let mut slot = self.slot.try_borrow_mut().map_err(|_| self.busy(method))?;
		let engine = slot.as_mut().ok_or(self.detached(method))?;
		f(engine).map_err(AdapterError::engine(self.component))
	}

	fn busy(&self, method: &'static str) -> AdapterError {
		AdapterError::Busy {
			component: self.component,
			method,
		}
	}

	fn detached(&self, method: &'static str) -> AdapterError {
		AdapterError::Detached {
			component: self.component,
			method,
		}
	}
}

impl<E: ForceMethods> Handle<E> {
	/// The named simulation force, if installed.
	pub fn d3_force(&self, name: &str) -> AdapterResult<Option<JsObject>> {
		self.with(D3_FORCE, |e| e.d3_force(name))
	}

	/// Install, replace, or with `None` remove a simulation force.
	pub fn set_d3_force(&self, name: &str, force: Option<&JsObject>) -> AdapterResult<&Self> {
		self.with(D3_FORCE, |e| e.set_d3_force(name, force))?;
		Ok(self)
	}

	pub fn d3_reheat_simulation(&self) -> AdapterResult<&Self> {
		self.with(D3_REHEAT_SIMULATION, |e| e.d3_reheat_simulation())?;
		Ok(self)
	}

	pub fn emit_particle(&self, link: &LinkObject) -> AdapterResult<&Self> {
		self.with(EMIT_PARTICLE, |e| e.emit_particle(link))?;
		Ok(self)
	}

	pub fn refresh(&self) -> AdapterResult<&Self> {
		self.with(REFRESH, |e| e.refresh())?;
		Ok(self)
	}

	pub fn graph_bbox(&self) -> AdapterResult<Option<GraphBbox>> {
		self.with(GET_GRAPH_BBOX, |e| e.graph_bbox())
	}
}

impl<E: AnimationMethods> Handle<E> {
	pub fn pause_animation(&self) -> AdapterResult<&Self> {
		self.with(PAUSE_ANIMATION, |e| e.pause_animation())?;
		Ok(self)
	}

	pub fn resume_animation(&self) -> AdapterResult<&Self> {
		self.with(RESUME_ANIMATION, |e| e.resume_animation())?;
		Ok(self)
	}

	pub fn stop_animation(&self) -> AdapterResult<&Self> {
		self.with(STOP_ANIMATION, |e| e.stop_animation())?;
		Ok(self)
	}

	/// Fit the viewport to all nodes over `duration_ms`, keeping `padding`
	/// pixels free around them.
	pub fn zoom_to_fit(&self, duration_ms: Option<f64>, padding: Option<f64>) -> AdapterResult<&Self> {
		self.with(ZOOM_TO_FIT, |e| e.zoom_to_fit(duration_ms, padding))?;
		Ok(self)
	}
}

impl<E: CanvasMethods> Handle<E> {
	/// Current viewport center in graph coordinates.
	pub fn center_at(&self) -> AdapterResult<Option<Point2>> {
		self.with(CENTER_AT, |e| e.center_at())
	}

	pub fn set_center_at(&self, x: f64, y: f64, duration_ms: Option<f64>) -> AdapterResult<&Self> {
		self.with(CENTER_AT, |e| e.set_center_at(x, y, duration_ms))?;
		Ok(self)
	}

	pub fn zoom(&self) -> AdapterResult<f64> {
		self.with(ZOOM, |e| e.zoom())
	}

	pub fn set_zoom(&self, k: f64, duration_ms: Option<f64>) -> AdapterResult<&Self> {
		self.with(ZOOM, |e| e.set_zoom(k, duration_ms))?;
		Ok(self)
	}

	pub fn screen_to_graph_coords(&self, x: f64, y: f64) -> AdapterResult<Point2> {
		self.with(SCREEN_TO_GRAPH_COORDS, |e| CanvasMethods::screen_to_graph_coords(e, x, y))
	}

	pub fn graph_to_screen_coords(&self, x: f64, y: f64) -> AdapterResult<Point2> {
		self.with(GRAPH_TO_SCREEN_COORDS, |e| CanvasMethods::graph_to_screen_coords(e, x, y))
	}
}

impl<E: SceneMethods> Handle<E> {
	pub fn camera_position(&self) -> AdapterResult<Point3> {
		self.with(CAMERA_POSITION, |e| e.camera_position())
	}

	/// Move the camera, optionally aiming it at `look_at`, over `transition_ms`.
	pub fn set_camera_position(
		&self,
		position: CameraPosition,
		look_at: Option<Point3>,
		transition_ms: Option<f64>,
	) -> AdapterResult<&Self> {
		self.with(CAMERA_POSITION, |e| {
			e.set_camera_position(position, look_at, transition_ms)
		})?;
		Ok(self)
	}

	pub fn scene(&self) -> AdapterResult<JsObject> {
		self.with(SCENE, |e| e.scene())
	}

	pub fn camera(&self) -> AdapterResult<JsObject> {
		self.with(CAMERA, |e| e.camera())
	}

	pub fn renderer(&self) -> AdapterResult<JsObject> {
		self.with(RENDERER, |e| e.renderer())
	}

	pub fn controls(&self) -> AdapterResult<JsObject> {
		self.with(CONTROLS, |e| e.controls())
	}

	pub fn lights(&self) -> AdapterResult<JsObject> {
		self.with(LIGHTS, |e| e.lights())
	}

	pub fn post_processing_composer(&self) -> AdapterResult<JsObject> {
		self.with(POST_PROCESSING_COMPOSER, |e| e.post_processing_composer())
	}

	/// Project a viewport point at `distance` from the camera into the scene.
	pub fn screen_to_scene_coords(&self, x: f64, y: f64, distance: f64) -> AdapterResult<Point3> {
		self.with(SCREEN_TO_GRAPH_COORDS, |e| {
			SceneMethods::screen_to_graph_coords(e, x, y, distance)
		})
	}

	pub fn scene_to_screen_coords(&self, x: f64, y: f64, z: f64) -> AdapterResult<Point3> {
		self.with(GRAPH_TO_SCREEN_COORDS, |e| {
			SceneMethods::graph_to_screen_coords(e, x, y, z)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Event, MockContainer, MockEngine};
	use crate::variants::{Graph2D, Graph3D, GraphVr};

	fn attached<V: Variant>(container: &MockContainer) -> Handle<MockEngine<V>> {
		let handle = Handle::new();
		let engine = MockEngine::create(container, &Default::default()).unwrap();
		handle.attach("mount", engine).unwrap();
		handle
	}

	#[test]
	fn detached_handle_reports_method_and_component() {
		let handle: Handle<MockEngine<Graph2D>> = Handle::new();
		let err = handle.zoom().unwrap_err();
		assert!(matches!(
			err,
			AdapterError::Detached {
				component: "ForceGraph2D",
				method: "zoom"
			}
		));
	}

	#[test]
	fn clones_share_the_engine() {
		let container = MockContainer::default();
		let handle = attached::<Graph3D>(&container);
		let copy = handle.clone();
		assert!(copy.ptr_eq(&handle));

		copy.pause_animation().unwrap().resume_animation().unwrap();
		assert_eq!(
			container.methods(),
			vec!["pauseAnimation", "resumeAnimation"]
		);
	}

	#[test]
	fn engine_failures_are_wrapped() {
		let container = MockContainer::default();
		let handle = attached::<GraphVr>(&container);
		container.fail_on(REFRESH);
		let err = handle.refresh().unwrap_err();
		assert!(matches!(
			err,
			AdapterError::Engine {
				component: "ForceGraphVR",
				..
			}
		));
	}

	#[test]
	fn reentrant_mutation_is_busy() {
		let container = MockContainer::default();
		let handle = attached::<Graph2D>(&container);
		let inner = handle.clone();
		let result = handle.with(ZOOM, |_| Ok(inner.detach("unmount")));
		assert!(matches!(result, Ok(Err(AdapterError::Busy { .. }))));
		assert!(handle.is_attached());
	}

	#[test]
	fn detach_clears_the_slot() {
		let container = MockContainer::default();
		let handle = attached::<Graph2D>(&container);
		assert!(handle.detach("unmount").unwrap().is_some());
		assert!(!handle.is_attached());
		assert!(handle.detach("unmount").unwrap().is_none());
		assert_eq!(container.events().len(), 1);
		assert!(matches!(container.events()[0], Event::Created { .. }));
	}
}
