//! In-memory engines for exercising adapters without a browser.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::composite::EngineSet;
use crate::engine::{
	AnimationMethods, CanvasMethods, Engine, ForceMethods, InitOf, PropOf, SceneMethods,
};
use crate::error::EngineError;
use crate::graph::{CameraPosition, GraphBbox, LinkObject, Point2, Point3};
use crate::props::{InitConfig, PropChange, Size};
use crate::value::JsObject;
use crate::variants::{Animated, Graph2D, Graph3D, GraphAr, GraphVr, Variant};

/// Something an engine was asked to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
	Created {
		variant: &'static str,
		init: Vec<&'static str>,
	},
	Set {
		variant: &'static str,
		name: &'static str,
		value: String,
	},
	Resized {
		variant: &'static str,
		size: Size,
	},
	Method {
		variant: &'static str,
		name: &'static str,
	},
	Destroyed {
		variant: &'static str,
	},
}

/// Records every engine call made against it. Clones share the log.
#[derive(Clone, Debug, Default)]
pub struct MockContainer {
	log: Rc<RefCell<Vec<Event>>>,
	failing: Rc<RefCell<Option<&'static str>>>,
}

impl MockContainer {
	pub fn events(&self) -> Vec<Event> {
		self.log.borrow().clone()
	}

	pub fn clear(&self) {
		self.log.borrow_mut().clear();
	}

	/// Make the engine fail on `name`: a property, a method, or one of
	/// `"create"`, `"resize"`, `"destroy"`.
	pub fn fail_on(&self, name: &'static str) {
		*self.failing.borrow_mut() = Some(name);
	}

	/// Property names passed to setters, in call order.
	pub fn sets(&self) -> Vec<&'static str> {
		self.log
			.borrow()
			.iter()
			.filter_map(|event| match event {
				Event::Set { name, .. } => Some(*name),
				_ => None,
			})
			.collect()
	}

	/// Bound method names called, in call order.
	pub fn methods(&self) -> Vec<&'static str> {
		self.log
			.borrow()
			.iter()
			.filter_map(|event| match event {
				Event::Method { name, .. } => Some(*name),
				_ => None,
			})
			.collect()
	}

	pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
		self.log.borrow().iter().filter(|event| pred(event)).count()
	}

	fn check(&self, name: &'static str) -> Result<(), EngineError> {
		match *self.failing.borrow() {
			Some(failing) if failing == name => Err(EngineError::Thrown(format!("{} failed", name))),
			_ => Ok(()),
		}
	}

	fn record(&self, event: Event) {
		self.log.borrow_mut().push(event);
	}
}

/// Engine double for any variant.
#[derive(Debug)]
pub struct MockEngine<V> {
	container: MockContainer,
	variant: PhantomData<V>,
}

impl<V: Variant> MockEngine<V> {
	fn method(&self, name: &'static str) -> Result<(), EngineError> {
		self.container.check(name)?;
		self.container.record(Event::Method {
			variant: V::NAME,
			name,
		});
		Ok(())
	}
}

impl<V: Variant> Engine for MockEngine<V> {
	type Variant = V;
	type Container = MockContainer;

	fn create(container: &MockContainer, init: &InitOf<Self>) -> Result<Self, EngineError> {
		container.check("create")?;
		container.record(Event::Created {
			variant: V::NAME,
			init: init.present(),
		});
		Ok(Self {
			container: container.clone(),
			variant: PhantomData,
		})
	}

	fn set(&mut self, prop: PropOf<Self>) -> Result<(), EngineError> {
		self.container.check(prop.name())?;
		self.container.record(Event::Set {
			variant: V::NAME,
			name: prop.name(),
			value: format!("{:?}", prop),
		});
		Ok(())
	}

	fn resize(&mut self, size: Size) -> Result<(), EngineError> {
		self.container.check("resize")?;
		self.container.record(Event::Resized {
			variant: V::NAME,
			size,
		});
		Ok(())
	}

	fn destroy(self) -> Result<(), EngineError> {
		self.container.check("destroy")?;
		self.container.record(Event::Destroyed { variant: V::NAME });
		Ok(())
	}
}

impl<V: Variant> ForceMethods for MockEngine<V> {
	fn d3_force(&self, _: &str) -> Result<Option<JsObject>, EngineError> {
		self.method("d3Force").map(|_| None)
	}

	fn set_d3_force(&self, _: &str, _: Option<&JsObject>) -> Result<(), EngineError> {
		self.method("d3Force")
	}

	fn d3_reheat_simulation(&self) -> Result<(), EngineError> {
		self.method("d3ReheatSimulation")
	}

	fn emit_particle(&self, _: &LinkObject) -> Result<(), EngineError> {
		self.method("emitParticle")
	}

	fn refresh(&self) -> Result<(), EngineError> {
		self.method("refresh")
	}

	fn graph_bbox(&self) -> Result<Option<GraphBbox>, EngineError> {
		self.method("getGraphBbox")?;
		Ok(Some(GraphBbox {
			x: (-1.0, 1.0),
			y: (-1.0, 1.0),
			z: None,
		}))
	}
}

impl<V: Animated> AnimationMethods for MockEngine<V> {
	fn pause_animation(&self) -> Result<(), EngineError> {
		self.method("pauseAnimation")
	}

	fn resume_animation(&self) -> Result<(), EngineError> {
		self.method("resumeAnimation")
	}

	fn stop_animation(&self) -> Result<(), EngineError> {
		self.method("stopAnimation")
	}

	fn zoom_to_fit(&self, _: Option<f64>, _: Option<f64>) -> Result<(), EngineError> {
		self.method("zoomToFit")
	}
}

impl CanvasMethods for MockEngine<Graph2D> {
	fn center_at(&self) -> Result<Option<Point2>, EngineError> {
		self.method("centerAt").map(|_| Some(Point2::default()))
	}

	fn set_center_at(&self, _: f64, _: f64, _: Option<f64>) -> Result<(), EngineError> {
		self.method("centerAt")
	}

	fn zoom(&self) -> Result<f64, EngineError> {
		self.method("zoom").map(|_| 1.0)
	}

	fn set_zoom(&self, _: f64, _: Option<f64>) -> Result<(), EngineError> {
		self.method("zoom")
	}

	fn screen_to_graph_coords(&self, x: f64, y: f64) -> Result<Point2, EngineError> {
		self.method("screen2GraphCoords").map(|_| Point2 { x, y })
	}

	fn graph_to_screen_coords(&self, x: f64, y: f64) -> Result<Point2, EngineError> {
		self.method("graph2ScreenCoords").map(|_| Point2 { x, y })
	}
}

impl SceneMethods for MockEngine<Graph3D> {
	fn camera_position(&self) -> Result<Point3, EngineError> {
		self.method("cameraPosition").map(|_| Point3::default())
	}

	fn set_camera_position(
		&self,
		_: CameraPosition,
		_: Option<Point3>,
		_: Option<f64>,
	) -> Result<(), EngineError> {
		self.method("cameraPosition")
	}

	fn scene(&self) -> Result<JsObject, EngineError> {
		self.method("scene").map(|_| JsObject::null())
	}

	fn camera(&self) -> Result<JsObject, EngineError> {
		self.method("camera").map(|_| JsObject::null())
	}

	fn renderer(&self) -> Result<JsObject, EngineError> {
		self.method("renderer").map(|_| JsObject::null())
	}

	fn controls(&self) -> Result<JsObject, EngineError> {
		self.method("controls").map(|_| JsObject::null())
	}

	fn lights(&self) -> Result<JsObject, EngineError> {
		self.method("lights").map(|_| JsObject::null())
	}

	fn post_processing_composer(&self) -> Result<JsObject, EngineError> {
		self.method("postProcessingComposer").map(|_| JsObject::null())
	}

	fn screen_to_graph_coords(&self, x: f64, y: f64, z: f64) -> Result<Point3, EngineError> {
		self.method("screen2GraphCoords").map(|_| Point3 { x, y, z })
	}

	fn graph_to_screen_coords(&self, x: f64, y: f64, z: f64) -> Result<Point3, EngineError> {
		self.method("graph2ScreenCoords").map(|_| Point3 { x, y, z })
	}
}

/// Mock engines for every mode of the composite component.
#[derive(Debug)]
pub struct MockEngines;

impl EngineSet for MockEngines {
	type Container = MockContainer;
	type TwoD = MockEngine<Graph2D>;
	type ThreeD = MockEngine<Graph3D>;
	type Vr = MockEngine<GraphVr>;
	type Ar = MockEngine<GraphAr>;
}
