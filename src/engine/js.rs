//! Engines backed by the UMD bundles loaded on the page.
//!
//! Each variant's bundle exposes a global constructor. Setters and methods
//! are looked up by name on the instance, so a bundle that lacks one reports
//! [`EngineError::MissingMethod`] instead of panicking.

use std::fmt;
use std::marker::PhantomData;

use js_sys::{Array, Function, Reflect};
use log::debug;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use super::methods::*;
use super::{
	AnimationMethods, CanvasMethods, Engine, ForceMethods, InitOf, PropOf, SceneMethods,
};
use crate::convert::{IntoJs, from_js, to_js};
use crate::error::EngineError;
use crate::graph::{CameraPosition, GraphBbox, GraphObject, LinkObject, Point2, Point3};
use crate::props::{PropChange, Size};
use crate::value::JsObject;
use crate::variants::{Animated, Graph2D, Graph3D, GraphAr, GraphVr, Variant};

const DESTRUCTOR: &str = "_destructor";

/// A variant whose engine ships as a global constructor.
pub trait JsVariant: Variant {
	/// Name of the constructor on `globalThis`.
	const CONSTRUCTOR: &'static str;
}

impl JsVariant for Graph2D {
	const CONSTRUCTOR: &'static str = "ForceGraph";
}

impl JsVariant for Graph3D {
	const CONSTRUCTOR: &'static str = "ForceGraph3D";
}

impl JsVariant for GraphVr {
	const CONSTRUCTOR: &'static str = "ForceGraphVR";
}

impl JsVariant for GraphAr {
	const CONSTRUCTOR: &'static str = "ForceGraphAR";
}

pub type JsForceGraph2D = JsEngine<Graph2D>;
pub type JsForceGraph3D = JsEngine<Graph3D>;
pub type JsForceGraphVR = JsEngine<GraphVr>;
pub type JsForceGraphAR = JsEngine<GraphAr>;

/// A live engine instance created by its page-global constructor.
pub struct JsEngine<V> {
	instance: JsValue,
	variant: PhantomData<V>,
}

impl<V: JsVariant> fmt::Debug for JsEngine<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JsEngine")
			.field("constructor", &V::CONSTRUCTOR)
			.finish_non_exhaustive()
	}
}

impl<V: JsVariant> JsEngine<V> {
	fn constructor() -> Result<Function, EngineError> {
		Reflect::get(&js_sys::global(), &JsValue::from_str(V::CONSTRUCTOR))
			.ok()
			.and_then(|value| value.dyn_into::<Function>().ok())
			.ok_or(EngineError::MissingConstructor(V::CONSTRUCTOR))
	}

	/// Invoke `method` on the instance with positional `args`.
	fn call(&self, method: &'static str, args: &[JsValue]) -> Result<JsValue, EngineError> {
		let function = Reflect::get(&self.instance, &JsValue::from_str(method))
			.map_err(EngineError::thrown)?
			.dyn_into::<Function>()
			.map_err(|_| EngineError::MissingMethod(method))?;
		let args: Array = args.iter().collect();
		Reflect::apply(&function, &self.instance, &args).map_err(EngineError::thrown)
	}

	fn call_decoded<T: DeserializeOwned>(
		&self,
		method: &'static str,
		args: &[JsValue],
	) -> Result<T, EngineError> {
		let value = self.call(method, args)?;
		from_js(value).map_err(|e| EngineError::BadReturn {
			method,
			reason: e.to_string(),
		})
	}

	fn call_object(&self, method: &'static str) -> Result<JsObject, EngineError> {
		self.call(method, &[]).map(JsObject::new)
	}
}

fn is_nullish(value: &JsValue) -> bool {
	value.is_null() || value.is_undefined()
}

impl<V: JsVariant> Engine for JsEngine<V> {
	type Variant = V;
	type Container = HtmlElement;

	fn create(container: &HtmlElement, init: &InitOf<Self>) -> Result<Self, EngineError> {
		let constructor = Self::constructor()?;
		let args = Array::of2(container, &init.into_js());
		let instance = Reflect::construct(&constructor, &args).map_err(EngineError::thrown)?;
		debug!("force-graph: constructed {} via `{}`", V::NAME, V::CONSTRUCTOR);
		Ok(Self {
			instance,
			variant: PhantomData,
		})
	}

	fn set(&mut self, prop: PropOf<Self>) -> Result<(), EngineError> {
		self.call(prop.name(), &[prop.into_js()]).map(drop)
	}

	fn resize(&mut self, size: Size) -> Result<(), EngineError> {
		// With neither dimension set the setters would act as getters.
		if size.is_empty() {
			return Ok(());
		}
		self.call("width", &[size.width.into_js()])?;
		self.call("height", &[size.height.into_js()])?;
		Ok(())
	}

	fn destroy(self) -> Result<(), EngineError> {
		self.call(DESTRUCTOR, &[])?;
		debug!("force-graph: destroyed {}", V::NAME);
		Ok(())
	}
}

impl<V: JsVariant> ForceMethods for JsEngine<V> {
	fn d3_force(&self, name: &str) -> Result<Option<JsObject>, EngineError> {
		let force = self.call(D3_FORCE, &[JsValue::from_str(name)])?;
		Ok((!is_nullish(&force)).then(|| JsObject::new(force)))
	}

	fn set_d3_force(&self, name: &str, force: Option<&JsObject>) -> Result<(), EngineError> {
		let force = force.map_or(JsValue::NULL, |f| f.as_js().clone());
		self.call(D3_FORCE, &[JsValue::from_str(name), force]).map(drop)
	}

	fn d3_reheat_simulation(&self) -> Result<(), EngineError> {
		self.call(D3_REHEAT_SIMULATION, &[]).map(drop)
	}

	fn emit_particle(&self, link: &LinkObject) -> Result<(), EngineError> {
		// The engine matches links by object identity, so prefer the live object.
		let link = match link {
			GraphObject::Engine(raw) => raw.as_js().clone(),
			GraphObject::Data(data) => to_js(data),
		};
		self.call(EMIT_PARTICLE, &[link]).map(drop)
	}

	fn refresh(&self) -> Result<(), EngineError> {
		self.call(REFRESH, &[]).map(drop)
	}

	fn graph_bbox(&self) -> Result<Option<GraphBbox>, EngineError> {
		let bbox = self.call(GET_GRAPH_BBOX, &[])?;
		if is_nullish(&bbox) {
			return Ok(None);
		}
		from_js(bbox).map(Some).map_err(|e| EngineError::BadReturn {
			method: GET_GRAPH_BBOX,
			reason: e.to_string(),
		})
	}
}

impl<V: JsVariant + Animated> AnimationMethods for JsEngine<V> {
	fn pause_animation(&self) -> Result<(), EngineError> {
		self.call(PAUSE_ANIMATION, &[]).map(drop)
	}

	fn resume_animation(&self) -> Result<(), EngineError> {
		self.call(RESUME_ANIMATION, &[]).map(drop)
	}

	fn stop_animation(&self) -> Result<(), EngineError> {
		self.call(STOP_ANIMATION, &[]).map(drop)
	}

	fn zoom_to_fit(&self, duration_ms: Option<f64>, padding: Option<f64>) -> Result<(), EngineError> {
		self.call(ZOOM_TO_FIT, &[duration_ms.into_js(), padding.into_js()])
			.map(drop)
	}
}

impl CanvasMethods for JsEngine<Graph2D> {
	fn center_at(&self) -> Result<Option<Point2>, EngineError> {
		let center = self.call(CENTER_AT, &[])?;
		if is_nullish(&center) {
			return Ok(None);
		}
		from_js(center).map(Some).map_err(|e| EngineError::BadReturn {
			method: CENTER_AT,
			reason: e.to_string(),
		})
	}

	fn set_center_at(&self, x: f64, y: f64, duration_ms: Option<f64>) -> Result<(), EngineError> {
		self.call(CENTER_AT, &[x.into_js(), y.into_js(), duration_ms.into_js()])
			.map(drop)
	}

	fn zoom(&self) -> Result<f64, EngineError> {
		self.call(ZOOM, &[])?
			.as_f64()
			.ok_or_else(|| EngineError::BadReturn {
				method: ZOOM,
				reason: String::from("not a number"),
			})
	}

	fn set_zoom(&self, k: f64, duration_ms: Option<f64>) -> Result<(), EngineError> {
		self.call(ZOOM, &[k.into_js(), duration_ms.into_js()]).map(drop)
	}

	fn screen_to_graph_coords(&self, x: f64, y: f64) -> Result<Point2, EngineError> {
		self.call_decoded(SCREEN_TO_GRAPH_COORDS, &[x.into_js(), y.into_js()])
	}

	fn graph_to_screen_coords(&self, x: f64, y: f64) -> Result<Point2, EngineError> {
		self.call_decoded(GRAPH_TO_SCREEN_COORDS, &[x.into_js(), y.into_js()])
	}
}

impl SceneMethods for JsEngine<Graph3D> {
	fn camera_position(&self) -> Result<Point3, EngineError> {
		self.call_decoded(CAMERA_POSITION, &[])
	}

	fn set_camera_position(
		&self,
		position: CameraPosition,
		look_at: Option<Point3>,
		transition_ms: Option<f64>,
	) -> Result<(), EngineError> {
		let look_at = look_at.map_or(JsValue::UNDEFINED, |p| to_js(&p));
		self.call(
			CAMERA_POSITION,
			&[to_js(&position), look_at, transition_ms.into_js()],
		)
		.map(drop)
	}

	fn scene(&self) -> Result<JsObject, EngineError> {
		self.call_object(SCENE)
	}

	fn camera(&self) -> Result<JsObject, EngineError> {
		self.call_object(CAMERA)
	}

	fn renderer(&self) -> Result<JsObject, EngineError> {
		self.call_object(RENDERER)
	}

	fn controls(&self) -> Result<JsObject, EngineError> {
		self.call_object(CONTROLS)
	}

	fn lights(&self) -> Result<JsObject, EngineError> {
		self.call_object(LIGHTS)
	}

	fn post_processing_composer(&self) -> Result<JsObject, EngineError> {
		self.call_object(POST_PROCESSING_COMPOSER)
	}

	fn screen_to_graph_coords(&self, x: f64, y: f64, distance: f64) -> Result<Point3, EngineError> {
		self.call_decoded(
			SCREEN_TO_GRAPH_COORDS,
			&[x.into_js(), y.into_js(), distance.into_js()],
		)
	}

	fn graph_to_screen_coords(&self, x: f64, y: f64, z: f64) -> Result<Point3, EngineError> {
		self.call_decoded(
			GRAPH_TO_SCREEN_COORDS,
			&[x.into_js(), y.into_js(), z.into_js()],
		)
	}
}
