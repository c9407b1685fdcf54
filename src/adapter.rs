//! The declarative-to-imperative bridge.
//!
//! An [`Adapter`] owns at most one engine instance. [`Adapter::mount`]
//! constructs it with the InitOnly configuration, then applies every Regular
//! property that carries a value. [`Adapter::update`] diffs the new
//! properties against the last applied ones and issues one setter per
//! changed field. [`Adapter::unmount`] tears the instance down exactly once.

use log::{debug, info, warn};

use crate::engine::{Engine, InitOf, PropsOf};
use crate::error::{AdapterError, AdapterResult};
use crate::handle::Handle;
use crate::props::PropSet;
use crate::variants::Variant;

const MOUNT: &str = "mount";
const UPDATE: &str = "update";
const UNMOUNT: &str = "unmount";

/// Keeps one engine instance in sync with a stream of property values.
pub struct Adapter<E: Engine> {
	handle: Handle<E>,
	init: Option<InitOf<E>>,
	props: PropsOf<E>,
}

impl<E: Engine> Default for Adapter<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: Engine> Adapter<E> {
	pub fn new() -> Self {
		Self::with_handle(Handle::new())
	}

	/// Adapter publishing its engine through an existing handle, e.g. one the
	/// host created before the component rendered.
	pub fn with_handle(handle: Handle<E>) -> Self {
		Self {
			handle,
			init: None,
			props: PropsOf::<E>::default(),
		}
	}

	/// The stable handle; every call returns a clone of the same slot.
	pub fn handle(&self) -> Handle<E> {
		self.handle.clone()
	}

	pub fn is_mounted(&self) -> bool {
		self.handle.is_attached()
	}

	/// Properties last handed to the engine.
	pub fn props(&self) -> &PropsOf<E> {
		&self.props
	}

	/// Construct the engine against `container`, then apply `props`.
	///
	/// On a setter failure the engine stays mounted with `props` recorded as
	/// applied, and the error is returned.
	pub fn mount(
		&mut self,
		container: Option<&E::Container>,
		init: InitOf<E>,
		props: PropsOf<E>,
	) -> AdapterResult<()> {
		let component = E::Variant::NAME;
		let container = container.ok_or(AdapterError::MissingContainer { component })?;
		if self.handle.is_attached() {
			return Err(AdapterError::AlreadyMounted { component });
		}

		let engine = E::create(container, &init).map_err(AdapterError::engine(component))?;
		self.handle.attach(MOUNT, engine)?;
		self.init = Some(init);
		self.props = PropsOf::<E>::default();
		info!("force-graph: {} mounted", component);

		self.update(props).map(drop)
	}

	/// Apply the Regular properties that differ from the last applied set.
	/// Returns the number of engine calls issued. Before mount the values
	/// are only recorded.
	pub fn update(&mut self, next: PropsOf<E>) -> AdapterResult<usize> {
		if next == self.props {
			return Ok(0);
		}
		let prev = std::mem::replace(&mut self.props, next);
		if !self.handle.is_attached() {
			return Ok(0);
		}

		let size = self.props.size();
		let resize = size != prev.size();
		let changes = self.props.changes(&prev);
		debug!(
			"force-graph: {} applying {} change(s){}",
			E::Variant::NAME,
			changes.len(),
			if resize { " and resize" } else { "" }
		);

		self.handle.with_mut(UPDATE, |engine| {
			let mut calls = 0;
			if resize {
				engine.resize(size)?;
				calls += 1;
			}
			for change in changes {
				engine.set(change)?;
				calls += 1;
			}
			Ok(calls)
		})
	}

	/// [`update`](Self::update), plus a note when the InitOnly configuration
	/// changed. Such changes are never applied to a live engine.
	pub fn sync(&mut self, init: &InitOf<E>, props: PropsOf<E>) -> AdapterResult<usize> {
		if let Some(mounted) = &self.init
			&& mounted != init
		{
			debug!(
				"force-graph: {} ignores changed init-only config {:?}",
				E::Variant::NAME,
				init
			);
		}
		self.update(props)
	}

	/// Tear the engine down. Safe to call repeatedly or without a mount.
	pub fn unmount(&mut self) -> AdapterResult<()> {
		let engine = self.handle.detach(UNMOUNT)?;
		self.init = None;
		self.props = PropsOf::<E>::default();
		match engine {
			Some(engine) => {
				info!("force-graph: {} unmounted", E::Variant::NAME);
				engine
					.destroy()
					.map_err(AdapterError::engine(E::Variant::NAME))
			}
			None => Ok(()),
		}
	}
}

impl<E: Engine> Drop for Adapter<E> {
	fn drop(&mut self) {
		if let Err(e) = self.unmount() {
			warn!("force-graph: {}", e);
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::graph::GraphData;
	use crate::testing::{Event, MockContainer, MockEngine};
	use crate::value::{Accessor, Callback, Shared};
	use crate::variants::{
		ForceGraph2DProps, ForceGraph3DInit, ForceGraph3DProps, Graph2D, Graph3D,
	};

	type Adapter2D = Adapter<MockEngine<Graph2D>>;
	type Adapter3D = Adapter<MockEngine<Graph3D>>;

	fn two_nodes() -> Shared<GraphData> {
		let data: GraphData = serde_json::from_value(json!({
			"nodes": [{ "id": 1 }, { "id": 2 }],
			"links": [{ "source": 1, "target": 2 }],
		}))
		.unwrap();
		Shared::new(data)
	}

	fn created(container: &MockContainer) -> usize {
		container.count(|e| matches!(e, Event::Created { .. }))
	}

	fn destroyed(container: &MockContainer) -> usize {
		container.count(|e| matches!(e, Event::Destroyed { .. }))
	}

	#[test]
	fn mount_constructs_once_then_applies_present_props() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let props = ForceGraph2DProps {
			graph_data: Some(two_nodes()),
			node_color: Some(Accessor::from("red")),
			..Default::default()
		};

		adapter.mount(Some(&container), Default::default(), props).unwrap();

		let events = container.events();
		assert!(matches!(events[0], Event::Created { variant: "ForceGraph2D", .. }));
		assert_eq!(created(&container), 1);
		assert_eq!(container.sets(), vec!["graphData", "nodeColor"]);
		assert!(
			events
				.iter()
				.any(|e| matches!(e, Event::Set { name: "nodeColor", value, .. } if value.contains("\"red\"")))
		);
	}

	#[test]
	fn init_config_carries_only_present_init_props() {
		let container = MockContainer::default();
		let mut adapter = Adapter3D::new();
		let bag = crate::PropsBag::from_json_str(
			r#"{ "controlType": "orbit", "nodeColor": "blue", "bogus": 1 }"#,
		)
		.unwrap();
		let (init, props) = Graph3D::from_bag(&bag);

		adapter.mount(Some(&container), init, props).unwrap();

		assert_eq!(
			container.events()[0],
			Event::Created {
				variant: "ForceGraph3D",
				init: vec!["controlType"],
			}
		);
		assert_eq!(container.sets(), vec!["nodeColor"]);
	}

	#[test]
	fn mount_without_container_fails_and_unmount_is_a_no_op() {
		let mut adapter = Adapter2D::new();
		let err = adapter
			.mount(None, Default::default(), Default::default())
			.unwrap_err();
		assert!(matches!(err, AdapterError::MissingContainer { component: "ForceGraph2D" }));
		assert!(!adapter.is_mounted());
		adapter.unmount().unwrap();
	}

	#[test]
	fn failed_construction_is_never_torn_down() {
		let container = MockContainer::default();
		container.fail_on("create");
		let mut adapter = Adapter2D::new();
		assert!(adapter.mount(Some(&container), Default::default(), Default::default()).is_err());
		adapter.unmount().unwrap();
		drop(adapter);
		assert_eq!(destroyed(&container), 0);
	}

	#[test]
	fn mounting_twice_is_rejected() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		adapter.mount(Some(&container), Default::default(), Default::default()).unwrap();
		let err = adapter
			.mount(Some(&container), Default::default(), Default::default())
			.unwrap_err();
		assert!(matches!(err, AdapterError::AlreadyMounted { .. }));
		assert_eq!(created(&container), 1);
	}

	#[test]
	fn one_changed_prop_is_one_setter_call() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let props = ForceGraph2DProps {
			graph_data: Some(two_nodes()),
			node_rel_size: Some(4.0),
			..Default::default()
		};
		adapter.mount(Some(&container), Default::default(), props.clone()).unwrap();
		container.clear();

		let next = ForceGraph2DProps {
			node_rel_size: Some(8.0),
			..props
		};
		assert_eq!(adapter.update(next).unwrap(), 1);
		assert_eq!(container.sets(), vec!["nodeRelSize"]);
	}

	#[test]
	fn identical_props_issue_nothing() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let on_click = Callback::new(|_| {});
		let props = ForceGraph2DProps {
			graph_data: Some(two_nodes()),
			on_node_click: Some(on_click),
			..Default::default()
		};
		adapter.mount(Some(&container), Default::default(), props.clone()).unwrap();
		container.clear();

		assert_eq!(adapter.update(props).unwrap(), 0);
		assert!(container.events().is_empty());
	}

	#[test]
	fn callables_compare_by_identity() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let props = ForceGraph2DProps {
			on_background_click: Some(Callback::new(|_| {})),
			..Default::default()
		};
		adapter.mount(Some(&container), Default::default(), props.clone()).unwrap();
		container.clear();

		let rebuilt = ForceGraph2DProps {
			on_background_click: Some(Callback::new(|_| {})),
			..props
		};
		assert_eq!(adapter.update(rebuilt).unwrap(), 1);
		assert_eq!(container.sets(), vec!["onBackgroundClick"]);
	}

	#[test]
	fn removed_prop_is_unset() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let props = ForceGraph2DProps {
			link_width: Some(Accessor::Value(2.0)),
			..Default::default()
		};
		adapter.mount(Some(&container), Default::default(), props).unwrap();
		container.clear();

		adapter.update(Default::default()).unwrap();
		assert_eq!(
			container.events(),
			vec![Event::Set {
				variant: "ForceGraph2D",
				name: "linkWidth",
				value: String::from("LinkWidth(None)"),
			}]
		);
	}

	#[test]
	fn width_change_is_one_resize_with_previous_height() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let props = ForceGraph2DProps {
			width: Some(600.0),
			height: Some(400.0),
			graph_data: Some(two_nodes()),
			..Default::default()
		};
		adapter.mount(Some(&container), Default::default(), props.clone()).unwrap();
		container.clear();

		let next = ForceGraph2DProps {
			width: Some(800.0),
			..props
		};
		assert_eq!(adapter.update(next).unwrap(), 1);
		assert_eq!(
			container.events(),
			vec![Event::Resized {
				variant: "ForceGraph2D",
				size: crate::props::Size {
					width: Some(800.0),
					height: Some(400.0),
				},
			}]
		);
	}

	#[test]
	fn init_only_changes_are_ignored() {
		let container = MockContainer::default();
		let mut adapter = Adapter3D::new();
		let init = ForceGraph3DInit {
			control_type: Some(crate::graph::ControlType::Trackball),
			..Default::default()
		};
		let props = ForceGraph3DProps::default();
		adapter.mount(Some(&container), init, props.clone()).unwrap();
		container.clear();

		let changed = ForceGraph3DInit {
			control_type: Some(crate::graph::ControlType::Fly),
			..Default::default()
		};
		assert_eq!(adapter.sync(&changed, props).unwrap(), 0);
		assert!(container.events().is_empty());
	}

	#[test]
	fn unmount_tears_down_exactly_once() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		adapter.mount(Some(&container), Default::default(), Default::default()).unwrap();

		adapter.unmount().unwrap();
		adapter.unmount().unwrap();
		drop(adapter);
		assert_eq!(destroyed(&container), 1);
	}

	#[test]
	fn failed_teardown_is_reported_once() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		adapter.mount(Some(&container), Default::default(), Default::default()).unwrap();
		container.fail_on("destroy");

		let err = adapter.unmount().unwrap_err();
		assert!(matches!(err, AdapterError::Engine { component: "ForceGraph2D", .. }));
		assert!(!adapter.is_mounted());

		adapter.unmount().unwrap();
		drop(adapter);
		assert_eq!(destroyed(&container), 0);
	}

	#[test]
	fn resize_failure_stops_the_update() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let props = ForceGraph2DProps {
			width: Some(600.0),
			..Default::default()
		};
		adapter.mount(Some(&container), Default::default(), props).unwrap();
		container.clear();
		container.fail_on("resize");

		let next = ForceGraph2DProps {
			width: Some(800.0),
			node_rel_size: Some(6.0),
			..Default::default()
		};
		let err = adapter.update(next.clone()).unwrap_err();
		assert!(matches!(err, AdapterError::Engine { component: "ForceGraph2D", .. }));
		assert!(container.events().is_empty());
		assert_eq!(adapter.props(), &next);
		assert!(adapter.is_mounted());
	}

	#[test]
	fn drop_tears_down_a_mounted_engine() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		adapter.mount(Some(&container), Default::default(), Default::default()).unwrap();
		drop(adapter);
		assert_eq!(destroyed(&container), 1);
	}

	#[test]
	fn handle_is_stable_and_fails_after_unmount() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let before = adapter.handle();
		adapter.mount(Some(&container), Default::default(), Default::default()).unwrap();
		assert!(adapter.handle().ptr_eq(&before));

		before.set_zoom(2.0, None).unwrap().zoom_to_fit(Some(400.0), None).unwrap();
		assert_eq!(container.methods(), vec!["zoom", "zoomToFit"]);

		adapter.unmount().unwrap();
		assert!(adapter.handle().ptr_eq(&before));
		let err = before.zoom().unwrap_err();
		assert!(matches!(err, AdapterError::Detached { method: "zoom", .. }));
	}

	#[test]
	fn setter_failure_is_reported_not_swallowed() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		adapter.mount(Some(&container), Default::default(), Default::default()).unwrap();
		container.fail_on("dagMode");

		let next = ForceGraph2DProps {
			dag_mode: Some(crate::graph::DagMode::Td),
			..Default::default()
		};
		let err = adapter.update(next.clone()).unwrap_err();
		assert!(matches!(err, AdapterError::Engine { component: "ForceGraph2D", .. }));
		assert_eq!(adapter.props(), &next);
	}

	#[test]
	fn props_before_mount_are_applied_at_mount() {
		let container = MockContainer::default();
		let mut adapter = Adapter2D::new();
		let props = ForceGraph2DProps {
			min_zoom: Some(0.1),
			..Default::default()
		};
		assert_eq!(adapter.update(props.clone()).unwrap(), 0);
		assert!(container.events().is_empty());

		adapter.mount(Some(&container), Default::default(), props).unwrap();
		assert_eq!(container.sets(), vec!["minZoom"]);
	}
}
