//! Leptos components binding each engine to a container `<div>`.
//!
//! Every component renders one container, mounts its adapter once the node
//! ref resolves, re-syncs whenever the props signal changes, and tears the
//! engine down in `on_cleanup`. Failures go to `on_error` when the host
//! supplies it. Otherwise they are logged and rendered as an `Err` child of
//! the container, which the nearest `<ErrorBoundary>` picks up.

use leptos::html::Div;
use leptos::prelude::*;
use log::error;
use web_sys::HtmlElement;

use crate::adapter::Adapter;
use crate::composite::{CompositeAdapter, ForceGraphHandle, ModeProps};
use crate::engine::{
	Engine, InitOf, JsForceGraph2D, JsForceGraph3D, JsForceGraphAR, JsForceGraphVR, PropsOf,
};
use crate::error::{AdapterError, AdapterResult};
use crate::handle::Handle;
use crate::value::Callback;
use crate::variants::{self, ForceGraph3DInit, ForceGraphARInit, Variant};

/// Receives adapter failures instead of letting them surface as exceptions.
pub type ErrorCallback = Callback<(AdapterError,)>;

const CONTAINER_CLASS: &str = "force-graph-container";
const CONTAINER_STYLE: &str = "width: 100%; height: 100%;";

/// Last unreported failure of a component without `on_error`.
type Failure = RwSignal<Option<AdapterError>>;

fn report(result: AdapterResult<()>, on_error: Option<&ErrorCallback>, failure: Failure) {
	match (result, on_error) {
		(Ok(()), _) => {
			if failure.with_untracked(Option::is_some) {
				failure.set(None);
			}
		}
		(Err(e), Some(on_error)) => on_error.call((e,)),
		(Err(e), None) => {
			error!("force-graph: {}", e);
			failure.set(Some(e));
		}
	}
}

fn failure_view(failure: Failure) -> impl IntoView {
	move || failure.get().map_or(Ok(()), Err)
}

fn element(node: NodeRef<Div>) -> Option<HtmlElement> {
	node.get().map(Into::into)
}

/// Wire one variant's adapter to the component lifecycle.
fn bind<E>(
	node: NodeRef<Div>,
	init: InitOf<E>,
	props: Signal<PropsOf<E>, LocalStorage>,
	handle: Handle<E>,
	on_error: Option<ErrorCallback>,
) -> Failure
where
	E: Engine<Container = HtmlElement>,
{
	let adapter = StoredValue::new_local(Adapter::<E>::with_handle(handle));
	let failure = Failure::new(None);

	Effect::new(move |_| {
		let next = props.get();
		let Some(container) = element(node) else {
			return;
		};

		let result = adapter.try_update_value(|adapter| {
			if adapter.is_mounted() {
				adapter.update(next).map(drop)
			} else {
				adapter.mount(Some(&container), init.clone(), next)
			}
		});
		if let Some(result) = result {
			report(result, on_error.as_ref(), failure);
		}
	});

	on_cleanup(move || {
		if let Some(Err(e)) = adapter.try_update_value(|adapter| adapter.unmount()) {
			error!("force-graph: {} teardown failed: {}", E::Variant::NAME, e);
		}
	});

	failure
}

/// 2D canvas force graph.
///
/// Pass a `handle` created up front to call engine methods such as
/// [`Handle::zoom_to_fit`] from event handlers.
#[component]
pub fn ForceGraph2D(
	#[prop(into)] props: Signal<variants::ForceGraph2DProps, LocalStorage>,
	#[prop(optional)] handle: Option<Handle<JsForceGraph2D>>,
	#[prop(optional)] on_error: Option<ErrorCallback>,
) -> impl IntoView {
	let node = NodeRef::<Div>::new();
	let failure = bind(node, Default::default(), props, handle.unwrap_or_default(), on_error);

	view! {
		<div node_ref=node class=CONTAINER_CLASS style=CONTAINER_STYLE />
		{failure_view(failure)}
	}
}

/// 3D WebGL force graph. `init` is read once, at mount.
#[component]
pub fn ForceGraph3D(
	#[prop(into)] props: Signal<variants::ForceGraph3DProps, LocalStorage>,
	#[prop(optional)] init: ForceGraph3DInit,
	#[prop(optional)] handle: Option<Handle<JsForceGraph3D>>,
	#[prop(optional)] on_error: Option<ErrorCallback>,
) -> impl IntoView {
	let node = NodeRef::<Div>::new();
	let failure = bind(node, init, props, handle.unwrap_or_default(), on_error);

	view! {
		<div node_ref=node class=CONTAINER_CLASS style=CONTAINER_STYLE />
		{failure_view(failure)}
	}
}

/// A-Frame VR force graph.
#[component]
pub fn ForceGraphVR(
	#[prop(into)] props: Signal<variants::ForceGraphVRProps, LocalStorage>,
	#[prop(optional)] handle: Option<Handle<JsForceGraphVR>>,
	#[prop(optional)] on_error: Option<ErrorCallback>,
) -> impl IntoView {
	let node = NodeRef::<Div>::new();
	let failure = bind(node, Default::default(), props, handle.unwrap_or_default(), on_error);

	view! {
		<div node_ref=node class=CONTAINER_CLASS style=CONTAINER_STYLE />
		{failure_view(failure)}
	}
}

/// AR.js marker force graph. `init` is read once, at mount.
#[component]
pub fn ForceGraphAR(
	#[prop(into)] props: Signal<variants::ForceGraphARProps, LocalStorage>,
	#[prop(optional)] init: ForceGraphARInit,
	#[prop(optional)] handle: Option<Handle<JsForceGraphAR>>,
	#[prop(optional)] on_error: Option<ErrorCallback>,
) -> impl IntoView {
	let node = NodeRef::<Div>::new();
	let failure = bind(node, init, props, handle.unwrap_or_default(), on_error);

	view! {
		<div node_ref=node class=CONTAINER_CLASS style=CONTAINER_STYLE />
		{failure_view(failure)}
	}
}

/// Force graph whose engine follows the mode carried by `props`. Switching
/// modes replaces the engine; `handle` stays valid across the switch.
#[component]
pub fn ForceGraph(
	#[prop(into)] props: Signal<ModeProps, LocalStorage>,
	#[prop(optional)] handle: Option<ForceGraphHandle>,
	#[prop(optional)] on_error: Option<ErrorCallback>,
) -> impl IntoView {
	let node = NodeRef::<Div>::new();
	let adapter = StoredValue::new_local(CompositeAdapter::with_handle(
		handle.unwrap_or_default(),
	));
	let failure = Failure::new(None);

	Effect::new(move |_| {
		let next = props.get();
		let Some(container) = element(node) else {
			return;
		};

		let result = adapter.try_update_value(|adapter| {
			if adapter.is_mounted() {
				adapter.update(Some(&container), next).map(drop)
			} else {
				adapter.mount(Some(&container), next)
			}
		});
		if let Some(result) = result {
			report(result, on_error.as_ref(), failure);
		}
	});

	on_cleanup(move || {
		if let Some(Err(e)) = adapter.try_update_value(|adapter| adapter.unmount()) {
			error!("force-graph: ForceGraph teardown failed: {}", e);
		}
	});

	view! {
		<div node_ref=node class=CONTAINER_CLASS style=CONTAINER_STYLE />
		{failure_view(failure)}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::error::EngineError;

	fn failed() -> AdapterResult<()> {
		Err(AdapterError::engine("ForceGraph2D")(EngineError::MissingMethod("zoom")))
	}

	#[test]
	fn failure_without_callback_renders_until_the_next_success() {
		let failure = Failure::new(None);

		report(failed(), None, failure);
		assert!(matches!(
			failure.get_untracked(),
			Some(AdapterError::Engine { component: "ForceGraph2D", .. })
		));

		report(Ok(()), None, failure);
		assert!(failure.get_untracked().is_none());
	}

	#[test]
	fn callback_takes_the_failure_instead_of_the_view() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		let on_error = ErrorCallback::new(move |(e,)| sink.borrow_mut().push(e.to_string()));
		let failure = Failure::new(None);

		report(failed(), Some(&on_error), failure);
		assert_eq!(*seen.borrow(), vec!["ForceGraph2D: engine has no method `zoom`"]);
		assert!(failure.get_untracked().is_none());
	}
}
