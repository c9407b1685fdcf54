//! force-graph-bindings: Leptos components for the force-graph engine family.
//!
//! Declarative component properties are diffed field by field and turned into
//! setter calls on a stateful engine instance (2D canvas, 3D WebGL, VR or
//! AR). A stable handle forwards a fixed set of engine methods back to the
//! host, and a composite component swaps engines when its mode changes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod adapter;
pub mod components;
pub mod composite;
mod convert;
pub mod engine;
pub mod error;
pub mod graph;
pub mod handle;
pub mod props;
#[cfg(test)]
mod testing;
pub mod value;
pub mod variants;

pub use adapter::Adapter;
pub use components::force_graph::{
	ErrorCallback, ForceGraph, ForceGraph2D, ForceGraph3D, ForceGraphAR, ForceGraphVR,
};
pub use composite::{CompositeAdapter, EngineSet, ForceGraphHandle, ForceGraphMode, JsEngines, ModeProps};
pub use convert::{FromJs, FromJsArgs, IntoJs};
pub use engine::{Engine, JsEngine};
pub use error::{AdapterError, AdapterResult, EngineError};
pub use graph::{GraphData, GraphLink, GraphNode, GraphObject, LinkObject, NodeId, NodeObject};
pub use handle::Handle;
pub use props::{InitConfig, NoInit, PropChange, PropKind, PropSet, PropertySpec, PropsBag, Size};
pub use value::{Accessor, Callback, JsObject, Shared};
pub use variants::{
	ForceGraph2DProps, ForceGraph3DInit, ForceGraph3DProps, ForceGraphARInit, ForceGraphARProps,
	ForceGraphVRProps, Variant,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("force-graph: logging initialized");
}

/// Text of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let json_text = script_text("graph-data")?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"force-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("force-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Load component properties from a script element with id="graph-config".
/// Expected format: a JSON object keyed by engine property name, plus an
/// optional "mode".
fn load_props_bag() -> Option<PropsBag> {
	let json_text = script_text("graph-config")?;

	match PropsBag::from_json_str(&json_text) {
		Ok(bag) => Some(bag),
		Err(e) => {
			warn!("force-graph: failed to parse graph config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph data and properties from the DOM and renders the mode-switching
/// graph with a few controls driving its handle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = Shared::new(load_graph_data().unwrap_or_default());
	let mut bag = load_props_bag().unwrap_or_default();
	let initial = ModeProps::from_bag(&bag).mode();
	bag.remove("mode");

	let (mode, set_mode) = signal(initial);
	let (status, set_status) = signal(None::<String>);
	let props = Signal::derive_local(move || {
		ModeProps::for_mode(mode.get(), &bag).with_graph_data(graph_data.clone())
	});

	let handle = ForceGraphHandle::default();
	let on_error = Callback::new(move |(e,): (AdapterError,)| {
		warn!("force-graph: {}", e);
		set_status.set(Some(e.to_string()));
	});

	let fit_handle = handle.clone();
	let on_zoom_to_fit = move |_| {
		let result = fit_handle.zoom_to_fit(Some(400.0), Some(20.0)).map(drop);
		set_status.set(result.err().map(|e| e.to_string()));
	};

	let modes = ForceGraphMode::ALL
		.into_iter()
		.map(|m| {
			view! {
				<button class:active=move || mode.get() == m on:click=move |_| set_mode.set(m)>
					{m.as_str()}
				</button>
			}
		})
		.collect_view();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Force Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraph props=props handle=handle on_error=on_error />
			<div class="graph-overlay">
				<div class="mode-switcher">
					{modes}
					<button on:click=on_zoom_to_fit>"Zoom to fit"</button>
				</div>
				<p class="status">{move || status.get()}</p>
			</div>
		</div>
	}
}
