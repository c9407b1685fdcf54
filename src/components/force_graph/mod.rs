//! Force-directed graph components.
//!
//! Each component renders a container `<div>` and drives one engine from the
//! force-graph family inside it:
//!
//! - [`ForceGraph2D`]: HTML5 canvas
//! - [`ForceGraph3D`]: WebGL
//! - [`ForceGraphVR`]: A-Frame VR
//! - [`ForceGraphAR`]: AR.js marker
//! - [`ForceGraph`]: any of the above, selected by mode
//!
//! # Example
//!
//! ```ignore
//! use force_graph_bindings::{ForceGraph2D, ForceGraph2DProps, Handle};
//!
//! let handle = Handle::new();
//! let props = Signal::derive_local(move || ForceGraph2DProps {
//!     graph_data: Some(data.clone()),
//!     node_color: Some("group".into()),
//!     ..Default::default()
//! });
//!
//! view! { <ForceGraph2D props=props handle=handle.clone() /> }
//! ```
//!
//! The engine bundles (`force-graph`, `3d-force-graph`, `3d-force-graph-vr`,
//! `3d-force-graph-ar`) must be loaded on the page as globals.

mod component;

pub use component::{
	ErrorCallback, ForceGraph, ForceGraph2D, ForceGraph3D, ForceGraphAR, ForceGraphVR,
};
