//! A-Frame VR variant, driving the `ForceGraphVR` engine.

use crate::engine::methods::FORCE;
use crate::props::NoInit;
use crate::value::Accessor;

use super::Variant;

crate::force_graph_props! {
	/// Settable properties of the VR graph.
	pub struct ForceGraphVRProps / ForceGraphVRProp : [common, three, xr] {
		/// Secondary text shown under the node label when gazed at.
		node_desc / NodeDesc: Accessor<String> = "nodeDesc",
		link_desc / LinkDesc: Accessor<String> = "linkDesc",
	}
}

/// The `3d-force-graph-vr` component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphVr;

impl Variant for GraphVr {
	const NAME: &'static str = "ForceGraphVR";
	const METHODS: &'static [&'static str] = FORCE;

	type Init = NoInit;
	type Props = ForceGraphVRProps;
}
