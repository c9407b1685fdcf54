//! Component variants: one engine family each, paired with its property
//! classification table.
//!
//! A variant is pure declaration. It names its Regular properties (a
//! [`PropSet`]), its InitOnly configuration (an [`InitConfig`]) and the engine
//! methods its handle forwards. Which methods exist is enforced statically by
//! the traits in [`engine`](crate::engine); [`Variant::METHODS`] is the same
//! list as data, for the classification table.

mod graph_2d;
mod graph_3d;
mod graph_ar;
mod graph_vr;

pub use graph_2d::{ForceGraph2DProp, ForceGraph2DProps, Graph2D};
pub use graph_3d::{ForceGraph3DInit, ForceGraph3DProp, ForceGraph3DProps, Graph3D};
pub use graph_ar::{ForceGraphARInit, ForceGraphARProp, ForceGraphARProps, GraphAr};
pub use graph_vr::{ForceGraphVRProp, ForceGraphVRProps, GraphVr};

use crate::props::{InitConfig, PropKind, PropSet, PropertySpec, PropsBag};

/// Static description of one component variant.
pub trait Variant: 'static {
	/// Component name used in logs and errors.
	const NAME: &'static str;

	/// Engine method names exposed on the handle.
	const METHODS: &'static [&'static str];

	type Init: InitConfig;
	type Props: PropSet;

	/// Full classification table: sizing pair, Regular, InitOnly, BoundMethod.
	fn table() -> Vec<PropertySpec> {
		let entries = |names: &'static [&'static str], kind| {
			names.iter().map(move |&name| PropertySpec { name, kind })
		};

		entries(&["width", "height"], PropKind::Regular)
			.chain(entries(<Self::Props as PropSet>::NAMES, PropKind::Regular))
			.chain(entries(<Self::Init as InitConfig>::NAMES, PropKind::InitOnly))
			.chain(entries(Self::METHODS, PropKind::BoundMethod))
			.collect()
	}

	/// Split a loose bag into construction config and settable props. Keys
	/// the table does not list are dropped.
	fn from_bag(bag: &PropsBag) -> (Self::Init, Self::Props) {
		bag.report_unknown(Self::NAME, &Self::table());
		(
			<Self::Init as InitConfig>::from_bag(bag),
			<Self::Props as PropSet>::from_bag(bag),
		)
	}
}

/// Variants whose engine runs its own render loop that can be paused.
pub trait Animated: Variant {}

/// Look up the kind of `name` in a variant's table.
pub fn kind_of<V: Variant>(name: &str) -> Option<PropKind> {
	V::table()
		.into_iter()
		.find(|spec| spec.name == name)
		.map(|spec| spec.kind)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	fn assert_unique<V: Variant>() {
		let table = V::table();
		let mut seen = HashSet::new();
		for spec in &table {
			assert!(
				seen.insert(spec.name),
				"{} classifies `{}` twice",
				V::NAME,
				spec.name
			);
		}
	}

	#[test]
	fn every_name_is_classified_once() {
		assert_unique::<Graph2D>();
		assert_unique::<Graph3D>();
		assert_unique::<GraphVr>();
		assert_unique::<GraphAr>();
	}

	#[test]
	fn shared_names_are_regular_everywhere() {
		for name in ["graphData", "nodeId", "linkSource", "linkTarget", "nodeColor", "width"] {
			assert_eq!(kind_of::<Graph2D>(name), Some(PropKind::Regular));
			assert_eq!(kind_of::<Graph3D>(name), Some(PropKind::Regular));
			assert_eq!(kind_of::<GraphVr>(name), Some(PropKind::Regular));
			assert_eq!(kind_of::<GraphAr>(name), Some(PropKind::Regular));
		}
	}

	#[test]
	fn init_only_properties_are_per_variant() {
		assert_eq!(kind_of::<Graph3D>("controlType"), Some(PropKind::InitOnly));
		assert_eq!(kind_of::<Graph3D>("rendererConfig"), Some(PropKind::InitOnly));
		assert_eq!(kind_of::<GraphAr>("markerAttrs"), Some(PropKind::InitOnly));
		assert_eq!(kind_of::<Graph2D>("controlType"), None);
	}

	#[test]
	fn bound_methods_are_listed() {
		assert_eq!(kind_of::<Graph2D>("centerAt"), Some(PropKind::BoundMethod));
		assert_eq!(kind_of::<Graph3D>("cameraPosition"), Some(PropKind::BoundMethod));
		assert_eq!(kind_of::<GraphVr>("d3Force"), Some(PropKind::BoundMethod));
		assert_eq!(kind_of::<GraphAr>("emitParticle"), Some(PropKind::BoundMethod));
		assert_eq!(kind_of::<GraphVr>("zoom"), None);
	}

	#[test]
	fn from_bag_drops_unknown_and_splits_init() {
		let bag = PropsBag::from_json_str(
			r#"{ "controlType": "orbit", "nodeColor": "red", "width": 640, "whatever": true }"#,
		)
		.unwrap();

		let (init, props) = Graph3D::from_bag(&bag);
		assert_eq!(init.present(), vec!["controlType"]);
		assert_eq!(props.width, Some(640.0));
		assert_eq!(props.node_color, Some("red".into()));
		assert_eq!(bag.unknown_keys(&Graph3D::table()), vec!["whatever"]);
	}
}
