//! Declaration macro for a variant's Regular properties.
//!
//! ```ignore
//! force_graph_props! {
//!     /// Settable properties of the 2D canvas graph.
//!     pub struct ForceGraph2DProps / ForceGraph2DProp : [common, pointer] {
//!         min_zoom / MinZoom: f64 = "minZoom",
//!     }
//! }
//! ```
//!
//! expands to a struct of `Option` fields (plus `width`/`height`), an enum with
//! one variant per setter, and the [`PropSet`](crate::props::PropSet) impl
//! that diffs two structs field by field. Groups splice in property lists
//! shared by several variants so shared names stay identical everywhere.

/// Declare a variant's Regular property set. See the module docs.
#[macro_export]
macro_rules! force_graph_props {
	(@munch $head:tt [] { $($fields:tt)* }) => {
		$crate::force_graph_props!(@emit $head { $($fields)* });
	};

	(@munch $head:tt [common $($rest:ident)*] { $($fields:tt)* }) => {
		$crate::force_graph_props!(@munch $head [$($rest)*] {
			$($fields)*
			/// Graph to render, as `{ nodes, links }`.
			graph_data / GraphData: $crate::value::Shared<$crate::graph::GraphData> = "graphData",
			/// Node field holding the unique id.
			node_id / NodeId: String = "nodeId",
			/// Link field holding the source node id.
			link_source / LinkSource: String = "linkSource",
			/// Link field holding the target node id.
			link_target / LinkTarget: String = "linkTarget",
			background_color / BackgroundColor: String = "backgroundColor",
			/// Ratio of node circle area per value unit.
			node_rel_size / NodeRelSize: f64 = "nodeRelSize",
			node_val / NodeVal: $crate::value::Accessor<f64> = "nodeVal",
			node_label / NodeLabel: $crate::value::Accessor<String> = "nodeLabel",
			node_visibility / NodeVisibility: $crate::value::Accessor<bool> = "nodeVisibility",
			node_color / NodeColor: $crate::value::Accessor<String> = "nodeColor",
			node_auto_color_by / NodeAutoColorBy: $crate::value::Accessor<String> = "nodeAutoColorBy",
			link_label / LinkLabel: $crate::value::Accessor<String> = "linkLabel",
			link_visibility / LinkVisibility: $crate::value::Accessor<bool> = "linkVisibility",
			link_color / LinkColor: $crate::value::Accessor<String> = "linkColor",
			link_auto_color_by / LinkAutoColorBy: $crate::value::Accessor<String> = "linkAutoColorBy",
			link_width / LinkWidth: $crate::value::Accessor<f64> = "linkWidth",
			link_curvature / LinkCurvature: $crate::value::Accessor<f64> = "linkCurvature",
			/// Pointer tolerance for link hover, in pixels.
			link_hover_precision / LinkHoverPrecision: f64 = "linkHoverPrecision",
			link_directional_arrow_length / LinkDirectionalArrowLength: $crate::value::Accessor<f64> = "linkDirectionalArrowLength",
			link_directional_arrow_color / LinkDirectionalArrowColor: $crate::value::Accessor<String> = "linkDirectionalArrowColor",
			link_directional_arrow_rel_pos / LinkDirectionalArrowRelPos: $crate::value::Accessor<f64> = "linkDirectionalArrowRelPos",
			link_directional_particles / LinkDirectionalParticles: $crate::value::Accessor<f64> = "linkDirectionalParticles",
			link_directional_particle_speed / LinkDirectionalParticleSpeed: $crate::value::Accessor<f64> = "linkDirectionalParticleSpeed",
			link_directional_particle_offset / LinkDirectionalParticleOffset: $crate::value::Accessor<f64> = "linkDirectionalParticleOffset",
			link_directional_particle_width / LinkDirectionalParticleWidth: $crate::value::Accessor<f64> = "linkDirectionalParticleWidth",
			link_directional_particle_color / LinkDirectionalParticleColor: $crate::value::Accessor<String> = "linkDirectionalParticleColor",
			/// Hierarchical layout; cycles are reported to `on_dag_error`.
			dag_mode / DagMode: $crate::graph::DagMode = "dagMode",
			dag_level_distance / DagLevelDistance: f64 = "dagLevelDistance",
			dag_node_filter / DagNodeFilter: $crate::value::Callback<($crate::graph::NodeObject,), bool> = "dagNodeFilter",
			/// Receives the ids of the nodes forming a cycle in DAG mode.
			on_dag_error / OnDagError: $crate::value::Callback<(Vec<$crate::graph::NodeId>,)> = "onDagError",
			d3_alpha_min / D3AlphaMin: f64 = "d3AlphaMin",
			d3_alpha_decay / D3AlphaDecay: f64 = "d3AlphaDecay",
			d3_velocity_decay / D3VelocityDecay: f64 = "d3VelocityDecay",
			warmup_ticks / WarmupTicks: f64 = "warmupTicks",
			cooldown_ticks / CooldownTicks: f64 = "cooldownTicks",
			/// Milliseconds before the simulation stops.
			cooldown_time / CooldownTime: f64 = "cooldownTime",
			on_engine_tick / OnEngineTick: $crate::value::Callback<()> = "onEngineTick",
			on_engine_stop / OnEngineStop: $crate::value::Callback<()> = "onEngineStop",
		});
	};

	(@munch $head:tt [pointer $($rest:ident)*] { $($fields:tt)* }) => {
		$crate::force_graph_props!(@munch $head [$($rest)*] {
			$($fields)*
			on_node_click / OnNodeClick: $crate::value::Callback<($crate::graph::NodeObject, ::web_sys::MouseEvent)> = "onNodeClick",
			on_node_right_click / OnNodeRightClick: $crate::value::Callback<($crate::graph::NodeObject, ::web_sys::MouseEvent)> = "onNodeRightClick",
			/// Called with the hovered node and the previously hovered one.
			on_node_hover / OnNodeHover: $crate::value::Callback<(Option<$crate::graph::NodeObject>, Option<$crate::graph::NodeObject>)> = "onNodeHover",
			on_node_drag / OnNodeDrag: $crate::value::Callback<($crate::graph::NodeObject, $crate::graph::Translate)> = "onNodeDrag",
			on_node_drag_end / OnNodeDragEnd: $crate::value::Callback<($crate::graph::NodeObject, $crate::graph::Translate)> = "onNodeDragEnd",
			on_link_click / OnLinkClick: $crate::value::Callback<($crate::graph::LinkObject, ::web_sys::MouseEvent)> = "onLinkClick",
			on_link_right_click / OnLinkRightClick: $crate::value::Callback<($crate::graph::LinkObject, ::web_sys::MouseEvent)> = "onLinkRightClick",
			on_link_hover / OnLinkHover: $crate::value::Callback<(Option<$crate::graph::LinkObject>, Option<$crate::graph::LinkObject>)> = "onLinkHover",
			on_background_click / OnBackgroundClick: $crate::value::Callback<(::web_sys::MouseEvent,)> = "onBackgroundClick",
			on_background_right_click / OnBackgroundRightClick: $crate::value::Callback<(::web_sys::MouseEvent,)> = "onBackgroundRightClick",
			show_pointer_cursor / ShowPointerCursor: bool = "showPointerCursor",
			enable_node_drag / EnableNodeDrag: bool = "enableNodeDrag",
			enable_pointer_interaction / EnablePointerInteraction: bool = "enablePointerInteraction",
		});
	};

	(@munch $head:tt [xr $($rest:ident)*] { $($fields:tt)* }) => {
		$crate::force_graph_props!(@munch $head [$($rest)*] {
			$($fields)*
			on_node_click / OnNodeClick: $crate::value::Callback<($crate::graph::NodeObject,)> = "onNodeClick",
			on_node_hover / OnNodeHover: $crate::value::Callback<(Option<$crate::graph::NodeObject>, Option<$crate::graph::NodeObject>)> = "onNodeHover",
			on_link_click / OnLinkClick: $crate::value::Callback<($crate::graph::LinkObject,)> = "onLinkClick",
			on_link_hover / OnLinkHover: $crate::value::Callback<(Option<$crate::graph::LinkObject>, Option<$crate::graph::LinkObject>)> = "onLinkHover",
		});
	};

	(@munch $head:tt [three $($rest:ident)*] { $($fields:tt)* }) => {
		$crate::force_graph_props!(@munch $head [$($rest)*] {
			$($fields)*
			node_opacity / NodeOpacity: f64 = "nodeOpacity",
			/// Geometric resolution of node spheres, in slice segments.
			node_resolution / NodeResolution: f64 = "nodeResolution",
			node_three_object / NodeThreeObject: $crate::value::Accessor<$crate::value::JsObject> = "nodeThreeObject",
			node_three_object_extend / NodeThreeObjectExtend: $crate::value::Accessor<bool> = "nodeThreeObjectExtend",
			link_opacity / LinkOpacity: f64 = "linkOpacity",
			link_resolution / LinkResolution: f64 = "linkResolution",
			link_curve_rotation / LinkCurveRotation: $crate::value::Accessor<f64> = "linkCurveRotation",
			link_material / LinkMaterial: $crate::value::Accessor<$crate::value::JsObject> = "linkMaterial",
			link_three_object / LinkThreeObject: $crate::value::Accessor<$crate::value::JsObject> = "linkThreeObject",
			link_three_object_extend / LinkThreeObjectExtend: $crate::value::Accessor<bool> = "linkThreeObjectExtend",
			/// Custom link positioning; return `true` to skip the default update.
			link_position_update / LinkPositionUpdate: $crate::value::Callback<($crate::value::JsObject, $crate::graph::LinkCoords, $crate::graph::LinkObject), bool> = "linkPositionUpdate",
			link_directional_arrow_resolution / LinkDirectionalArrowResolution: f64 = "linkDirectionalArrowResolution",
			link_directional_particle_resolution / LinkDirectionalParticleResolution: f64 = "linkDirectionalParticleResolution",
			force_engine / ForceEngine: $crate::graph::ForceEngine = "forceEngine",
			num_dimensions / NumDimensions: $crate::graph::NumDimensions = "numDimensions",
			ngraph_physics / NgraphPhysics: ::serde_json::Value = "ngraphPhysics",
		});
	};

	(@emit [$(#[$meta:meta])* $name:ident / $prop:ident] {
		$(
			$(#[$fmeta:meta])*
			$field:ident / $variant:ident : $ty:ty = $js:literal,
		)*
	}) => {
		$(#[$meta])*
		#[derive(Clone, Debug, Default, PartialEq)]
		pub struct $name {
			/// Container width in pixels.
			pub width: Option<f64>,
			/// Container height in pixels.
			pub height: Option<f64>,
			$(
				$(#[$fmeta])*
				pub $field: Option<$ty>,
			)*
		}

		/// A single setter call on the engine. `None` unsets the property,
		/// restoring the engine's default.
		#[derive(Clone, Debug, PartialEq)]
		pub enum $prop {
			$(
				$(#[$fmeta])*
				$variant(Option<$ty>),
			)*
		}

		impl $crate::props::PropChange for $prop {
			fn name(&self) -> &'static str {
				match self {
					$( Self::$variant(_) => $js, )*
				}
			}
		}

		impl $crate::IntoJs for $prop {
			fn into_js(&self) -> ::wasm_bindgen::JsValue {
				match self {
					$( Self::$variant(value) => $crate::IntoJs::into_js(value), )*
				}
			}
		}

		impl $crate::props::PropSet for $name {
			type Prop = $prop;

			const NAMES: &'static [&'static str] = &[$($js),*];

			fn size(&self) -> $crate::props::Size {
				$crate::props::Size {
					width: self.width,
					height: self.height,
				}
			}

			fn changes(&self, prev: &Self) -> Vec<$prop> {
				let mut changes = Vec::new();
				$(
					if self.$field != prev.$field {
						changes.push($prop::$variant(self.$field.clone()));
					}
				)*
				changes
			}

			fn from_bag(bag: &$crate::props::PropsBag) -> Self {
				Self {
					width: bag.get("width"),
					height: bag.get("height"),
					$( $field: bag.get($js), )*
				}
			}
		}
	};

	(
		$(#[$meta:meta])*
		pub struct $name:ident / $prop:ident : [$($group:ident),* $(,)?] {
			$($fields:tt)*
		}
	) => {
		$crate::force_graph_props!(@munch [$(#[$meta])* $name / $prop] [$($group)*] { $($fields)* });
	};
}
