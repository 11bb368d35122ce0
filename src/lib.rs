//! provenance-graph: interactive relationship graph for provenance research.
//!
//! This crate provides a WASM-based visualization component that renders the
//! ownership history of a museum object as a force-directed graph: the object
//! plus the actors and places from its provenance events, with physics-based
//! layout, pan/zoom, drag-to-pin, and policy-aware edge styling.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::relationship_graph::{
	CaseData, CaseGraph, GraphEdge, GraphNode, NodeKind, PolicyPeriod, ProvenanceEvent,
	RelationshipGraphCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("provenance-graph: logging initialized");
}

/// Load the case snapshot from a script element with id="case-data".
/// Expected format: JSON with { graph: { nodes, edges }, events: [...] },
/// resolved by the host before this view mounts; no network I/O happens here.
fn load_case_data() -> Option<CaseData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("case-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<CaseData>(&json_text) {
		Ok(data) => {
			info!(
				"provenance-graph: loaded {} nodes, {} edges, {} events",
				data.graph.nodes.len(),
				data.graph.edges.len(),
				data.events.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("provenance-graph: failed to parse case data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the case snapshot from the DOM and renders the relationship graph,
/// or an empty-state message when no usable data was embedded.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let case_data = load_case_data();
	let has_graph = case_data
		.as_ref()
		.is_some_and(|d| !d.graph.nodes.is_empty());
	let case_data = case_data.unwrap_or_default();
	let case_signal = Signal::derive(move || case_data.clone());

	let on_node_click = Callback::new(|(id, kind): (String, NodeKind)| {
		info!("provenance-graph: clicked {:?} node {}", kind, id);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Provenance Relationship Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			{if has_graph {
				view! {
					<RelationshipGraphCanvas
						data=case_signal
						fullscreen=true
						on_node_click=on_node_click
					/>
					<div class="graph-overlay">
						<h1>"Relationship Graph"</h1>
						<p class="subtitle">
							"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Click a node for details."
						</p>
					</div>
				}
					.into_any()
			} else {
				view! {
					<div class="graph-empty">
						<h1>"No relationship data"</h1>
						<p class="subtitle">"This case has no graph or events to display."</p>
					</div>
				}
					.into_any()
			}}
		</div>
	}
}
