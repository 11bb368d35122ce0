//! Per-view graph state.
//!
//! Binds the canonical (augmented) graph to the force simulation, tracks the
//! viewport transform and in-progress gestures, and animates the cosmetic
//! hover emphasis. Created once when the component mounts, mutated each frame
//! by the animation loop, and discarded with the view.

use std::collections::HashMap;

use log::debug;

use crate::components::relationship_graph::augment;
use crate::components::relationship_graph::interaction::{DragState, PanState, ViewTransform};
use crate::components::relationship_graph::simulation::{ForceLayout, LayoutConfig, LayoutLink};
use crate::components::relationship_graph::style::StyleConfig;
use crate::components::relationship_graph::types::{CaseData, CaseGraph, GraphNode};

/// Smoothed hover emphasis, one intensity per node.
///
/// Exponential smoothing gives the enlarge/shrink transition a natural
/// ease-out instead of snapping; purely cosmetic, no simulation coupling.
#[derive(Clone, Debug, Default)]
pub struct EmphasisState {
	/// Currently hovered node, if any.
	pub hovered: Option<usize>,
	intensity: HashMap<usize, f64>,
}

const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

impl EmphasisState {
	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hovered = node;
	}

	/// Animate intensities toward their targets.
	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		if let Some(idx) = self.hovered {
			let intensity = self.intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}
		let hovered = self.hovered;
		self.intensity.retain(|idx, intensity| {
			if hovered == Some(*idx) {
				return true;
			}
			*intensity *= fade_out;
			*intensity > 0.005
		});
	}

	/// Emphasis intensity for a node, 0.0 when untouched.
	pub fn intensity(&self, idx: usize) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}
}

/// An edge resolved to node/body indices. Edges whose endpoints could not be
/// resolved are absent, so `edge` indexes back into `graph.edges`.
#[derive(Clone, Copy, Debug)]
pub struct WiredEdge {
	/// Index into `graph.edges`.
	pub edge: usize,
	/// Source node/body index.
	pub source: usize,
	/// Target node/body index.
	pub target: usize,
}

/// Core view state combining the canonical graph with simulation and
/// interaction tracking.
pub struct GraphViewState {
	/// The canonical, augmented graph; immutable for the view's lifetime.
	pub graph: CaseGraph,
	pub sim: ForceLayout,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub emphasis: EmphasisState,
	pub width: f64,
	pub height: f64,
	wired_edges: Vec<WiredEdge>,
}

impl GraphViewState {
	/// Build view state from the host's one-shot case snapshot. The raw graph
	/// is augmented from the event list when degenerate; edges referencing
	/// unknown node ids are dropped rather than failing the view.
	pub fn new(data: &CaseData, width: f64, height: f64) -> Self {
		let graph = augment::augment(&data.graph, &data.events);
		debug!(
			"relationship graph: {} nodes, {} edges after augmentation",
			graph.nodes.len(),
			graph.edges.len()
		);

		let index_of: HashMap<&str, usize> = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();

		let mut links = Vec::new();
		let mut wired_edges = Vec::new();
		for (edge_idx, edge) in graph.edges.iter().enumerate() {
			match (
				index_of.get(edge.source.as_str()),
				index_of.get(edge.target.as_str()),
			) {
				(Some(&s), Some(&t)) => {
					links.push(LayoutLink {
						source: s,
						target: t,
						weight: edge.weight,
					});
					wired_edges.push(WiredEdge {
						edge: edge_idx,
						source: s,
						target: t,
					});
				}
				_ => {
					log::warn!(
						"relationship graph: dropping edge {} with unknown endpoint",
						edge.id
					);
				}
			}
		}

		let sim = ForceLayout::new(
			graph.nodes.len(),
			&links,
			width,
			height,
			LayoutConfig::default(),
		);

		Self {
			graph,
			sim,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			emphasis: EmphasisState::default(),
			width,
			height,
			wired_edges,
		}
	}

	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.graph.nodes.get(idx)
	}

	/// Edges resolved to node/body indices; dropped edges are absent.
	pub fn wired_edges(&self) -> &[WiredEdge] {
		&self.wired_edges
	}

	/// Topmost node under the screen position, if any. Later nodes win so
	/// hit testing matches draw order.
	pub fn node_at_position(&self, sx: f64, sy: f64, style: &StyleConfig) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let mut found = None;
		for (idx, node) in self.graph.nodes.iter().enumerate() {
			let Some((x, y)) = self.sim.position(idx) else {
				continue;
			};
			let hit = style.hit_radius(node.kind);
			if (x - gx).hypot(y - gy) < hit {
				found = Some(idx);
			}
		}
		found
	}

	/// Pin a node to the pointer's screen position (drag start or move).
	pub fn pin_node(&mut self, idx: usize, sx: f64, sy: f64) {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		self.sim.pin(idx, gx, gy);
	}

	/// Release a dragged node back to free integration.
	pub fn release_node(&mut self, idx: usize) {
		self.sim.unpin(idx);
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.emphasis.set_hover(node);
	}

	/// Advance simulation and emphasis by one frame.
	pub fn tick(&mut self, dt: f64) {
		self.sim.tick();
		self.emphasis.tick(dt);
	}

	/// Synchronously halt the simulation for teardown.
	pub fn dispose(&mut self) {
		self.sim.dispose();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::relationship_graph::simulation::Phase;
	use crate::components::relationship_graph::types::{GraphEdge, NodeKind, ProvenanceEvent};

	fn degenerate_case() -> CaseData {
		CaseData {
			graph: CaseGraph {
				nodes: vec![GraphNode {
					id: "obj:1".into(),
					label: "Amphora".into(),
					kind: NodeKind::Object,
				}],
				edges: vec![],
			},
			events: vec![ProvenanceEvent {
				event_type: Some("SALE".into()),
				date_from: Some("1935-01-01".into()),
				actor: Some("Alice".into()),
				place: Some("Paris".into()),
				..Default::default()
			}],
		}
	}

	#[test]
	fn view_state_augments_and_wires_the_simulation() {
		let state = GraphViewState::new(&degenerate_case(), 800.0, 600.0);
		assert_eq!(state.graph.nodes.len(), 3);
		assert_eq!(state.sim.len(), 3);
		assert_eq!(state.wired_edges().len(), 3);
	}

	#[test]
	fn edges_with_unknown_endpoints_are_dropped_not_fatal() {
		let mut data = degenerate_case();
		// A second node makes the graph non-degenerate, so the bad edge
		// survives augmentation and must be dropped at wiring time.
		data.graph.nodes.push(GraphNode {
			id: "actor:Bob".into(),
			label: "Bob".into(),
			kind: NodeKind::Actor,
		});
		data.graph.edges.push(GraphEdge {
			id: "bad".into(),
			source: "obj:1".into(),
			target: "actor:Ghost".into(),
			label: "SALE".into(),
			date: None,
			weight: 1.0,
			policy: vec![],
			source_ref: None,
		});
		let state = GraphViewState::new(&data, 800.0, 600.0);
		assert_eq!(state.sim.len(), 2);
		assert!(state.wired_edges().is_empty());
	}

	#[test]
	fn hit_testing_respects_kind_radius_and_transform() {
		let mut state = GraphViewState::new(&degenerate_case(), 800.0, 600.0);
		let style = StyleConfig::default();
		state.pin_node(0, 200.0, 200.0);
		assert_eq!(state.node_at_position(200.0, 200.0, &style), Some(0));
		assert_eq!(state.node_at_position(200.0, 230.0, &style), None);

		// Shift the viewport; the same screen point no longer hits.
		state.transform.x = 100.0;
		assert_eq!(state.node_at_position(200.0, 200.0, &style), None);
		assert_eq!(state.node_at_position(300.0, 200.0, &style), Some(0));
	}

	#[test]
	fn hover_emphasis_rises_then_fades() {
		let mut emphasis = EmphasisState::default();
		emphasis.set_hover(Some(1));
		for _ in 0..30 {
			emphasis.tick(1.0 / 60.0);
		}
		assert!(emphasis.intensity(1) > 0.9);
		assert_eq!(emphasis.intensity(0), 0.0);

		emphasis.set_hover(None);
		for _ in 0..120 {
			emphasis.tick(1.0 / 60.0);
		}
		assert!(emphasis.intensity(1) < 0.01);
	}

	#[test]
	fn dispose_stops_further_ticks() {
		let mut state = GraphViewState::new(&degenerate_case(), 800.0, 600.0);
		state.tick(0.016);
		state.dispose();
		assert_eq!(state.sim.phase(), Phase::Disposed);
		let before: Vec<(f64, f64)> = state.sim.positions().collect();
		state.tick(0.016);
		let after: Vec<(f64, f64)> = state.sim.positions().collect();
		assert_eq!(before, after);
	}
}
