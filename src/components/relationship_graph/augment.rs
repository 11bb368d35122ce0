//! Graph augmentation for sparse case data.
//!
//! Some sources return a graph that is just the object node with no edges at
//! all, even when the same case carries a usable provenance event list. Rather
//! than show an investigator a single floating dot, this module synthesizes
//! actor/place nodes and edges from the events. Any richer input passes
//! through untouched, so the operation stays idempotent and remains safe once
//! the data source starts returning full graphs itself.

use std::collections::HashSet;

use crate::components::relationship_graph::types::{
	CaseGraph, GraphEdge, GraphNode, NodeKind, ProvenanceEvent,
};

/// Label used for the synthesized actor-to-place edge of a single event.
const OCCURRED_IN: &str = "occurred in";

/// Returns true when the graph is exactly one node with no edges.
pub fn is_degenerate(graph: &CaseGraph) -> bool {
	graph.nodes.len() == 1 && graph.edges.is_empty()
}

/// Augment a degenerate graph from the case's event list.
///
/// Fires only when `graph` is degenerate and at least one event exists;
/// otherwise the input is returned unchanged, by value. Never errors: an
/// empty event list is simply not enough information to add anything.
///
/// Synthesis walks events in their stored chronological order. For the single
/// object node `O` and each event:
/// - an `actor:<name>` / `place:<name>` node is created on first sighting,
/// - edges `O -> actor` and `O -> place` carry the event type, start date,
///   and citation,
/// - when both endpoints exist, `actor -> place` is linked as "occurred in".
///
/// Edge ids are `(source, target, event index)` composites, so repeated runs
/// on identical input produce identical output.
pub fn augment(graph: &CaseGraph, events: &[ProvenanceEvent]) -> CaseGraph {
	if !is_degenerate(graph) || events.is_empty() {
		return graph.clone();
	}

	let object_id = graph.nodes[0].id.clone();
	let mut nodes = graph.nodes.clone();
	let mut edges = Vec::new();
	let mut seen: HashSet<String> = nodes.iter().map(|n| n.id.clone()).collect();

	for (index, event) in events.iter().enumerate() {
		let label = event.event_type.clone().unwrap_or_else(|| "UNKNOWN".into());

		let actor_id = event
			.actor
			.as_deref()
			.filter(|a| !a.is_empty())
			.map(|actor| intern_node(&mut nodes, &mut seen, NodeKind::Actor, actor));
		let place_id = event
			.place
			.as_deref()
			.filter(|p| !p.is_empty())
			.map(|place| intern_node(&mut nodes, &mut seen, NodeKind::Place, place));

		if let Some(actor_id) = &actor_id {
			edges.push(event_edge(&object_id, actor_id, &label, event, index));
		}
		if let Some(place_id) = &place_id {
			edges.push(event_edge(&object_id, place_id, &label, event, index));
		}
		if let (Some(actor_id), Some(place_id)) = (&actor_id, &place_id) {
			edges.push(event_edge(actor_id, place_id, OCCURRED_IN, event, index));
		}
	}

	CaseGraph { nodes, edges }
}

/// Create the node for an actor/place name on first sighting; return its id.
fn intern_node(
	nodes: &mut Vec<GraphNode>,
	seen: &mut HashSet<String>,
	kind: NodeKind,
	name: &str,
) -> String {
	let prefix = match kind {
		NodeKind::Object => "object",
		NodeKind::Actor => "actor",
		NodeKind::Place => "place",
	};
	let id = format!("{prefix}:{name}");
	if seen.insert(id.clone()) {
		nodes.push(GraphNode {
			id: id.clone(),
			label: name.to_string(),
			kind,
		});
	}
	id
}

fn event_edge(
	source: &str,
	target: &str,
	label: &str,
	event: &ProvenanceEvent,
	index: usize,
) -> GraphEdge {
	GraphEdge {
		id: format!("{source}->{target}#{index}"),
		source: source.to_string(),
		target: target.to_string(),
		label: label.to_string(),
		date: event.date_from.clone(),
		weight: 1.0,
		policy: Vec::new(),
		source_ref: event.source_ref.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn object_only() -> CaseGraph {
		CaseGraph {
			nodes: vec![GraphNode {
				id: "obj:1".into(),
				label: "Bronze Vessel".into(),
				kind: NodeKind::Object,
			}],
			edges: vec![],
		}
	}

	fn sale_event(actor: Option<&str>, place: Option<&str>) -> ProvenanceEvent {
		ProvenanceEvent {
			event_type: Some("SALE".into()),
			date_from: Some("1935-01-01".into()),
			actor: actor.map(Into::into),
			place: place.map(Into::into),
			source_ref: Some("catalogue p.12".into()),
			..Default::default()
		}
	}

	#[test]
	fn single_event_yields_three_nodes_and_three_edges() {
		let out = augment(&object_only(), &[sale_event(Some("Alice"), Some("Paris"))]);

		let ids: Vec<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["obj:1", "actor:Alice", "place:Paris"]);

		let edges: Vec<(&str, &str, &str)> = out
			.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str(), e.label.as_str()))
			.collect();
		assert_eq!(
			edges,
			[
				("obj:1", "actor:Alice", "SALE"),
				("obj:1", "place:Paris", "SALE"),
				("actor:Alice", "place:Paris", "occurred in"),
			]
		);

		for edge in &out.edges {
			assert_eq!(edge.date.as_deref(), Some("1935-01-01"));
			assert_eq!(edge.source_ref.as_deref(), Some("catalogue p.12"));
			assert!(edge.policy.is_empty());
		}
	}

	#[test]
	fn non_degenerate_graph_passes_through_unchanged() {
		let mut graph = object_only();
		graph.nodes.push(GraphNode {
			id: "actor:Bob".into(),
			label: "Bob".into(),
			kind: NodeKind::Actor,
		});
		graph.edges.push(GraphEdge {
			id: "e0".into(),
			source: "obj:1".into(),
			target: "actor:Bob".into(),
			label: "PURCHASED".into(),
			date: None,
			weight: 1.0,
			policy: vec![],
			source_ref: None,
		});

		let events: Vec<ProvenanceEvent> =
			(0..5).map(|_| sale_event(Some("Alice"), None)).collect();
		assert_eq!(augment(&graph, &events), graph);
	}

	#[test]
	fn empty_event_list_passes_through_unchanged() {
		let graph = object_only();
		assert_eq!(augment(&graph, &[]), graph);
	}

	#[test]
	fn repeated_names_never_duplicate_nodes() {
		let events = vec![
			sale_event(Some("Alice"), Some("Paris")),
			sale_event(Some("Alice"), Some("Paris")),
			sale_event(Some("Alice"), Some("Vienna")),
		];
		let out = augment(&object_only(), &events);

		let mut ids: Vec<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids.len(), 4);
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), 4);
		// Parallel edges are allowed; three full events give nine edges.
		assert_eq!(out.edges.len(), 9);
	}

	#[test]
	fn augmentation_is_deterministic() {
		let events = vec![
			sale_event(Some("Alice"), Some("Paris")),
			sale_event(None, Some("Berlin")),
			sale_event(Some("Bob"), None),
		];
		let first = augment(&object_only(), &events);
		let second = augment(&object_only(), &events);
		assert_eq!(first, second);

		let edge_ids: Vec<&str> = first.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(
			edge_ids,
			[
				"obj:1->actor:Alice#0",
				"obj:1->place:Paris#0",
				"actor:Alice->place:Paris#0",
				"obj:1->place:Berlin#1",
				"obj:1->actor:Bob#2",
			]
		);
	}

	#[test]
	fn every_edge_endpoint_exists() {
		let events = vec![
			sale_event(Some("Alice"), Some("Paris")),
			sale_event(Some("Bob"), Some("Paris")),
			sale_event(None, None),
		];
		let out = augment(&object_only(), &events);
		let ids: HashSet<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
		for edge in &out.edges {
			assert!(ids.contains(edge.source.as_str()), "{}", edge.id);
			assert!(ids.contains(edge.target.as_str()), "{}", edge.id);
		}
	}

	#[test]
	fn event_without_actor_or_place_adds_nothing() {
		let out = augment(&object_only(), &[ProvenanceEvent::default()]);
		assert_eq!(out.nodes.len(), 1);
		assert!(out.edges.is_empty());
	}
}
