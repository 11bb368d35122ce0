//! Graph data structures for the relationship graph component.
//!
//! These mirror the wire shapes the case-detail API hands over: a node/edge
//! snapshot for one object plus the object's provenance event rows.

use serde::Deserialize;

/// What a graph node represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// The investigated museum object itself.
	Object,
	/// A person or institution in the custody chain.
	Actor,
	/// A location an event occurred in.
	Place,
}

/// A named historical/legal window used to flag edges for compliance review.
///
/// Variant order is the declared styling priority: when an edge falls into
/// several windows at once, the earliest variant wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum PolicyPeriod {
	/// Washington Conference Principles window (1933-1945).
	#[serde(rename = "NAZI_ERA")]
	NaziEra,
	/// UNESCO 1970 Convention (1970-11-14 onwards).
	#[serde(rename = "UNESCO_1970")]
	Unesco1970,
	/// Any policy code this client does not know about.
	#[serde(other)]
	Unclassified,
}

/// A node in the graph. Ids are namespaced by kind, e.g. `"obj:123"`,
/// `"actor:Jane Doe"`, `"place:Paris"`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier within one graph instance.
	pub id: String,
	/// Display name.
	pub label: String,
	/// Node kind (wire field name is `type`).
	#[serde(rename = "type")]
	pub kind: NodeKind,
}

/// A directed edge between two nodes. Parallel duplicates are permitted; the
/// same actor and place can recur across many events.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	/// Edge identifier; synthesized edges use a `(source, target, event index)`
	/// composite so repeated augmentation runs are idempotent.
	#[serde(default)]
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Event-type label, e.g. `"SALE"` or `"occurred in"`.
	#[serde(default)]
	pub label: String,
	/// Event start date (ISO `YYYY-MM-DD`), if known.
	#[serde(default)]
	pub date: Option<String>,
	/// Relative importance; feeds link-force strength.
	#[serde(default = "default_weight")]
	pub weight: f64,
	/// Policy windows this edge's date falls into.
	#[serde(default)]
	pub policy: Vec<PolicyPeriod>,
	/// Citation for the underlying record.
	#[serde(default)]
	pub source_ref: Option<String>,
}

fn default_weight() -> f64 {
	1.0
}

/// One row of the object's provenance event table.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProvenanceEvent {
	/// Event type, e.g. `"SALE"`, `"DONATED"`.
	#[serde(default)]
	pub event_type: Option<String>,
	/// Event start date (ISO).
	#[serde(default)]
	pub date_from: Option<String>,
	/// Event end date (ISO).
	#[serde(default)]
	pub date_to: Option<String>,
	/// Actor involved, if recorded.
	#[serde(default)]
	pub actor: Option<String>,
	/// Place involved, if recorded.
	#[serde(default)]
	pub place: Option<String>,
	/// Acquisition method, e.g. `"auction"`.
	#[serde(default)]
	pub method: Option<String>,
	/// Citation for the record.
	#[serde(default)]
	pub source_ref: Option<String>,
}

/// Node/edge snapshot for one case.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CaseGraph {
	/// All nodes, object first by convention.
	pub nodes: Vec<GraphNode>,
	/// Directed edges between nodes, by id.
	pub edges: Vec<GraphEdge>,
}

/// Everything the host supplies for one case: the raw graph plus the event
/// list used to augment it when the graph alone is too sparse.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CaseData {
	/// The relationship graph, possibly degenerate.
	#[serde(default)]
	pub graph: CaseGraph,
	/// Provenance event rows for the same object.
	#[serde(default)]
	pub events: Vec<ProvenanceEvent>,
}
