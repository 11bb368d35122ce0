//! Relationship graph engine and visualization component.
//!
//! Renders the people/places/events around one museum object as an
//! interactive force-directed graph on an HTML canvas:
//! - Sparse raw graphs are augmented from the case's provenance event list
//! - Physics-based positioning with a pure, renderer-agnostic simulation core
//! - Pan, zoom, drag-to-pin, and hover interactions
//! - Policy-aware edge styling for compliance review
//!
//! # Example
//!
//! ```ignore
//! use provenance_graph::{RelationshipGraphCanvas, CaseData};
//!
//! let data: CaseData = serde_json::from_str(snapshot_json)?;
//!
//! view! {
//!     <RelationshipGraphCanvas
//!         data=data.into()
//!         fullscreen=true
//!         on_node_click=move |(id, kind)| log::info!("clicked {kind:?} {id}")
//!     />
//! }
//! ```

pub mod augment;
mod component;
pub mod interaction;
mod render;
pub mod simulation;
mod state;
pub mod style;
pub mod theme;
mod types;

pub use component::RelationshipGraphCanvas;
pub use theme::Theme;
pub use types::{CaseData, CaseGraph, GraphEdge, GraphNode, NodeKind, PolicyPeriod, ProvenanceEvent};
