//! Style rules mapping the graph model to drawable attributes.
//!
//! Pure functions recomputed every tick by the renderer. Sizes that should
//! stay constant on screen are divided by the zoom factor at the call site
//! via [`ScaledSizes`].

use crate::components::relationship_graph::theme::{Color, Theme};
use crate::components::relationship_graph::types::{NodeKind, PolicyPeriod};

/// Visual sizing parameters in world units (at zoom 1.0).
#[derive(Clone, Debug)]
pub struct StyleConfig {
	/// Radius of the investigated object node.
	pub object_radius: f64,
	/// Radius of actor/place nodes.
	pub satellite_radius: f64,
	/// Extra radius factor while a node is emphasized by hover.
	pub emphasis_scale: f64,
	/// Hit-test radius padding beyond the drawn circle.
	pub hit_padding: f64,
	/// Edge stroke width in screen pixels.
	pub edge_width: f64,
	/// Arrowhead size in world units.
	pub arrow_size: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Gap between the node circle and its label, in screen pixels.
	pub label_gap: f64,
}

impl Default for StyleConfig {
	fn default() -> Self {
		Self {
			object_radius: 14.0,
			satellite_radius: 9.0,
			emphasis_scale: 1.35,
			hit_padding: 6.0,
			edge_width: 1.5,
			arrow_size: 6.0,
			label_size: 11.0,
			label_gap: 4.0,
		}
	}
}

impl StyleConfig {
	/// Base radius for a node of the given kind. The object stays the
	/// largest so the investigated item remains the visual anchor.
	pub fn base_radius(&self, kind: NodeKind) -> f64 {
		match kind {
			NodeKind::Object => self.object_radius,
			NodeKind::Actor | NodeKind::Place => self.satellite_radius,
		}
	}

	/// Rendered radius including hover emphasis, `emphasis` in 0..=1.
	pub fn radius(&self, kind: NodeKind, emphasis: f64) -> f64 {
		let base = self.base_radius(kind);
		base * (1.0 + (self.emphasis_scale - 1.0) * emphasis.clamp(0.0, 1.0))
	}

	/// Radius used for pointer hit testing.
	pub fn hit_radius(&self, kind: NodeKind) -> f64 {
		self.base_radius(kind) + self.hit_padding
	}
}

/// Node fill for a kind.
pub fn node_color(kind: NodeKind, theme: &Theme) -> Color {
	match kind {
		NodeKind::Object => theme.kinds.object,
		NodeKind::Actor => theme.kinds.actor,
		NodeKind::Place => theme.kinds.place,
	}
}

/// Edge stroke for a policy set: the highest-priority period present wins,
/// per the declared order on [`PolicyPeriod`].
pub fn edge_color(policy: &[PolicyPeriod], theme: &Theme) -> Color {
	match policy.iter().min() {
		Some(PolicyPeriod::NaziEra) => theme.policies.nazi,
		Some(PolicyPeriod::Unesco1970) => theme.policies.unesco,
		_ => theme.policies.normal,
	}
}

/// Per-frame sizes adjusted for the current zoom so strokes and text keep a
/// constant screen size.
#[derive(Clone, Debug)]
pub struct ScaledSizes {
	/// Edge stroke width in world units.
	pub edge_width: f64,
	/// Arrowhead size in world units.
	pub arrow_size: f64,
	/// CSS font shorthand for labels.
	pub label_font: String,
	/// Circle-to-label gap in world units.
	pub label_gap: f64,
}

impl ScaledSizes {
	/// Derive frame sizes from the config at zoom factor `k`.
	pub fn new(config: &StyleConfig, k: f64) -> Self {
		let k = k.max(0.1);
		Self {
			edge_width: config.edge_width / k,
			arrow_size: config.arrow_size,
			label_font: format!("{}px sans-serif", config.label_size / k),
			label_gap: config.label_gap / k,
		}
	}

	/// Baseline y-offset placing a label below a node of the given rendered
	/// radius, clear of the circle.
	pub fn label_offset(&self, radius: f64) -> f64 {
		radius + self.label_gap + 1.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn object_renders_larger_than_actor_and_place() {
		let config = StyleConfig::default();
		assert!(config.base_radius(NodeKind::Object) > config.base_radius(NodeKind::Actor));
		assert_eq!(
			config.base_radius(NodeKind::Actor),
			config.base_radius(NodeKind::Place)
		);
	}

	#[test]
	fn emphasis_enlarges_and_is_clamped() {
		let config = StyleConfig::default();
		let base = config.radius(NodeKind::Actor, 0.0);
		assert!(config.radius(NodeKind::Actor, 1.0) > base);
		assert_eq!(
			config.radius(NodeKind::Actor, 5.0),
			config.radius(NodeKind::Actor, 1.0)
		);
	}

	#[test]
	fn each_kind_gets_a_distinct_fill() {
		let theme = Theme::default();
		let colors = [
			node_color(NodeKind::Object, &theme),
			node_color(NodeKind::Actor, &theme),
			node_color(NodeKind::Place, &theme),
		];
		assert!(colors[0] != colors[1] && colors[1] != colors[2] && colors[0] != colors[2]);
	}

	#[test]
	fn nazi_era_wins_the_policy_tie_break() {
		let theme = Theme::default();
		let both = [PolicyPeriod::Unesco1970, PolicyPeriod::NaziEra];
		assert_eq!(edge_color(&both, &theme), theme.policies.nazi);
		assert_eq!(
			edge_color(&[PolicyPeriod::Unesco1970], &theme),
			theme.policies.unesco
		);
		assert_eq!(edge_color(&[], &theme), theme.policies.normal);
		assert_eq!(
			edge_color(&[PolicyPeriod::Unclassified], &theme),
			theme.policies.normal
		);
	}

	#[test]
	fn label_sits_below_the_node_circle() {
		let sizes = ScaledSizes::new(&StyleConfig::default(), 1.0);
		let radius = 14.0;
		assert!(sizes.label_offset(radius) > radius);
	}

	#[test]
	fn screen_sizes_counteract_zoom() {
		let config = StyleConfig::default();
		let zoomed = ScaledSizes::new(&config, 2.0);
		assert_eq!(zoomed.edge_width, config.edge_width / 2.0);
		assert!(zoomed.label_font.starts_with("5.5px"));
	}
}
