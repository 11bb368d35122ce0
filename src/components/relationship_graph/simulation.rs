//! Force-directed layout simulation.
//!
//! A renderer-agnostic physics core that owns per-node position, velocity,
//! and pin state, and advances it one tick at a time toward a non-overlapping,
//! visually stable layout. The host drives ticking from its frame loop; the
//! engine itself never schedules anything and never touches a drawing surface,
//! so it runs (and is tested) with no browser present.
//!
//! Forces are composed additively each tick:
//! - link attraction toward a target separation, weaker around hub nodes,
//! - many-body repulsion between every node pair,
//! - a gentle pull toward the canvas center,
//! - a hard collision floor applied after integration.
//!
//! A decaying temperature (`alpha`) scales every soft force. It shrinks
//! geometrically per tick and is reheated by [`ForceLayout::wake`] when a
//! drag or other disturbance arrives; once it falls under `alpha_min` the
//! engine settles and ticks become no-ops until the next wake.

use std::f64::consts::TAU;

/// Tuning parameters for the force simulation.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Target separation between linked nodes, in world units.
	pub link_distance: f64,
	/// Many-body charge; negative repels.
	pub charge: f64,
	/// Hard minimum separation between node centers.
	pub collide_radius: f64,
	/// Strength of the pull toward the canvas center.
	pub center_strength: f64,
	/// Fraction of velocity retained across a tick.
	pub velocity_decay: f64,
	/// Temperature below which the simulation settles.
	pub alpha_min: f64,
	/// Geometric per-tick temperature decay rate.
	pub alpha_decay: f64,
	/// Temperature restored by a disturbance.
	pub reheat_alpha: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			link_distance: 100.0,
			charge: -300.0,
			collide_radius: 30.0,
			center_strength: 0.05,
			velocity_decay: 0.6,
			alpha_min: 0.001,
			// Reaches alpha_min from 1.0 in roughly 300 ticks.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			reheat_alpha: 0.3,
		}
	}
}

/// Lifecycle of one simulation instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Constructed, not yet ticked.
	Idle,
	/// Actively integrating.
	Running,
	/// Temperature fell under `alpha_min`; ticks are no-ops.
	Settled,
	/// Torn down; no further state mutation.
	Disposed,
}

/// Per-node mutable simulation state.
#[derive(Clone, Copy, Debug, Default)]
struct Body {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
	/// Position driven externally (drag); excluded from integration.
	pinned: bool,
}

/// A link between two bodies, by index, with its weight.
#[derive(Clone, Copy, Debug)]
pub struct LayoutLink {
	/// Source body index.
	pub source: usize,
	/// Target body index.
	pub target: usize,
	/// Link-force strength multiplier.
	pub weight: f64,
}

/// The force layout engine. One instance per mounted graph view; discarded
/// when the case changes or the view is torn down.
pub struct ForceLayout {
	bodies: Vec<Body>,
	links: Vec<LayoutLink>,
	degree: Vec<usize>,
	config: LayoutConfig,
	alpha: f64,
	phase: Phase,
	width: f64,
	height: f64,
}

impl ForceLayout {
	/// Build an engine for `node_count` nodes and the given links. Links with
	/// out-of-range endpoints are dropped. Initial positions are seeded on a
	/// circle around the canvas center, so identical input produces identical
	/// starting conditions.
	pub fn new(
		node_count: usize,
		links: &[LayoutLink],
		width: f64,
		height: f64,
		config: LayoutConfig,
	) -> Self {
		let (cx, cy) = (width / 2.0, height / 2.0);
		let bodies = (0..node_count)
			.map(|i| {
				let angle = i as f64 * TAU / node_count.max(1) as f64;
				Body {
					x: cx + 100.0 * angle.cos(),
					y: cy + 100.0 * angle.sin(),
					..Body::default()
				}
			})
			.collect();

		let links: Vec<LayoutLink> = links
			.iter()
			.filter(|l| l.source < node_count && l.target < node_count)
			.copied()
			.collect();

		let mut degree = vec![0usize; node_count];
		for link in &links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}

		Self {
			bodies,
			links,
			degree,
			config,
			alpha: 1.0,
			phase: Phase::Idle,
			width,
			height,
		}
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Current temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Number of simulated nodes.
	pub fn len(&self) -> usize {
		self.bodies.len()
	}

	/// True when no nodes are simulated.
	pub fn is_empty(&self) -> bool {
		self.bodies.is_empty()
	}

	/// Position of node `idx`, or `None` when out of range.
	pub fn position(&self, idx: usize) -> Option<(f64, f64)> {
		self.bodies.get(idx).map(|b| (b.x, b.y))
	}

	/// Iterate over all node positions in index order.
	pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
		self.bodies.iter().map(|b| (b.x, b.y))
	}

	/// Pin node `idx` to an externally driven position and wake the
	/// simulation. While pinned the node is excluded from force integration;
	/// each pointer move re-pins it at the new position, reheating every time
	/// so a long-held drag never settles out from under the pointer. Stale
	/// indices (a node removed mid-drag) are ignored.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if self.phase == Phase::Disposed {
			return;
		}
		if let Some(body) = self.bodies.get_mut(idx) {
			body.x = x;
			body.y = y;
			body.vx = 0.0;
			body.vy = 0.0;
			body.pinned = true;
			self.wake();
		}
	}

	/// Release a pinned node back to free integration, waking the simulation
	/// so the layout absorbs wherever the node was dropped. Temperature then
	/// decays on its own.
	pub fn unpin(&mut self, idx: usize) {
		if self.phase == Phase::Disposed {
			return;
		}
		if let Some(body) = self.bodies.get_mut(idx) {
			if body.pinned {
				body.pinned = false;
				self.wake();
			}
		}
	}

	/// Reheat the simulation after a disturbance.
	pub fn wake(&mut self) {
		if self.phase == Phase::Disposed {
			return;
		}
		self.alpha = self.alpha.max(self.config.reheat_alpha);
		self.phase = Phase::Running;
	}

	/// Synchronously halt the engine. Every later `tick`, `pin`, or `wake`
	/// is a no-op; checked before any state mutation so a torn-down view is
	/// never operated on.
	pub fn dispose(&mut self) {
		self.phase = Phase::Disposed;
	}

	/// Advance the simulation by one tick and return the total displacement
	/// across all nodes. Returns 0.0 without mutating anything when the
	/// engine is settled or disposed.
	///
	/// Each tick recomputes purely from current positions and velocities, so
	/// arbitrarily delayed or skipped ticks cause no drift.
	pub fn tick(&mut self) -> f64 {
		if self.phase == Phase::Disposed {
			return 0.0;
		}

		self.repair_non_finite();

		if self.alpha < self.config.alpha_min {
			self.phase = Phase::Settled;
			return 0.0;
		}
		self.phase = Phase::Running;
		self.alpha -= self.alpha * self.config.alpha_decay;

		self.apply_link_force();
		self.apply_charge_force();
		self.apply_center_force();

		let mut moved = self.integrate();
		moved += self.apply_collisions();
		moved
	}

	/// A non-finite coordinate means an internal invariant broke; reset the
	/// offending node to the canvas center instead of letting the corruption
	/// spread through subsequent ticks.
	fn repair_non_finite(&mut self) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		for body in &mut self.bodies {
			if !(body.x.is_finite() && body.y.is_finite()) {
				log::warn!("layout: non-finite position, resetting node to center");
				body.x = cx;
				body.y = cy;
				body.vx = 0.0;
				body.vy = 0.0;
			}
			if !(body.vx.is_finite() && body.vy.is_finite()) {
				body.vx = 0.0;
				body.vy = 0.0;
			}
		}
	}

	fn apply_link_force(&mut self) {
		for link in &self.links {
			let (s, t) = (link.source, link.target);
			let dx = self.bodies[t].x - self.bodies[s].x;
			let dy = self.bodies[t].y - self.bodies[s].y;
			let dist = (dx * dx + dy * dy).sqrt().max(1e-6);

			// Hub nodes get a weaker spring so they do not over-constrain
			// their neighborhood.
			let min_degree = self.degree[s].min(self.degree[t]).max(1);
			let strength = link.weight / min_degree as f64;
			let pull = (dist - self.config.link_distance) / dist * strength * self.alpha;

			let (fx, fy) = (dx * pull * 0.5, dy * pull * 0.5);
			self.bodies[s].vx += fx;
			self.bodies[s].vy += fy;
			self.bodies[t].vx -= fx;
			self.bodies[t].vy -= fy;
		}
	}

	fn apply_charge_force(&mut self) {
		for i in 0..self.bodies.len() {
			for j in (i + 1)..self.bodies.len() {
				let dx = self.bodies[j].x - self.bodies[i].x;
				let dy = self.bodies[j].y - self.bodies[i].y;
				let dist2 = (dx * dx + dy * dy).max(1.0);
				let dist = dist2.sqrt();

				// Negative charge pushes the pair apart.
				let f = self.config.charge * self.alpha / dist2;
				let (fx, fy) = (dx / dist * f, dy / dist * f);
				self.bodies[i].vx += fx;
				self.bodies[i].vy += fy;
				self.bodies[j].vx -= fx;
				self.bodies[j].vy -= fy;
			}
		}
	}

	fn apply_center_force(&mut self) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let k = self.config.center_strength * self.alpha;
		for body in &mut self.bodies {
			body.vx += (cx - body.x) * k;
			body.vy += (cy - body.y) * k;
		}
	}

	fn integrate(&mut self) -> f64 {
		let mut moved = 0.0;
		for body in &mut self.bodies {
			if body.pinned {
				// Dragged nodes are driven by pin(); forces accumulated
				// above must not leak into the next free tick.
				body.vx = 0.0;
				body.vy = 0.0;
				continue;
			}
			body.vx *= self.config.velocity_decay;
			body.vy *= self.config.velocity_decay;
			body.x += body.vx;
			body.y += body.vy;
			moved += body.vx.hypot(body.vy);
		}
		moved
	}

	/// Enforce the hard separation floor. Two relaxation passes keep chains
	/// of touching nodes from re-overlapping after a single correction.
	fn apply_collisions(&mut self) -> f64 {
		let floor = self.config.collide_radius;
		let mut moved = 0.0;
		for _ in 0..2 {
			for i in 0..self.bodies.len() {
				for j in (i + 1)..self.bodies.len() {
					let dx = self.bodies[j].x - self.bodies[i].x;
					let dy = self.bodies[j].y - self.bodies[i].y;
					let dist = (dx * dx + dy * dy).sqrt();
					if dist >= floor {
						continue;
					}

					// Coincident centers get a deterministic push direction.
					let (ux, uy) = if dist > 1e-6 {
						(dx / dist, dy / dist)
					} else {
						let angle = (i * 31 + j * 17) as f64;
						(angle.cos(), angle.sin())
					};
					let overlap = floor - dist;

					match (self.bodies[i].pinned, self.bodies[j].pinned) {
						(true, true) => {}
						(true, false) => {
							self.bodies[j].x += ux * overlap;
							self.bodies[j].y += uy * overlap;
							moved += overlap;
						}
						(false, true) => {
							self.bodies[i].x -= ux * overlap;
							self.bodies[i].y -= uy * overlap;
							moved += overlap;
						}
						(false, false) => {
							let half = overlap / 2.0;
							self.bodies[i].x -= ux * half;
							self.bodies[i].y -= uy * half;
							self.bodies[j].x += ux * half;
							self.bodies[j].y += uy * half;
							moved += overlap;
						}
					}
				}
			}
		}
		moved
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chain(n: usize) -> Vec<LayoutLink> {
		(1..n)
			.map(|i| LayoutLink {
				source: i - 1,
				target: i,
				weight: 1.0,
			})
			.collect()
	}

	fn settle(sim: &mut ForceLayout, max_ticks: usize) -> (usize, f64) {
		let mut last = f64::MAX;
		for tick in 0..max_ticks {
			let moved = sim.tick();
			if sim.phase() == Phase::Settled {
				return (tick, last);
			}
			last = moved;
		}
		panic!("simulation did not settle within {max_ticks} ticks");
	}

	#[test]
	fn settles_within_bounded_ticks_with_small_final_displacement() {
		let mut sim = ForceLayout::new(5, &chain(5), 800.0, 600.0, LayoutConfig::default());
		assert_eq!(sim.phase(), Phase::Idle);

		let (ticks, final_displacement) = settle(&mut sim, 1000);
		assert!(ticks < 500, "took {ticks} ticks");
		assert!(
			final_displacement < 0.5,
			"still moving {final_displacement} per tick at settle"
		);
		// Once settled, further ticks are no-ops.
		assert_eq!(sim.tick(), 0.0);
		assert_eq!(sim.phase(), Phase::Settled);
	}

	#[test]
	fn no_two_nodes_closer_than_collision_floor_at_settle() {
		let config = LayoutConfig::default();
		let floor = config.collide_radius;
		let mut sim = ForceLayout::new(6, &chain(6), 800.0, 600.0, config);
		settle(&mut sim, 1000);

		let positions: Vec<(f64, f64)> = sim.positions().collect();
		for i in 0..positions.len() {
			for j in (i + 1)..positions.len() {
				let (dx, dy) = (
					positions[j].0 - positions[i].0,
					positions[j].1 - positions[i].1,
				);
				let dist = dx.hypot(dy);
				assert!(
					dist >= floor * 0.99,
					"nodes {i} and {j} only {dist:.2} apart"
				);
			}
		}
	}

	#[test]
	fn pinned_node_holds_the_supplied_position_each_tick() {
		let mut sim = ForceLayout::new(4, &chain(4), 800.0, 600.0, LayoutConfig::default());
		sim.pin(0, 50.0, 60.0);
		for _ in 0..20 {
			sim.tick();
			assert_eq!(sim.position(0), Some((50.0, 60.0)));
		}

		// After release it resumes integrating under forces.
		sim.unpin(0);
		sim.tick();
		let (x, y) = sim.position(0).unwrap();
		assert!((x, y) != (50.0, 60.0));
	}

	#[test]
	fn pin_wakes_a_settled_simulation() {
		let mut sim = ForceLayout::new(3, &chain(3), 800.0, 600.0, LayoutConfig::default());
		settle(&mut sim, 1000);
		assert_eq!(sim.phase(), Phase::Settled);

		sim.pin(1, 200.0, 200.0);
		assert_eq!(sim.phase(), Phase::Running);
		assert!(sim.alpha() >= 0.3);
		sim.unpin(1);
		assert!(sim.tick() > 0.0);
	}

	#[test]
	fn releasing_a_long_held_drag_rewakes_and_resolves_overlap() {
		let config = LayoutConfig::default();
		let floor = config.collide_radius;
		let mut sim = ForceLayout::new(3, &chain(3), 800.0, 600.0, config);

		// Hold one node motionless long enough for everything else to settle.
		sim.pin(0, 100.0, 100.0);
		for _ in 0..600 {
			sim.tick();
		}
		assert_eq!(sim.phase(), Phase::Settled);

		// Drop it almost on top of a neighbor, then release.
		let (x1, y1) = sim.position(1).unwrap();
		sim.pin(0, x1 + 1.0, y1);
		assert_eq!(sim.phase(), Phase::Running);
		sim.unpin(0);
		settle(&mut sim, 1000);

		let positions: Vec<(f64, f64)> = sim.positions().collect();
		for i in 0..positions.len() {
			for j in (i + 1)..positions.len() {
				let (dx, dy) = (
					positions[j].0 - positions[i].0,
					positions[j].1 - positions[i].1,
				);
				let dist = dx.hypot(dy);
				assert!(
					dist >= floor * 0.99,
					"nodes {i} and {j} only {dist:.2} apart after release"
				);
			}
		}
	}

	#[test]
	fn dispose_halts_ticking_and_mutation() {
		let mut sim = ForceLayout::new(3, &chain(3), 800.0, 600.0, LayoutConfig::default());
		sim.tick();
		let before: Vec<(f64, f64)> = sim.positions().collect();

		sim.dispose();
		assert_eq!(sim.tick(), 0.0);
		sim.pin(0, 1.0, 1.0);
		sim.wake();
		assert_eq!(sim.phase(), Phase::Disposed);
		let after: Vec<(f64, f64)> = sim.positions().collect();
		assert_eq!(before, after);
	}

	#[test]
	fn non_finite_position_resets_to_canvas_center() {
		let mut sim = ForceLayout::new(2, &chain(2), 800.0, 600.0, LayoutConfig::default());
		sim.pin(0, f64::NAN, f64::INFINITY);
		sim.unpin(0);
		sim.tick();
		let (x, y) = sim.position(0).unwrap();
		assert!(x.is_finite() && y.is_finite());
		// Repair happens before forces, so the node has only moved from the
		// center by one tick's worth of integration.
		assert!((x - 400.0).abs() < 50.0 && (y - 300.0).abs() < 50.0);
	}

	#[test]
	fn out_of_range_links_are_dropped() {
		let links = [
			LayoutLink {
				source: 0,
				target: 9,
				weight: 1.0,
			},
			LayoutLink {
				source: 0,
				target: 1,
				weight: 1.0,
			},
		];
		let sim = ForceLayout::new(2, &links, 800.0, 600.0, LayoutConfig::default());
		assert_eq!(sim.links.len(), 1);
		assert_eq!(sim.degree, vec![1, 1]);
	}

	#[test]
	fn connected_pairs_sit_near_the_link_distance() {
		let config = LayoutConfig::default();
		let target = config.link_distance;
		let mut sim = ForceLayout::new(2, &chain(2), 800.0, 600.0, config);
		settle(&mut sim, 1000);

		let p: Vec<(f64, f64)> = sim.positions().collect();
		let dist = (p[1].0 - p[0].0).hypot(p[1].1 - p[0].1);
		// Charge pushes slightly past the rest length; same order is enough.
		assert!(
			dist > target * 0.5 && dist < target * 3.0,
			"pair settled {dist:.1} apart"
		);
	}

	#[test]
	fn single_node_drifts_to_canvas_center() {
		let mut sim = ForceLayout::new(1, &[], 800.0, 600.0, LayoutConfig::default());
		settle(&mut sim, 1000);
		let (x, y) = sim.position(0).unwrap();
		assert!((x - 400.0).abs() < 20.0 && (y - 300.0).abs() < 20.0);
	}
}
