//! Pointer interaction state: pan/zoom viewport transform and drag tracking.
//!
//! Pure math, no DOM types. The canvas component translates browser events
//! into calls here; the transform is applied at render time only and never
//! mutates node positions or simulation internals.

/// Lower zoom bound for the viewport.
pub const MIN_ZOOM: f64 = 0.5;
/// Upper zoom bound for the viewport.
pub const MAX_ZOOM: f64 = 3.0;

/// Pointer travel under which a press/release pair counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
	/// Horizontal pan offset in screen pixels.
	pub x: f64,
	/// Vertical pan offset in screen pixels.
	pub y: f64,
	/// Uniform zoom factor, clamped to [`MIN_ZOOM`]..[`MAX_ZOOM`].
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Map screen coordinates to graph (world) coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zoom by `factor` keeping the world point under the cursor fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragState {
	/// Whether a drag is in progress.
	pub active: bool,
	/// The node being dragged.
	pub node: Option<usize>,
	/// Screen x where the press started.
	pub start_x: f64,
	/// Screen y where the press started.
	pub start_y: f64,
}

impl DragState {
	/// Record a press on `node` at the given screen position.
	pub fn begin(&mut self, node: usize, sx: f64, sy: f64) {
		self.active = true;
		self.node = Some(node);
		self.start_x = sx;
		self.start_y = sy;
	}

	/// Clear the drag.
	pub fn end(&mut self) {
		self.active = false;
		self.node = None;
	}

	/// True when the pointer has stayed within the click slop since press.
	pub fn is_click(&self, sx: f64, sy: f64) -> bool {
		(sx - self.start_x).hypot(sy - self.start_y) < CLICK_SLOP
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanState {
	/// Whether a pan is in progress.
	pub active: bool,
	/// Screen x where the press started.
	pub start_x: f64,
	/// Screen y where the press started.
	pub start_y: f64,
	/// Transform x at press time.
	pub transform_start_x: f64,
	/// Transform y at press time.
	pub transform_start_y: f64,
}

impl PanState {
	/// Record a press on empty canvas at the given screen position.
	pub fn begin(&mut self, sx: f64, sy: f64, transform: &ViewTransform) {
		self.active = true;
		self.start_x = sx;
		self.start_y = sy;
		self.transform_start_x = transform.x;
		self.transform_start_y = transform.y;
	}

	/// Offset the transform by the pointer travel since the press.
	pub fn apply(&self, sx: f64, sy: f64, transform: &mut ViewTransform) {
		transform.x = self.transform_start_x + (sx - self.start_x);
		transform.y = self.transform_start_y + (sy - self.start_y);
	}

	/// Clear the pan.
	pub fn end(&mut self) {
		self.active = false;
	}
}

/// Clamp pointer coordinates to the canvas extent. Out-of-bounds or
/// malformed (non-finite) coordinates never propagate further in.
pub fn clamp_to_canvas(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
	let cx = if x.is_finite() {
		x.clamp(0.0, width)
	} else {
		width / 2.0
	};
	let cy = if y.is_finite() {
		y.clamp(0.0, height)
	} else {
		height / 2.0
	};
	(cx, cy)
}
