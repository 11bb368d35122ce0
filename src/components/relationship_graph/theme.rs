//! Visual theming for the relationship graph.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color from RGB channels plus opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Node fills keyed by kind.
#[derive(Clone, Debug)]
pub struct KindPalette {
	/// The investigated object; the visual anchor.
	pub object: Color,
	/// People and institutions.
	pub actor: Color,
	/// Locations.
	pub place: Color,
}

/// Edge strokes keyed by policy-review status.
#[derive(Clone, Debug)]
pub struct PolicyPalette {
	/// Edges falling in the Nazi-era window.
	pub nazi: Color,
	/// Edges falling under the 1970 UNESCO convention.
	pub unesco: Color,
	/// Everything else.
	pub normal: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Node fills.
	pub kinds: KindPalette,
	/// Edge strokes.
	pub policies: PolicyPalette,
	/// Whether nodes have inner gradients.
	pub node_gradient: bool,
	/// Node label text color.
	pub label_color: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			kinds: KindPalette {
				object: Color::rgb(214, 167, 86),  // Amber
				actor: Color::rgb(94, 129, 172),   // Steel blue
				place: Color::rgb(106, 153, 120),  // Moss green
			},
			policies: PolicyPalette {
				nazi: Color::rgba(198, 70, 70, 0.8),    // Crimson
				unesco: Color::rgba(206, 150, 72, 0.8), // Ochre
				normal: Color::rgba(140, 160, 180, 0.5),
			},
			node_gradient: true,
			label_color: Color::rgba(255, 255, 255, 0.85),
		}
	}
}
