//! Visual theming for the radar chart and scatter plot.
//!
//! Provides the color type, the per-selection series palette, and the chart
//! style presets selectable from configuration.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors assigned to selection slots by their color index.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPalette {
	/// Colors in assignment order.
	pub colors: Vec<Color>,
}

impl SeriesPalette {
	/// Ten-color categorical palette (default)
	pub fn categorical() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
				Color::rgb(140, 86, 75),   // Brown
				Color::rgb(227, 119, 194), // Pink
				Color::rgb(127, 127, 127), // Gray
				Color::rgb(188, 189, 34),  // Olive
				Color::rgb(23, 190, 207),  // Cyan
			],
		}
	}

	/// Brighter variant for dark backgrounds
	pub fn neon() -> Self {
		Self {
			colors: vec![
				Color::rgb(97, 175, 239),  // Sky
				Color::rgb(255, 167, 38),  // Amber
				Color::rgb(102, 187, 106), // Leaf
				Color::rgb(239, 83, 80),   // Coral
				Color::rgb(186, 104, 200), // Orchid
				Color::rgb(255, 213, 79),  // Sun
				Color::rgb(77, 208, 225),  // Aqua
				Color::rgb(240, 98, 146),  // Rose
			],
		}
	}

	/// Color for series `index`, wrapping around.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Name used in config and the page's `data-theme`.
	pub name: &'static str,
	/// Canvas fill.
	pub background: Color,
	/// Spoke color
	pub axis: Color,
	/// Reference ring color
	pub level: Color,
	/// Axis label and annotation text
	pub text: Color,
	/// Canvas font for labels.
	pub font: &'static str,
	/// Polygon fill opacity
	pub fill_alpha: f64,
	/// Polygon stroke width in pixels
	pub stroke_width: f64,
	/// Scatter points that no selection refers to
	pub point: Color,
	/// Series colors.
	pub palette: SeriesPalette,
}

impl Theme {
	/// Light theme matching a plain page background (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(255, 255, 255),
			axis: Color::rgb(204, 204, 204),
			level: Color::rgb(221, 221, 221),
			text: Color::rgb(51, 51, 51),
			font: "12px sans-serif",
			fill_alpha: 0.3,
			stroke_width: 2.0,
			point: Color::rgba(120, 120, 120, 0.6),
			palette: SeriesPalette::categorical(),
		}
	}

	/// Dark theme
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: Color::rgb(22, 27, 34),
			axis: Color::rgba(140, 160, 180, 0.5),
			level: Color::rgba(140, 160, 180, 0.3),
			text: Color::rgb(220, 225, 230),
			font: "12px sans-serif",
			fill_alpha: 0.25,
			stroke_width: 2.0,
			point: Color::rgba(143, 163, 180, 0.6),
			palette: SeriesPalette::neon(),
		}
	}

	/// Look up a preset by name, falling back to the default.
	pub fn by_name(name: &str) -> Self {
		match name {
			"midnight" => Self::midnight(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(31, 119, 180).to_css(), "#1f77b4");
		assert_eq!(
			Color::rgb(31, 119, 180).with_alpha(0.3).to_css(),
			"rgba(31, 119, 180, 0.3)"
		);
	}

	#[test]
	fn palette_wraps_and_is_stable() {
		let palette = SeriesPalette::categorical();
		assert_eq!(palette.get(0), palette.get(10));
		assert_ne!(palette.get(0), palette.get(1));
	}

	#[test]
	fn theme_lookup() {
		assert_eq!(Theme::by_name("midnight").name, "midnight");
		assert_eq!(Theme::by_name("unknown").name, "default");
	}
}
