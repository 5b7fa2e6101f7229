//! Scatter plot scene and interaction tracking.
//!
//! The scene is a plain snapshot of the planar layout with per-point
//! highlight colors. The interaction state holds the pan/zoom transform and
//! the hovered point; it lives as long as the canvas does.

use crate::components::theme::{Color, SeriesPalette};
use crate::data::Selection;
use crate::pipeline::LoadedDataset;

/// One embedded record ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
	/// Embedding x.
	pub x: f64,
	/// Embedding y.
	pub y: f64,
	/// Record label shown on hover.
	pub label: String,
	/// Color of the first selection referring to this record, if any.
	pub highlight: Option<Color>,
}

/// What the scatter plot shows for the current dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterScene {
	/// One point per embedded record.
	pub points: Vec<ScatterPoint>,
	/// Why the planar view is disabled, when it is.
	pub unavailable: Option<String>,
}

impl ScatterScene {
	/// Snapshot of `dataset`'s planar layout with highlights for `selections`.
	pub fn build(
		dataset: Option<&LoadedDataset>,
		selections: &[Selection],
		palette: &SeriesPalette,
	) -> Self {
		let Some(dataset) = dataset else {
			return Self::default();
		};
		let planar = match &dataset.planar {
			Ok(points) => points,
			Err(e) => {
				return Self {
					points: Vec::new(),
					unavailable: Some(e.to_string()),
				};
			}
		};

		let points = planar
			.iter()
			.filter_map(|p| {
				let record = dataset.table.records.get(p.record)?;
				let highlight = selections
					.iter()
					.find(|s| s.matches_record(record))
					.map(|s| palette.get(s.color_index));
				Some(ScatterPoint {
					x: p.x,
					y: p.y,
					label: record.label.clone(),
					highlight,
				})
			})
			.collect();

		Self {
			points,
			unavailable: None,
		}
	}

	/// Bounding box `(min_x, min_y, max_x, max_y)` of all points.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		let first = self.points.first()?;
		Some(self.points.iter().fold(
			(first.x, first.y, first.x, first.y),
			|(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
		))
	}
}

/// Pan and zoom transform from embedding space to canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal offset in pixels.
	pub x: f64,
	/// Vertical offset in pixels.
	pub y: f64,
	/// Pixels per embedding unit.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	/// Centre `scene` in a `width`×`height` canvas, leaving `padding` pixels.
	pub fn fit(scene: &ScatterScene, width: f64, height: f64, padding: f64) -> Self {
		let Some((x0, y0, x1, y1)) = scene.bounds() else {
			return Self {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			};
		};
		let extent = (x1 - x0).max(y1 - y0);
		let usable = (width.min(height) - 2.0 * padding).max(1.0);
		let k = if extent > f64::EPSILON { usable / extent } else { 1.0 };
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		Self {
			x: width / 2.0 - cx * k,
			y: height / 2.0 - cy * k,
			k,
		}
	}

	/// Embedding coordinates to canvas pixels.
	pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
		(x * self.k + self.x, y * self.k + self.y)
	}

	/// Canvas pixels to embedding coordinates.
	pub fn to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a drag is in progress.
	pub active: bool,
	/// Cursor x at drag start.
	pub start_x: f64,
	/// Cursor y at drag start.
	pub start_y: f64,
	/// Transform x at drag start.
	pub transform_start_x: f64,
	/// Transform y at drag start.
	pub transform_start_y: f64,
}

/// Zoom limits relative to the fitted scale.
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

/// Interaction state for one scatter canvas.
#[derive(Clone, Debug, Default)]
pub struct ScatterState {
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Scale chosen by the last fit; zoom is clamped relative to it.
	fitted_k: f64,
	/// Drag in progress, if any.
	pub pan: PanState,
	/// Index into the scene's points under the cursor.
	pub hovered: Option<usize>,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Point positions the current view was fitted to.
	fitted_layout: Vec<(f64, f64)>,
}

fn layout_of(scene: &ScatterScene) -> Vec<(f64, f64)> {
	scene.points.iter().map(|p| (p.x, p.y)).collect()
}

impl ScatterState {
	/// State for a `width`×`height` canvas with an identity transform.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::default(),
			fitted_k: 1.0,
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			fitted_layout: Vec::new(),
		}
	}

	/// Reset the view so `scene` fills the canvas.
	pub fn fit(&mut self, scene: &ScatterScene, padding: f64) {
		self.transform = ViewTransform::fit(scene, self.width, self.height, padding);
		self.fitted_k = self.transform.k;
		self.hovered = None;
		self.fitted_layout = layout_of(scene);
	}

	/// Fit the view only if `scene` places its points differently from the
	/// last fit. Returns whether the view was reset.
	///
	/// A change of highlights alone keeps the current pan, zoom and hover.
	pub fn sync(&mut self, scene: &ScatterScene, padding: f64) -> bool {
		if layout_of(scene) == self.fitted_layout {
			return false;
		}
		self.fit(scene, padding);
		true
	}

	/// Index of the point under the cursor, within `hit_radius` pixels.
	pub fn point_at(&self, scene: &ScatterScene, sx: f64, sy: f64, hit_radius: f64) -> Option<usize> {
		scene
			.points
			.iter()
			.enumerate()
			.map(|(i, p)| {
				let (px, py) = self.transform.to_screen(p.x, p.y);
				(i, (px - sx).hypot(py - sy))
			})
			.filter(|&(_, d)| d < hit_radius)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	/// Start a drag at canvas position `(x, y)`.
	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	/// Move the view while panning. Returns whether anything changed.
	pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
		if !self.pan.active {
			return false;
		}
		self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		true
	}

	/// Finish a drag.
	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom by `factor` keeping the point under `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let base = if self.fitted_k > 0.0 { self.fitted_k } else { 1.0 };
		let new_k = (self.transform.k * factor).clamp(base * MIN_ZOOM, base * MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}
