//! Radar chart geometry: axes, reference rings and data polygons.
//!
//! All coordinates are offsets from the chart centre in pixels, already
//! rotated so the first axis points up.

use super::scale::{AxisScale, LABEL_FACTOR, axis_angle, polar_to_cartesian};
use crate::components::theme::{Color, SeriesPalette};
use crate::data::{Selection, resolve};
use crate::pipeline::LoadedDataset;

/// One axis line from the centre to the chart radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Spoke {
	/// Metric name shown at the end of the spoke.
	pub name: String,
	/// Spoke angle in radians, clockwise from twelve o'clock.
	pub angle: f64,
	/// Spoke tip as a centre offset.
	pub end: (f64, f64),
	/// Label anchor, just beyond the end of the spoke.
	pub label_at: (f64, f64),
}

/// Static chart background for one dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseGeometry {
	/// One spoke per metric, in column order.
	pub spokes: Vec<Spoke>,
	/// Ring radii in pixels, innermost first.
	pub rings: Vec<f64>,
	/// Metric value each ring represents.
	pub ring_values: Vec<f64>,
}

impl BaseGeometry {
	/// Spokes, labels and reference rings for `metric_names` under `scale`.
	pub fn build(metric_names: &[String], scale: &AxisScale) -> Self {
		if metric_names.is_empty() {
			return Self::default();
		}
		let n = metric_names.len();
		let radius = scale.radius();
		let spokes = metric_names
			.iter()
			.enumerate()
			.map(|(i, name)| {
				let angle = axis_angle(i, n);
				Spoke {
					name: name.clone(),
					angle,
					end: polar_to_cartesian(angle, radius),
					label_at: polar_to_cartesian(angle, radius * LABEL_FACTOR),
				}
			})
			.collect();
		let ring_values = scale.level_values();
		let rings = ring_values.iter().map(|&v| scale.apply(v)).collect();

		Self {
			spokes,
			rings,
			ring_values,
		}
	}
}

/// A single `(angle, radius)` vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPoint {
	/// Radians, clockwise from twelve o'clock.
	pub angle: f64,
	/// Pixels from the centre.
	pub radius: f64,
}

/// Implicitly closed polygon for one metric vector. Renderers connect the
/// last vertex back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialPolygon {
	/// One vertex per axis, in axis order.
	pub points: Vec<PolarPoint>,
}

impl RadialPolygon {
	/// Vertices as centre offsets.
	pub fn cartesian(&self) -> Vec<(f64, f64)> {
		self.points
			.iter()
			.map(|p| polar_to_cartesian(p.angle, p.radius))
			.collect()
	}
}

/// Project a metric vector (in axis order) onto the radar axes.
///
/// Returns `None` when there are no axes. A value that is absent or not
/// finite is drawn at radius 0.
pub fn project_radial(values: &[f64], metric_count: usize, scale: &AxisScale) -> Option<RadialPolygon> {
	if metric_count == 0 {
		return None;
	}
	let points = (0..metric_count)
		.map(|i| {
			let radius = values
				.get(i)
				.copied()
				.filter(|v| v.is_finite())
				.map_or(0.0, |v| scale.apply(v));
			PolarPoint {
				angle: axis_angle(i, metric_count),
				radius,
			}
		})
		.collect();
	Some(RadialPolygon { points })
}

/// A polygon with the color of the selection it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPolygon {
	/// Slot the polygon belongs to.
	pub color_index: usize,
	/// Stroke color; the fill uses the theme's alpha.
	pub color: Color,
	/// Selection key, for legends.
	pub label: String,
	/// Geometry to draw.
	pub polygon: RadialPolygon,
}

/// Everything the radar renderer draws for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadarScene {
	/// Axes and rings.
	pub base: BaseGeometry,
	/// Polygons in selection order.
	pub series: Vec<SeriesPolygon>,
}

impl RadarScene {
	/// Base geometry for `dataset` plus one polygon per resolvable selection.
	/// Unresolvable selections contribute nothing.
	pub fn build(
		dataset: Option<&LoadedDataset>,
		selections: &[Selection],
		palette: &SeriesPalette,
	) -> Self {
		let Some(dataset) = dataset else {
			return Self::default();
		};
		let table = &dataset.table;
		let base = BaseGeometry::build(&table.metric_names, &dataset.scale);

		let series = selections
			.iter()
			.filter_map(|selection| {
				let values = resolve(selection, table, &dataset.aggregates)?;
				let polygon = project_radial(values, table.metric_count(), &dataset.scale)?;
				Some(SeriesPolygon {
					color_index: selection.color_index,
					color: palette.get(selection.color_index),
					label: selection.key.clone().unwrap_or_default(),
					polygon,
				})
			})
			.collect();

		Self { base, series }
	}
}
