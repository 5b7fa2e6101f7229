//! Radial scale and polar coordinate helpers for the radar chart.
//!
//! # Coordinate conventions
//!
//! - **Angle**: axis `i` of `n` sits at `i * 2π / n`. Angle 0 points up
//!   (12 o'clock) and angles grow clockwise on screen.
//! - **Radius**: metric values map linearly from `[0, max_value]` onto
//!   `[0, radius]`, where `max_value` is the ceiling of the largest value in
//!   the table. Every polygon of a dataset shares one scale, so shapes are
//!   comparable.

use std::f64::consts::PI;

use crate::data::Table;

/// Upper bound on the number of reference rings.
pub const MAX_LEVELS: usize = 7;

/// Label distance from the centre, as a multiple of the chart radius.
pub const LABEL_FACTOR: f64 = 1.1;

/// Linear mapping from metric value to on-screen radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScale {
	max_value: f64,
	radius: f64,
}

impl AxisScale {
	/// Scale with domain `[0, ceil(max_value)]` and range `[0, radius]`.
	/// Negative or non-finite maxima collapse the domain to `[0, 0]`.
	pub fn new(max_value: f64, radius: f64) -> Self {
		let max_value = if max_value.is_finite() {
			max_value.max(0.0).ceil()
		} else {
			0.0
		};
		Self { max_value, radius }
	}

	/// Scale fitted to every metric value in `table`.
	pub fn for_table(table: &Table, radius: f64) -> Self {
		Self::new(table.max_metric_value().unwrap_or(0.0), radius)
	}

	/// Upper end of the value domain.
	pub fn max_value(&self) -> f64 {
		self.max_value
	}

	/// Upper end of the radius range.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Map a metric value to a radius. A zero-width domain maps to 0.
	pub fn apply(&self, value: f64) -> f64 {
		if self.max_value <= 0.0 {
			return 0.0;
		}
		value / self.max_value * self.radius
	}

	/// Number of reference rings: `min(ceil(max_value), 7)`.
	pub fn level_count(&self) -> usize {
		(self.max_value.ceil() as usize).min(MAX_LEVELS)
	}

	/// Evenly spaced ring values from the first step up to `max_value`.
	pub fn level_values(&self) -> Vec<f64> {
		let levels = self.level_count();
		(1..=levels)
			.map(|d| d as f64 * self.max_value / levels as f64)
			.collect()
	}
}

/// Angle of axis `index` out of `count` axes.
pub fn axis_angle(index: usize, count: usize) -> f64 {
	if count == 0 {
		return 0.0;
	}
	index as f64 * (2.0 * PI / count as f64)
}

/// Convert a chart angle and radius into screen offsets from the centre,
/// with angle 0 at 12 o'clock.
pub fn polar_to_cartesian(angle: f64, radius: f64) -> (f64, f64) {
	let theta = angle - PI / 2.0;
	(radius * theta.cos(), radius * theta.sin())
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	const EPS: f64 = 1e-9;

	#[test]
	fn domain_is_ceiling_of_max() {
		let scale = AxisScale::new(6.2, 190.0);
		assert_eq!(scale.max_value(), 7.0);
		assert_eq!(scale.apply(0.0), 0.0);
		assert!((scale.apply(7.0) - 190.0).abs() < EPS);
		assert!((scale.apply(3.5) - 95.0).abs() < EPS);
	}

	#[test]
	fn degenerate_domain_maps_to_zero() {
		let scale = AxisScale::new(0.0, 190.0);
		assert_eq!(scale.apply(5.0), 0.0);
		assert_eq!(scale.level_count(), 0);
		assert!(scale.level_values().is_empty());
		assert_eq!(AxisScale::new(-3.0, 10.0).max_value(), 0.0);
		assert_eq!(AxisScale::new(f64::NAN, 10.0).max_value(), 0.0);
	}

	#[test]
	fn levels_are_capped_at_seven() {
		let small = AxisScale::new(5.0, 100.0);
		assert_eq!(small.level_values(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);

		let large = AxisScale::new(70.0, 100.0);
		assert_eq!(large.level_count(), 7);
		assert_eq!(large.level_values(), vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
	}

	#[test]
	fn first_axis_points_up_then_clockwise() {
		let (x, y) = polar_to_cartesian(axis_angle(0, 4), 10.0);
		assert!(x.abs() < EPS && (y + 10.0).abs() < EPS);

		let (x, y) = polar_to_cartesian(axis_angle(1, 4), 10.0);
		assert!((x - 10.0).abs() < EPS && y.abs() < EPS);
	}

	#[test]
	fn axis_spacing_is_uniform() {
		for n in 1..12 {
			for i in 0..n {
				let step = axis_angle(i + 1, n) - axis_angle(i, n);
				assert!((step - 2.0 * PI / n as f64).abs() < EPS);
			}
		}
		assert_eq!(axis_angle(3, 0), 0.0);
	}

	proptest! {
		#[test]
		fn prop_scale_monotonic(max in 0.1..1e4f64, a in 0.0..1e4f64, b in 0.0..1e4f64) {
			let scale = AxisScale::new(max, 250.0);
			let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
			prop_assert!(scale.apply(lo) <= scale.apply(hi));
			prop_assert!((scale.apply(scale.max_value()) - 250.0).abs() < EPS);
			prop_assert_eq!(scale.apply(0.0), 0.0);
		}
	}
}
