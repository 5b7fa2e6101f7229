//! Planar (2-D) projection of every record for similarity exploration.
//!
//! The layout algorithm sits behind the [`Embedder`] trait; this module only
//! shapes the table into a matrix, configures the call, and checks that the
//! result is a row-aligned point cloud.

mod force_layout;

pub use force_layout::ForceLayoutEmbedder;

use log::debug;

use crate::data::{ChartError, Table};

/// Upper bound on the neighbour count handed to the embedder.
pub const MAX_NEIGHBORS: usize = 15;

/// Parameters for a nearest-neighbour embedding.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddingConfig {
	/// Neighbours linked per point.
	pub neighbors: usize,
	/// Smallest spacing between embedded points.
	pub min_distance: f64,
	/// Output dimensions; only 2 is drawn.
	pub output_dims: usize,
	/// Half-extent of the normalised output.
	pub spread: f64,
}

impl EmbeddingConfig {
	/// Standard configuration for a matrix with `rows` rows.
	pub fn for_rows(rows: usize) -> Self {
		Self {
			neighbors: MAX_NEIGHBORS.min(rows.saturating_sub(1)),
			min_distance: 0.1,
			output_dims: 2,
			spread: 1.0,
		}
	}
}

/// A dimensionality-reduction routine.
///
/// `fit` must return one row of `config.output_dims` values per input row,
/// in input order, or fail.
pub trait Embedder {
	/// Embed `matrix` (one row per record) into `config.output_dims` columns.
	fn fit(&self, matrix: &[Vec<f64>], config: &EmbeddingConfig) -> Result<Vec<Vec<f64>>, ChartError>;
}

/// One embedded record.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarPoint {
	/// Planar x.
	pub x: f64,
	/// Planar y.
	pub y: f64,
	/// Index into [`Table::records`].
	pub record: usize,
}

/// Embed every record of `table` into the plane.
///
/// Any failure, whether raised by the embedder or found while checking its
/// output, is reported as [`ChartError::EmbeddingUnavailable`].
pub fn project_planar(table: &Table, embedder: &dyn Embedder) -> Result<Vec<PlanarPoint>, ChartError> {
	let matrix = table.matrix();
	if matrix.is_empty() {
		return Err(ChartError::EmbeddingUnavailable("dataset has no records".into()));
	}

	let config = EmbeddingConfig::for_rows(matrix.len());
	debug!(
		"radar-compare: embedding {}x{} matrix with {} neighbors",
		matrix.len(),
		table.metric_count(),
		config.neighbors
	);

	let output = embedder.fit(&matrix, &config).map_err(|e| match e {
		ChartError::EmbeddingUnavailable(reason) => ChartError::EmbeddingUnavailable(reason),
		other => ChartError::EmbeddingUnavailable(other.to_string()),
	})?;

	if output.len() != matrix.len() {
		return Err(ChartError::EmbeddingUnavailable(format!(
			"embedder returned {} rows for {} records",
			output.len(),
			matrix.len()
		)));
	}

	output
		.iter()
		.enumerate()
		.map(|(record, row)| match row.as_slice() {
			[x, y] if x.is_finite() && y.is_finite() => Ok(PlanarPoint {
				x: *x,
				y: *y,
				record,
			}),
			_ => Err(ChartError::EmbeddingUnavailable(format!(
				"row {record} is not a finite 2-D point"
			))),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::data::{IngestOptions, ingest};

	/// Records the configuration it was called with and echoes the first two
	/// metrics back as coordinates.
	#[derive(Default)]
	struct EchoEmbedder {
		seen: RefCell<Option<EmbeddingConfig>>,
	}

	impl Embedder for EchoEmbedder {
		fn fit(&self, matrix: &[Vec<f64>], config: &EmbeddingConfig) -> Result<Vec<Vec<f64>>, ChartError> {
			*self.seen.borrow_mut() = Some(config.clone());
			Ok(matrix.iter().map(|row| vec![row[0], row[1]]).collect())
		}
	}

	struct FailingEmbedder;

	impl Embedder for FailingEmbedder {
		fn fit(&self, _: &[Vec<f64>], _: &EmbeddingConfig) -> Result<Vec<Vec<f64>>, ChartError> {
			Err(ChartError::MalformedInput("too small".into()))
		}
	}

	struct ShortEmbedder;

	impl Embedder for ShortEmbedder {
		fn fit(&self, _: &[Vec<f64>], _: &EmbeddingConfig) -> Result<Vec<Vec<f64>>, ChartError> {
			Ok(vec![vec![0.0, 0.0]])
		}
	}

	fn beer() -> Table {
		ingest(
			"Category,Item,Color,Body\nLager,Brand A,3,4\nLager,Brand B,5,2\nAle,Brand C,7,6\n",
			&IngestOptions::default(),
		)
		.unwrap()
	}

	#[test]
	fn config_caps_neighbors() {
		assert_eq!(EmbeddingConfig::for_rows(100).neighbors, 15);
		assert_eq!(EmbeddingConfig::for_rows(3).neighbors, 2);
		assert_eq!(EmbeddingConfig::for_rows(0).neighbors, 0);
		let config = EmbeddingConfig::for_rows(16);
		assert_eq!(config.neighbors, 15);
		assert_eq!(config.min_distance, 0.1);
		assert_eq!(config.output_dims, 2);
		assert_eq!(config.spread, 1.0);
	}

	#[test]
	fn points_are_row_aligned() {
		let embedder = EchoEmbedder::default();
		let points = project_planar(&beer(), &embedder).unwrap();
		assert_eq!(points.len(), 3);
		assert_eq!(points[2], PlanarPoint { x: 7.0, y: 6.0, record: 2 });
		assert_eq!(embedder.seen.borrow().as_ref().map(|c| c.neighbors), Some(2));
	}

	#[test]
	fn embedder_failure_becomes_unavailable() {
		let err = project_planar(&beer(), &FailingEmbedder).unwrap_err();
		assert!(matches!(err, ChartError::EmbeddingUnavailable(_)));
		assert!(!err.is_fatal());
	}

	#[test]
	fn misaligned_output_is_rejected() {
		let err = project_planar(&beer(), &ShortEmbedder).unwrap_err();
		assert!(matches!(err, ChartError::EmbeddingUnavailable(_)));
	}

	#[test]
	fn empty_table_is_unavailable() {
		let err = project_planar(&Table::default(), &EchoEmbedder::default()).unwrap_err();
		assert!(matches!(err, ChartError::EmbeddingUnavailable(_)));
	}
}
