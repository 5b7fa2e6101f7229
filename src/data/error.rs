//! Error taxonomy for loading and projecting a dataset.

use thiserror::Error;

/// Failures raised by the data pipeline.
///
/// Ingestion errors (`MalformedInput`, `InvalidMetricValue`, `Read`) abort the
/// whole load. `EmbeddingUnavailable` only disables the planar view.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ChartError {
	/// The CSV cannot be read as a table with the expected columns.
	#[error("malformed input: {0}")]
	MalformedInput(String),
	/// A metric cell is not a number and the policy is strict.
	#[error("invalid value in metric column \"{column}\" (row {row})")]
	InvalidMetricValue {
		/// Header of the offending column.
		column: String,
		/// 1-based data row, header excluded.
		row: usize,
	},
	/// The planar layout could not be computed.
	#[error("planar projection unavailable: {0}")]
	EmbeddingUnavailable(String),
	/// The dataset text could not be fetched or read.
	#[error("failed to read dataset: {0}")]
	Read(String),
}

impl ChartError {
	/// Whether this error invalidates the whole dataset (as opposed to one view).
	pub fn is_fatal(&self) -> bool {
		!matches!(self, ChartError::EmbeddingUnavailable(_))
	}
}
