//! Turns raw CSV text into everything the views need.

use log::{info, warn};

use crate::components::radar_chart::scale::AxisScale;
use crate::data::{Aggregates, ChartError, IngestOptions, Table, aggregate, ingest};
use crate::embedding::{Embedder, PlanarPoint, project_planar};

/// A successfully ingested dataset with its derived values.
///
/// Built once per load and never mutated; a new load replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedDataset {
	/// Display name (bundled dataset name or uploaded file name).
	pub source: String,
	/// Ingested rows.
	pub table: Table,
	/// Per-category means.
	pub aggregates: Aggregates,
	/// Shared radial scale.
	pub scale: AxisScale,
	/// Planar layout, or the reason the planar view is disabled.
	pub planar: Result<Vec<PlanarPoint>, ChartError>,
}

impl LoadedDataset {
	/// Run ingestion, aggregation, scaling and planar projection.
	///
	/// Ingestion errors abort and are returned; an embedding failure is kept in
	/// [`LoadedDataset::planar`] so the radar view stays usable.
	pub fn build(
		source: impl Into<String>,
		text: &str,
		options: &IngestOptions,
		embedder: &dyn Embedder,
		radius: f64,
	) -> Result<Self, ChartError> {
		let source = source.into();
		let table = ingest(text, options)?;
		let aggregates = aggregate(&table);
		let scale = AxisScale::for_table(&table, radius);

		let planar = project_planar(&table, embedder);
		if let Err(e) = &planar {
			warn!("radar-compare: {source}: {e}");
		}

		info!(
			"radar-compare: loaded {source}: {} records, {} categories, scale max {}",
			table.records.len(),
			aggregates.len(),
			scale.max_value()
		);

		Ok(Self {
			source,
			table,
			aggregates,
			scale,
			planar,
		})
	}

	/// Planar points when the planar view is available.
	pub fn planar_points(&self) -> Option<&[PlanarPoint]> {
		self.planar.as_deref().ok()
	}
}
