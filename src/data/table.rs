//! CSV ingestion into an in-memory table.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use serde::Deserialize;

use super::error::ChartError;
use super::schema::{Schema, SchemaConfig};

/// How non-numeric metric cells are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestPolicy {
	/// Any non-numeric metric cell fails the whole load.
	#[default]
	Strict,
	/// Non-numeric cells are kept as NaN and drawn as missing.
	Lenient,
}

/// Options for a single ingestion pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestOptions {
	/// Strict or lenient cell handling.
	pub policy: IngestPolicy,
	/// Column roles.
	pub schema: SchemaConfig,
}

/// One input row.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
	/// Category column value.
	pub category: String,
	/// Item column value.
	pub item: String,
	/// Display and selection key: `"{item} - {category}"`.
	pub label: String,
	/// Metric values aligned with [`Table::metric_names`].
	pub metrics: Vec<f64>,
}

impl Record {
	fn new(category: String, item: String, metrics: Vec<f64>) -> Self {
		let label = format!("{item} - {category}");
		Self {
			category,
			item,
			label,
			metrics,
		}
	}
}

/// A fully ingested dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
	/// Metric column names in header order.
	pub metric_names: Vec<String>,
	/// Rows in file order.
	pub records: Vec<Record>,
}

impl Table {
	/// Number of metric axes.
	pub fn metric_count(&self) -> usize {
		self.metric_names.len()
	}

	/// Position of a metric in axis order.
	pub fn metric_index(&self, name: &str) -> Option<usize> {
		self.metric_names.iter().position(|m| m == name)
	}

	/// First record carrying `label`. Labels are not guaranteed unique.
	pub fn find_by_label(&self, label: &str) -> Option<&Record> {
		self.records.iter().find(|r| r.label == label)
	}

	/// Largest finite metric value in the table, if any.
	pub fn max_metric_value(&self) -> Option<f64> {
		self.records
			.iter()
			.flat_map(|r| r.metrics.iter().copied())
			.filter(|v| v.is_finite())
			.fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
	}

	/// Row-major metric matrix, one row per record in record order.
	pub fn matrix(&self) -> Vec<Vec<f64>> {
		self.records.iter().map(|r| r.metrics.clone()).collect()
	}
}

/// Coerce a cell the way a browser's unary `+` would: blank is zero,
/// anything unparsable or non-finite is NaN.
fn coerce_cell(cell: &str) -> f64 {
	let trimmed = cell.trim();
	if trimmed.is_empty() {
		return 0.0;
	}
	match trimmed.parse::<f64>() {
		Ok(v) if v.is_finite() => v,
		_ => f64::NAN,
	}
}

fn build_record(
	row: usize,
	record: &StringRecord,
	schema: &Schema,
	policy: IngestPolicy,
) -> Result<Record, ChartError> {
	let cell = |idx: usize| record.get(idx).unwrap_or("");

	let mut metrics = Vec::with_capacity(schema.metric_columns.len());
	for (&col, name) in schema.metric_columns.iter().zip(&schema.metric_names) {
		let value = coerce_cell(cell(col));
		if value.is_nan() && policy == IngestPolicy::Strict {
			return Err(ChartError::InvalidMetricValue {
				column: name.clone(),
				row,
			});
		}
		metrics.push(value);
	}

	Ok(Record::new(
		cell(schema.category_column).to_string(),
		cell(schema.item_column).to_string(),
		metrics,
	))
}

/// Parse CSV text into a [`Table`].
///
/// No partial table is ever returned: the first malformed header or invalid
/// metric cell (under [`IngestPolicy::Strict`]) aborts the whole pass.
pub fn ingest(text: &str, options: &IngestOptions) -> Result<Table, ChartError> {
	let mut reader = ReaderBuilder::new()
		.has_headers(true)
		.trim(Trim::All)
		.flexible(true)
		.from_reader(text.as_bytes());

	let headers: Vec<String> = reader
		.headers()
		.map_err(|e| ChartError::MalformedInput(format!("failed to read CSV headers: {e}")))?
		.iter()
		.map(str::to_string)
		.collect();

	let schema = options.schema.resolve(&headers)?;
	debug!(
		"radar-compare: schema category={} item={} metrics={:?}",
		schema.category_column, schema.item_column, schema.metric_names
	);

	let mut records = Vec::new();
	for (i, result) in reader.records().enumerate() {
		// Row numbers are 1-based data rows, header excluded.
		let row = i + 1;
		let record = result.map_err(|e| {
			ChartError::MalformedInput(format!("failed to parse CSV row {row}: {e}"))
		})?;
		records.push(build_record(row, &record, &schema, options.policy)?);
	}

	info!(
		"radar-compare: ingested {} records across {} metrics",
		records.len(),
		schema.metric_names.len()
	);

	Ok(Table {
		metric_names: schema.metric_names,
		records,
	})
}
