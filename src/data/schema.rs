//! Column role assignment.
//!
//! Roles are positional: by default column 0 names the category, column 1 the
//! item, and every remaining column is a metric in header order. Header order
//! is axis order on the radar chart, so metric columns are kept as a sequence.

use serde::Deserialize;

use super::error::ChartError;

/// Minimum header width: category, item and at least one metric.
pub const MIN_COLUMNS: usize = 3;

/// Caller-supplied column roles.
///
/// Datasets whose identity columns are swapped configure that here instead
/// of the loader sniffing dataset names.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaConfig {
	/// Column holding the category.
	pub category_column: usize,
	/// Column holding the item name.
	pub item_column: usize,
	/// Explicit metric columns in axis order. `None` means "all other columns".
	pub metric_columns: Option<Vec<usize>>,
}

impl Default for SchemaConfig {
	fn default() -> Self {
		Self {
			category_column: 0,
			item_column: 1,
			metric_columns: None,
		}
	}
}

/// Resolved column roles for one header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
	/// Category column index.
	pub category_column: usize,
	/// Item column index.
	pub item_column: usize,
	/// Metric column indices, in header order.
	pub metric_columns: Vec<usize>,
	/// Header names of the metric columns.
	pub metric_names: Vec<String>,
}

impl SchemaConfig {
	/// Validate this configuration against `headers` and resolve metric names.
	pub fn resolve(&self, headers: &[String]) -> Result<Schema, ChartError> {
		if headers.len() < MIN_COLUMNS {
			return Err(ChartError::MalformedInput(format!(
				"expected at least {MIN_COLUMNS} columns (category, item, metrics), found {}",
				headers.len()
			)));
		}

		let width = headers.len();
		for (role, idx) in [
			("category", self.category_column),
			("item", self.item_column),
		] {
			if idx >= width {
				return Err(ChartError::MalformedInput(format!(
					"{role} column {idx} is out of range for {width} columns"
				)));
			}
		}
		if self.category_column == self.item_column {
			return Err(ChartError::MalformedInput(
				"category and item must be different columns".into(),
			));
		}

		let metric_columns: Vec<usize> = match &self.metric_columns {
			Some(cols) => cols.clone(),
			None => (0..width)
				.filter(|&i| i != self.category_column && i != self.item_column)
				.collect(),
		};

		if metric_columns.is_empty() {
			return Err(ChartError::MalformedInput("no metric columns".into()));
		}
		for &idx in &metric_columns {
			if idx >= width {
				return Err(ChartError::MalformedInput(format!(
					"metric column {idx} is out of range for {width} columns"
				)));
			}
			if idx == self.category_column || idx == self.item_column {
				return Err(ChartError::MalformedInput(format!(
					"column \"{}\" cannot be both an identity column and a metric",
					headers[idx]
				)));
			}
		}

		let metric_names = metric_columns.iter().map(|&i| headers[i].clone()).collect();

		Ok(Schema {
			category_column: self.category_column,
			item_column: self.item_column,
			metric_columns,
			metric_names,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn headers(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn positional_roles_keep_header_order() {
		let schema = SchemaConfig::default()
			.resolve(&headers(&["Style", "Beer", "Hops", "Malt", "Body"]))
			.unwrap();
		assert_eq!(schema.category_column, 0);
		assert_eq!(schema.item_column, 1);
		assert_eq!(schema.metric_columns, vec![2, 3, 4]);
		assert_eq!(schema.metric_names, vec!["Hops", "Malt", "Body"]);
	}

	#[test]
	fn two_columns_is_malformed() {
		let err = SchemaConfig::default()
			.resolve(&headers(&["Category", "Item"]))
			.unwrap_err();
		assert!(matches!(err, ChartError::MalformedInput(_)));
	}

	#[test]
	fn swapped_identity_columns() {
		let config = SchemaConfig {
			category_column: 1,
			item_column: 0,
			metric_columns: None,
		};
		let schema = config
			.resolve(&headers(&["Flavor", "Brand", "Sweet", "Creamy"]))
			.unwrap();
		assert_eq!(schema.metric_names, vec!["Sweet", "Creamy"]);
		assert_eq!(schema.category_column, 1);
	}

	#[test]
	fn explicit_metric_subset_in_given_order() {
		let config = SchemaConfig {
			metric_columns: Some(vec![4, 2]),
			..SchemaConfig::default()
		};
		let schema = config
			.resolve(&headers(&["C", "I", "A", "B", "D"]))
			.unwrap();
		assert_eq!(schema.metric_names, vec!["D", "A"]);
	}

	#[test]
	fn rejects_overlapping_and_out_of_range_columns() {
		let h = headers(&["C", "I", "A"]);
		let overlap = SchemaConfig {
			metric_columns: Some(vec![0, 2]),
			..SchemaConfig::default()
		};
		assert!(matches!(
			overlap.resolve(&h),
			Err(ChartError::MalformedInput(_))
		));

		let out_of_range = SchemaConfig {
			item_column: 7,
			..SchemaConfig::default()
		};
		assert!(matches!(
			out_of_range.resolve(&h),
			Err(ChartError::MalformedInput(_))
		));

		let empty = SchemaConfig {
			metric_columns: Some(Vec::new()),
			..SchemaConfig::default()
		};
		assert!(matches!(empty.resolve(&h), Err(ChartError::MalformedInput(_))));
	}

	#[test]
	fn deserializes_camel_case_override() {
		let config: SchemaConfig =
			serde_json::from_str(r#"{ "categoryColumn": 1, "itemColumn": 0 }"#).unwrap();
		assert_eq!(config.category_column, 1);
		assert_eq!(config.item_column, 0);
		assert_eq!(config.metric_columns, None);
	}
}
