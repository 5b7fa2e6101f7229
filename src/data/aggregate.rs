//! Per-category average profiles.

use std::collections::HashMap;

use super::table::Table;

/// Mean metric values of every record sharing one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryAggregate {
	/// Category name.
	pub category: String,
	/// Number of records averaged into this group.
	pub count: usize,
	/// Means aligned with [`Table::metric_names`].
	pub metrics: Vec<f64>,
}

/// All category aggregates of one table, in first-appearance order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregates {
	groups: Vec<CategoryAggregate>,
	index: HashMap<String, usize>,
}

impl Aggregates {
	/// Aggregate for `category`.
	pub fn get(&self, category: &str) -> Option<&CategoryAggregate> {
		self.index.get(category).map(|&i| &self.groups[i])
	}

	/// Groups in first-appearance order.
	pub fn iter(&self) -> impl Iterator<Item = &CategoryAggregate> {
		self.groups.iter()
	}

	/// Number of categories.
	pub fn len(&self) -> usize {
		self.groups.len()
	}

	/// Whether there are no categories.
	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}
}

/// Group records by exact category text and average each metric.
pub fn aggregate(table: &Table) -> Aggregates {
	let width = table.metric_count();
	let mut groups: Vec<CategoryAggregate> = Vec::new();
	let mut index: HashMap<String, usize> = HashMap::new();

	for record in &table.records {
		let slot = *index.entry(record.category.clone()).or_insert_with(|| {
			groups.push(CategoryAggregate {
				category: record.category.clone(),
				count: 0,
				metrics: vec![0.0; width],
			});
			groups.len() - 1
		});
		let group = &mut groups[slot];
		group.count += 1;
		for (sum, value) in group.metrics.iter_mut().zip(&record.metrics) {
			*sum += value;
		}
	}

	for group in &mut groups {
		let n = group.count as f64;
		for sum in &mut group.metrics {
			*sum /= n;
		}
	}

	Aggregates { groups, index }
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::data::table::{IngestOptions, Record, ingest};

	#[test]
	fn averages_worked_example() {
		let table = ingest(
			"Category,Item,Color,Body\nLager,Brand A,3,4\nLager,Brand B,5,2\nAle,Brand C,7,6\n",
			&IngestOptions::default(),
		)
		.unwrap();
		let aggregates = aggregate(&table);
		assert_eq!(aggregates.len(), 2);
		assert_eq!(aggregates.get("Lager").unwrap().metrics, vec![4.0, 3.0]);
		assert_eq!(aggregates.get("Lager").unwrap().count, 2);
		assert_eq!(aggregates.get("Ale").unwrap().metrics, vec![7.0, 6.0]);
		assert!(aggregates.get("Stout").is_none());

		let order: Vec<&str> = aggregates.iter().map(|g| g.category.as_str()).collect();
		assert_eq!(order, vec!["Lager", "Ale"]);
	}

	#[test]
	fn empty_table_has_no_groups() {
		assert!(aggregate(&Table::default()).is_empty());
	}

	fn table_from(rows: &[(u8, f64, f64)]) -> Table {
		Table {
			metric_names: vec!["a".into(), "b".into()],
			records: rows
				.iter()
				.enumerate()
				.map(|(i, &(cat, a, b))| Record {
					category: format!("c{cat}"),
					item: format!("i{i}"),
					label: format!("i{i} - c{cat}"),
					metrics: vec![a, b],
				})
				.collect(),
		}
	}

	proptest! {
		#[test]
		fn prop_order_independent(
			rows in prop::collection::vec((0u8..4, -1e3..1e3f64, 0.0..1e3f64), 1..40),
			seed in any::<u64>(),
		) {
			let forward = aggregate(&table_from(&rows));

			let mut shuffled = rows.clone();
			// Deterministic rotation + reversal is enough to change summation order.
			let k = (seed as usize) % shuffled.len();
			shuffled.rotate_left(k);
			shuffled.reverse();
			let permuted = aggregate(&table_from(&shuffled));

			prop_assert_eq!(forward.len(), permuted.len());
			for group in forward.iter() {
				let other = permuted.get(&group.category).unwrap();
				prop_assert_eq!(group.count, other.count);
				for (x, y) in group.metrics.iter().zip(&other.metrics) {
					prop_assert!((x - y).abs() < 1e-9 * x.abs().max(1.0));
				}
			}
		}
	}
}
