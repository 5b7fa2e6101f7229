//! User selections and their resolution against the current table.

use super::aggregate::Aggregates;
use super::table::{Record, Table};

/// What a selection slot refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
	/// A single record, keyed by its label.
	#[default]
	Individual,
	/// A category average, keyed by category name.
	Category,
}

impl SelectionMode {
	/// Value used in the mode drop-down.
	pub fn as_str(self) -> &'static str {
		match self {
			SelectionMode::Individual => "individual",
			SelectionMode::Category => "category",
		}
	}

	/// Inverse of [`SelectionMode::as_str`].
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"individual" => Some(SelectionMode::Individual),
			"category" => Some(SelectionMode::Category),
			_ => None,
		}
	}
}

/// One comparison slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
	/// What `key` refers to.
	pub mode: SelectionMode,
	/// `None` while the slot is set to "None".
	pub key: Option<String>,
	/// Stable per-slot color; also identifies the slot.
	pub color_index: usize,
}

impl Selection {
	/// Empty slot with the given mode and color.
	pub fn new(mode: SelectionMode, color_index: usize) -> Self {
		Self {
			mode,
			key: None,
			color_index,
		}
	}

	/// Whether `record` is the subject of this selection, or belongs to the
	/// selected category.
	pub fn matches_record(&self, record: &Record) -> bool {
		match (&self.key, self.mode) {
			(Some(key), SelectionMode::Individual) => record.label == *key,
			(Some(key), SelectionMode::Category) => record.category == *key,
			(None, _) => false,
		}
	}
}

/// Metric vector a selection refers to, if it still exists in `table`.
///
/// A key that no longer resolves (for instance after loading another
/// dataset) is treated as an empty slot.
pub fn resolve<'a>(
	selection: &Selection,
	table: &'a Table,
	aggregates: &'a Aggregates,
) -> Option<&'a [f64]> {
	let key = selection.key.as_deref()?;
	match selection.mode {
		SelectionMode::Individual => table.find_by_label(key).map(|r| r.metrics.as_slice()),
		SelectionMode::Category => aggregates.get(key).map(|g| g.metrics.as_slice()),
	}
}
