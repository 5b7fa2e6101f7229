//! Application state controller.
//!
//! [`AppState`] is an immutable value: every load, reset or selection edit
//! returns a new state, which the UI swaps into its signal in one step. The
//! renderer therefore never sees a half-replaced dataset.
//!
//! Loads are numbered. [`AppState::begin_load`] hands out a new generation,
//! and [`AppState::apply_load`] ignores results from any older generation, so
//! a slow load finishing after a newer one cannot overwrite it.

use std::sync::Arc;

use log::{debug, warn};

use crate::components::radar_chart::RadarScene;
use crate::components::scatter_plot::ScatterScene;
use crate::components::theme::SeriesPalette;
use crate::data::{ChartError, Selection, SelectionMode, resolve};
use crate::pipeline::LoadedDataset;

/// Selection slots present on an empty page.
const DEFAULT_SLOTS: usize = 2;

/// Whole-page state: current dataset, selection slots and user notice.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
	generation: u64,
	/// Whether a load is in flight.
	pub loading: bool,
	/// Current dataset, if one loaded.
	pub dataset: Option<Arc<LoadedDataset>>,
	/// Selection slots in display order.
	pub selections: Vec<Selection>,
	next_color: usize,
	/// One-shot message shown to the user, e.g. a failed load.
	pub notice: Option<String>,
}

impl Default for AppState {
	fn default() -> Self {
		Self::new()
	}
}

impl AppState {
	/// Empty page with two item slots.
	pub fn new() -> Self {
		Self {
			generation: 0,
			loading: false,
			dataset: None,
			selections: (0..DEFAULT_SLOTS)
				.map(|i| Selection::new(SelectionMode::Individual, i))
				.collect(),
			next_color: DEFAULT_SLOTS,
			notice: None,
		}
	}

	/// Generation of the most recent load request.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Start a new load. Returns the new state and the generation the
	/// result must be applied with.
	pub fn begin_load(&self) -> (Self, u64) {
		let generation = self.generation + 1;
		let next = Self {
			generation,
			loading: true,
			notice: None,
			..self.clone()
		};
		(next, generation)
	}

	/// Apply the outcome of load `generation`.
	///
	/// Stale results are dropped. A failed load clears the page back to the
	/// empty state with a notice. A successful load keeps selection slots and
	/// clears the keys that do not exist in the new dataset.
	pub fn apply_load(&self, generation: u64, result: Result<LoadedDataset, ChartError>) -> Self {
		if generation != self.generation {
			debug!(
				"radar-compare: dropping result of load {generation}, latest is {}",
				self.generation
			);
			return self.clone();
		}

		match result {
			Ok(dataset) => {
				let selections = self
					.selections
					.iter()
					.map(|s| {
						let key = resolve(s, &dataset.table, &dataset.aggregates)
							.and(s.key.clone());
						Selection { key, ..s.clone() }
					})
					.collect();
				Self {
					loading: false,
					dataset: Some(Arc::new(dataset)),
					selections,
					notice: None,
					..self.clone()
				}
			}
			Err(e) => {
				warn!("radar-compare: load {generation} failed: {e}");
				Self {
					generation: self.generation,
					notice: Some(format!("Error loading data: {e}")),
					..Self::new()
				}
			}
		}
	}

	/// Back to the empty page. Any load in flight is abandoned.
	pub fn reset(&self) -> Self {
		Self {
			generation: self.generation + 1,
			..Self::new()
		}
	}

	/// Append an empty slot with the next unused color.
	pub fn add_selection(&self, mode: SelectionMode) -> Self {
		let mut selections = self.selections.clone();
		selections.push(Selection::new(mode, self.next_color));
		Self {
			selections,
			next_color: self.next_color + 1,
			..self.clone()
		}
	}

	/// Drop the slot with `color_index`.
	pub fn remove_selection(&self, color_index: usize) -> Self {
		Self {
			selections: self
				.selections
				.iter()
				.filter(|s| s.color_index != color_index)
				.cloned()
				.collect(),
			..self.clone()
		}
	}

	/// Point slot `color_index` at `key` (`None` for "no selection").
	pub fn set_selection_key(&self, color_index: usize, key: Option<String>) -> Self {
		self.edit_selection(color_index, |s| s.key = key)
	}

	/// Switch a slot between individual and category mode. Keys do not carry
	/// over between modes, so the slot is cleared.
	pub fn set_selection_mode(&self, color_index: usize, mode: SelectionMode) -> Self {
		self.edit_selection(color_index, |s| {
			if s.mode != mode {
				s.mode = mode;
				s.key = None;
			}
		})
	}

	/// Clear the user notice.
	pub fn dismiss_notice(&self) -> Self {
		Self {
			notice: None,
			..self.clone()
		}
	}

	fn edit_selection(&self, color_index: usize, edit: impl FnOnce(&mut Selection)) -> Self {
		let mut selections = self.selections.clone();
		if let Some(s) = selections.iter_mut().find(|s| s.color_index == color_index) {
			edit(s);
		}
		Self {
			selections,
			..self.clone()
		}
	}

	/// Keys a slot in `mode` can choose from, in display order.
	pub fn choices(&self, mode: SelectionMode) -> Vec<String> {
		let Some(dataset) = &self.dataset else {
			return Vec::new();
		};
		match mode {
			SelectionMode::Individual => dataset.table.records.iter().map(|r| r.label.clone()).collect(),
			SelectionMode::Category => dataset.aggregates.iter().map(|g| g.category.clone()).collect(),
		}
	}

	/// Radar scene for the current dataset and selections.
	pub fn radar_scene(&self, palette: &SeriesPalette) -> RadarScene {
		RadarScene::build(self.dataset.as_deref(), &self.selections, palette)
	}

	/// Scatter scene for the current dataset and selections.
	pub fn scatter_scene(&self, palette: &SeriesPalette) -> ScatterScene {
		ScatterScene::build(self.dataset.as_deref(), &self.selections, palette)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::IngestOptions;
	use crate::embedding::{EmbeddingConfig, Embedder};

	struct Echo;

	impl Embedder for Echo {
		fn fit(&self, m: &[Vec<f64>], _: &EmbeddingConfig) -> Result<Vec<Vec<f64>>, ChartError> {
			Ok(m.iter().map(|r| vec![r[0], r[1]]).collect())
		}
	}

	const BEER: &str = "Category,Item,Color,Body\nLager,Brand A,3,4\nLager,Brand B,5,2\nAle,Brand C,7,6\n";
	const GAMES: &str = "Genre,Title,Story,Graphics\nRPG,Quest,9,7\nShooter,Blast,4,9\n";

	fn build(text: &str) -> Result<LoadedDataset, ChartError> {
		LoadedDataset::build("test", text, &IngestOptions::default(), &Echo, 190.0)
	}

	fn loaded(text: &str) -> AppState {
		let (state, generation) = AppState::new().begin_load();
		state.apply_load(generation, build(text))
	}

	#[test]
	fn starts_with_two_empty_slots() {
		let state = AppState::new();
		assert_eq!(state.selections.len(), 2);
		assert!(state.selections.iter().all(|s| s.key.is_none()));
		assert_eq!(state.radar_scene(&SeriesPalette::categorical()), RadarScene::default());
	}

	#[test]
	fn successful_load_installs_dataset() {
		let state = loaded(BEER);
		assert!(!state.loading);
		let dataset = state.dataset.as_ref().unwrap();
		assert_eq!(dataset.table.records.len(), 3);
		assert_eq!(state.choices(SelectionMode::Category), vec!["Lager", "Ale"]);
		assert_eq!(state.choices(SelectionMode::Individual)[0], "Brand A - Lager");
	}

	#[test]
	fn failed_load_returns_to_empty_state() {
		let state = loaded(BEER).set_selection_key(0, Some("Brand A - Lager".into()));
		let (pending, generation) = state.begin_load();
		assert!(pending.loading);
		let failed = pending.apply_load(generation, build("Category,Item\nLager,A\n"));
		assert!(failed.dataset.is_none());
		assert!(failed.selections.iter().all(|s| s.key.is_none()));
		assert!(failed.notice.as_deref().unwrap().contains("malformed input"));
		assert_eq!(failed.generation(), generation);
		assert_eq!(failed.dismiss_notice().notice, None);
	}

	#[test]
	fn stale_load_is_ignored() {
		let (first, old) = AppState::new().begin_load();
		let (second, new) = first.begin_load();
		let after_new = second.apply_load(new, build(GAMES));
		let after_old = after_new.apply_load(old, build(BEER));
		assert_eq!(after_old, after_new);
		assert_eq!(after_old.dataset.as_ref().unwrap().table.metric_names, vec!["Story", "Graphics"]);
	}

	#[test]
	fn reset_abandons_in_flight_load() {
		let (pending, generation) = AppState::new().begin_load();
		let reset = pending.reset();
		let after = reset.apply_load(generation, build(BEER));
		assert!(after.dataset.is_none());
	}

	#[test]
	fn selection_edits() {
		let state = loaded(BEER)
			.add_selection(SelectionMode::Category)
			.set_selection_key(2, Some("Ale".into()))
			.set_selection_key(0, Some("Brand B - Lager".into()));
		assert_eq!(state.selections.len(), 3);
		let scene = state.radar_scene(&SeriesPalette::categorical());
		let colors: Vec<usize> = scene.series.iter().map(|s| s.color_index).collect();
		assert_eq!(colors, vec![0, 2]);

		// Removing a slot never renumbers the others.
		let state = state.remove_selection(0).add_selection(SelectionMode::Individual);
		let colors: Vec<usize> = state.selections.iter().map(|s| s.color_index).collect();
		assert_eq!(colors, vec![1, 2, 3]);

		// Switching mode clears the key.
		let state = state.set_selection_mode(2, SelectionMode::Individual);
		assert_eq!(state.selections[1].key, None);
	}

	#[test]
	fn reload_keeps_only_resolvable_keys() {
		let state = loaded(BEER)
			.set_selection_key(0, Some("Brand A - Lager".into()))
			.add_selection(SelectionMode::Category)
			.set_selection_key(2, Some("RPG".into()));
		let (pending, generation) = state.begin_load();
		let state = pending.apply_load(generation, build(BEER));
		assert_eq!(state.selections[0].key.as_deref(), Some("Brand A - Lager"));
		assert_eq!(state.selections[2].key, None);
	}

	#[test]
	fn unresolved_category_renders_nothing() {
		let state = loaded(BEER).add_selection(SelectionMode::Category);
		let state = state.set_selection_key(2, Some("Stout".into()));
		assert!(state.radar_scene(&SeriesPalette::categorical()).series.is_empty());
	}
}
