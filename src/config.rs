//! Page configuration.
//!
//! Read from a `<script id="radar-config" type="application/json">` element
//! in the host page. Every field is optional; anything missing falls back to
//! [`AppConfig::default`].

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::data::{IngestOptions, IngestPolicy, SchemaConfig};

/// Id of the DOM element holding the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "radar-config";

/// A bundled dataset offered in the dataset picker.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DatasetEntry {
	/// What the user sees.
	pub name: String,
	/// URL of the CSV file, relative to the page.
	pub file: String,
	/// Column roles for this dataset, when not positional.
	#[serde(default)]
	pub schema: Option<SchemaConfig>,
}

/// Top-level page configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
	/// Bundled datasets offered in the picker.
	pub datasets: Vec<DatasetEntry>,
	/// How non-numeric metric cells are handled.
	pub policy: IngestPolicy,
	/// Theme preset name (`default` or `midnight`).
	pub theme: String,
	/// Chart width in pixels.
	pub width: f64,
	/// Chart height in pixels.
	pub height: f64,
	/// Space between the radar rim and the canvas edge.
	pub margin: f64,
}

impl Default for AppConfig {
	fn default() -> Self {
		let entry = |name: &str, file: &str| DatasetEntry {
			name: name.into(),
			file: file.into(),
			schema: None,
		};
		Self {
			datasets: vec![
				entry("Beer Tasting Notes", "data/beer.csv"),
				entry("Ice Cream Tasting", "data/ice_cream.csv"),
				entry("Video Game Ratings", "data/video_games.csv"),
			],
			policy: IngestPolicy::Strict,
			theme: "default".into(),
			width: 600.0,
			height: 500.0,
			margin: 60.0,
		}
	}
}

impl AppConfig {
	/// Chart radius: half the smaller inner dimension.
	pub fn radius(&self) -> f64 {
		let inner_w = self.width - 2.0 * self.margin;
		let inner_h = self.height - 2.0 * self.margin;
		(inner_w.min(inner_h) / 2.0).max(0.0)
	}

	/// Ingestion options for a bundled dataset.
	pub fn ingest_options_for(&self, entry: &DatasetEntry) -> IngestOptions {
		IngestOptions {
			policy: self.policy,
			schema: entry.schema.clone().unwrap_or_default(),
		}
	}

	/// Ingestion options for an uploaded file (always positional).
	pub fn upload_options(&self) -> IngestOptions {
		IngestOptions {
			policy: self.policy,
			schema: SchemaConfig::default(),
		}
	}

	/// Bundled dataset whose file is `file`.
	pub fn dataset(&self, file: &str) -> Option<&DatasetEntry> {
		self.datasets.iter().find(|d| d.file == file)
	}

	/// Parse a config document.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}

/// Load configuration from the page, or the defaults if there is none.
pub fn load_config() -> AppConfig {
	let Some(text) = config_text() else {
		info!("radar-compare: no #{CONFIG_ELEMENT_ID} element, using defaults");
		return AppConfig::default();
	};
	match AppConfig::from_json(&text) {
		Ok(config) => {
			info!(
				"radar-compare: loaded config with {} datasets",
				config.datasets.len()
			);
			config
		}
		Err(e) => {
			warn!("radar-compare: failed to parse config: {}", e);
			AppConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_list_bundled_datasets() {
		let config = AppConfig::default();
		assert_eq!(config.datasets.len(), 3);
		assert_eq!(config.policy, IngestPolicy::Strict);
		assert_eq!(config.radius(), 190.0);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = AppConfig::from_json(
			r#"{
				"policy": "lenient",
				"theme": "midnight",
				"datasets": [
					{ "name": "Ice Cream", "file": "data/ice.csv",
					  "schema": { "categoryColumn": 1, "itemColumn": 0 } }
				]
			}"#,
		)
		.unwrap();
		assert_eq!(config.policy, IngestPolicy::Lenient);
		assert_eq!(config.width, 600.0);
		assert_eq!(config.theme, "midnight");

		let entry = config.dataset("data/ice.csv").unwrap();
		let options = config.ingest_options_for(entry);
		assert_eq!(options.schema.category_column, 1);
		assert_eq!(options.policy, IngestPolicy::Lenient);
		assert_eq!(config.upload_options().schema, SchemaConfig::default());
		assert!(config.dataset("data/beer.csv").is_none());
	}

	#[test]
	fn rejects_unknown_policy() {
		assert!(AppConfig::from_json(r#"{ "policy": "sloppy" }"#).is_err());
	}
}
