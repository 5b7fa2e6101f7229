//! Reading CSV text from the network or from a user-selected file.
//!
//! Both reads are one-shot promises awaited through `wasm-bindgen-futures`.
//! [`start_load`] tags each request with a load generation so only the most
//! recent request can replace the dataset.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, Response};

use crate::data::{ChartError, IngestOptions};
use crate::embedding::ForceLayoutEmbedder;
use crate::pipeline::LoadedDataset;
use crate::state::AppState;

fn js_error(context: &str, err: JsValue) -> ChartError {
	let detail = err
		.as_string()
		.or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
		.unwrap_or_else(|| "unknown error".into());
	ChartError::Read(format!("{context}: {detail}"))
}

fn promised_text(value: JsValue, context: &str) -> Result<String, ChartError> {
	value
		.as_string()
		.ok_or_else(|| ChartError::Read(format!("{context}: response is not text")))
}

/// Fetch a bundled CSV file relative to the page.
pub async fn fetch_text(url: &str) -> Result<String, ChartError> {
	let window = web_sys::window().ok_or_else(|| ChartError::Read("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| js_error(url, e))?;
	let response: Response = response
		.dyn_into()
		.map_err(|e| js_error(url, e))?;
	if !response.ok() {
		return Err(ChartError::Read(format!(
			"{url}: HTTP {} {}",
			response.status(),
			response.status_text()
		)));
	}
	let text = JsFuture::from(response.text().map_err(|e| js_error(url, e))?)
		.await
		.map_err(|e| js_error(url, e))?;
	promised_text(text, url)
}

/// Read an uploaded file as UTF-8 text.
pub async fn read_file_text(file: &File) -> Result<String, ChartError> {
	let name = file.name();
	let text = JsFuture::from(file.text())
		.await
		.map_err(|e| js_error(&name, e))?;
	promised_text(text, &name)
}

/// Begin a load: bump the generation, await `read`, run the pipeline and
/// apply the result if no newer load has started meanwhile.
pub fn start_load<F>(
	state: RwSignal<AppState>,
	source: String,
	read: F,
	options: IngestOptions,
	radius: f64,
) where
	F: Future<Output = Result<String, ChartError>> + 'static,
{
	let mut generation = 0;
	state.update(|s| {
		let (next, g) = s.begin_load();
		*s = next;
		generation = g;
	});
	log::info!("radar-compare: load {generation} started for {source}");

	spawn_local(async move {
		let result = read.await.and_then(|text| {
			LoadedDataset::build(
				source,
				&text,
				&options,
				&ForceLayoutEmbedder::default(),
				radius,
			)
		});
		state.update(|s| *s = s.apply_load(generation, result));
	});
}
