//! Dataset picker, file upload and the selection panel.
//!
//! These components only translate DOM events into [`AppState`] transitions
//! and load requests; all data handling lives in the pipeline.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, MouseEvent};

use crate::components::theme::SeriesPalette;
use crate::config::AppConfig;
use crate::data::{Selection, SelectionMode};
use crate::loader::{fetch_text, read_file_text, start_load};
use crate::state::AppState;

/// Value of the "no choice" option in every drop-down.
const NONE_VALUE: &str = "none";

/// Bundled dataset drop-down plus a CSV upload field.
#[component]
pub fn DatasetPicker(state: RwSignal<AppState>, config: AppConfig) -> impl IntoView {
	let config = StoredValue::new(config);

	let on_dataset = move |ev: Event| {
		let file = event_target_value(&ev);
		if file == NONE_VALUE {
			state.update(|s| *s = s.reset());
			return;
		}
		let Some((entry, options, radius)) = config.with_value(|c| {
			c.dataset(&file)
				.map(|entry| (entry.clone(), c.ingest_options_for(entry), c.radius()))
		}) else {
			log::warn!("radar-compare: unknown dataset {file}");
			return;
		};
		let url = entry.file.clone();
		start_load(
			state,
			entry.name,
			async move { fetch_text(&url).await },
			options,
			radius,
		);
	};

	let on_upload = move |ev: Event| {
		let Some(file) = ev
			.target()
			.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
			.and_then(|input| input.files())
			.and_then(|files| files.item(0))
		else {
			return;
		};
		let (options, radius) = config.with_value(|c| (c.upload_options(), c.radius()));
		start_load(
			state,
			file.name(),
			async move { read_file_text(&file).await },
			options,
			radius,
		);
	};

	let datasets = config.with_value(|c| c.datasets.clone());

	view! {
		<div class="dataset-picker">
			<label>
				"Dataset: "
				<select id="dataset-select" on:change=on_dataset>
					<option value=NONE_VALUE>"None"</option>
					{datasets
						.into_iter()
						.map(|d| view! { <option value=d.file>{d.name}</option> })
						.collect_view()}
				</select>
			</label>
			<label>
				" or upload CSV: "
				<input type="file" accept=".csv,text/csv" on:change=on_upload />
			</label>
		</div>
	}
}

/// One selection slot: mode toggle, key drop-down, color swatch, remove button.
#[component]
fn SelectionRow(state: RwSignal<AppState>, selection: Selection, palette: SeriesPalette) -> impl IntoView {
	let color_index = selection.color_index;
	let swatch = format!("background-color: {};", palette.get(color_index).to_css());

	let slot = move || {
		state.with(|s| {
			s.selections
				.iter()
				.find(|x| x.color_index == color_index)
				.cloned()
		})
	};
	let mode = move || slot().map(|s| s.mode).unwrap_or_default();
	let key = move || slot().and_then(|s| s.key);
	let disabled = move || state.with(|s| s.dataset.is_none());

	let on_mode = move |ev: Event| {
		if let Some(mode) = SelectionMode::parse(&event_target_value(&ev)) {
			state.update(|s| *s = s.set_selection_mode(color_index, mode));
		}
	};
	let on_key = move |ev: Event| {
		let value = event_target_value(&ev);
		let key = (value != NONE_VALUE).then_some(value);
		state.update(|s| *s = s.set_selection_key(color_index, key));
	};
	let on_remove = move |_: MouseEvent| state.update(|s| *s = s.remove_selection(color_index));

	let options = move || {
		let current = key();
		let choices = state.with(|s| s.choices(mode()));
		choices
			.into_iter()
			.map(|choice| {
				let selected = current.as_deref() == Some(choice.as_str());
				view! { <option value=choice.clone() prop:selected=selected>{choice.clone()}</option> }
			})
			.collect_view()
	};

	view! {
		<div class="selection-row">
			<span class="swatch" style=swatch></span>
			<select class="mode-select" on:change=on_mode prop:disabled=disabled>
				<option value="individual" prop:selected=move || mode() == SelectionMode::Individual>
					"Item"
				</option>
				<option value="category" prop:selected=move || mode() == SelectionMode::Category>
					"Category average"
				</option>
			</select>
			<select class="key-select" on:change=on_key prop:disabled=disabled>
				<option value=NONE_VALUE prop:selected=move || key().is_none()>"None"</option>
				{options}
			</select>
			<button class="remove" on:click=on_remove title="Remove">"×"</button>
		</div>
	}
}

/// Collapsible panel listing every selection slot.
#[component]
pub fn SelectionPanel(state: RwSignal<AppState>, palette: SeriesPalette) -> impl IntoView {
	let palette = StoredValue::new(palette);
	let add = move |mode: SelectionMode| move |_: MouseEvent| state.update(|s| *s = s.add_selection(mode));

	view! {
		<details class="selection-panel" open=true>
			<summary>"Compare"</summary>
			<For
				each=move || state.with(|s| s.selections.clone())
				key=|s| s.color_index
				children=move |selection| {
					view! {
						<SelectionRow
							state=state
							selection=selection
							palette=palette.get_value()
						/>
					}
				}
			/>
			<div class="selection-actions">
				<button on:click=add(SelectionMode::Individual)>"+ Item"</button>
				<button on:click=add(SelectionMode::Category)>"+ Category average"</button>
			</div>
		</details>
	}
}
