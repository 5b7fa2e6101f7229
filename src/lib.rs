//! radar-compare: radar chart and embedding scatter plot for CSV datasets.
//!
//! This crate provides a WASM page that loads a bundled or uploaded CSV file,
//! averages it per category, and compares chosen items or category averages
//! on a shared radar chart, next to a 2-D similarity layout of every item.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};
use web_sys::MouseEvent;

pub mod components;
pub mod config;
pub mod data;
pub mod embedding;
pub mod loader;
pub mod pipeline;
pub mod state;

use components::radar_chart::RadarChartCanvas;
use components::scatter_plot::ScatterPlotCanvas;
use components::selectors::{DatasetPicker, SelectionPanel};
use components::theme::Theme;
use config::load_config;
use state::AppState;

pub use data::{ChartError, Table};
pub use pipeline::LoadedDataset;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("radar-compare: logging initialized");
}

/// Main application component.
/// Reads page configuration from the DOM and lays out selectors and charts.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let theme = Theme::by_name(&config.theme);
	let palette = theme.palette.clone();
	let (width, height) = (config.width, config.height);

	let state = RwSignal::new(AppState::new());

	let radar_palette = palette.clone();
	let radar_scene = Memo::new(move |_| state.with(|s| s.radar_scene(&radar_palette)));
	let scatter_palette = palette.clone();
	let scatter_scene = Memo::new(move |_| state.with(|s| s.scatter_scene(&scatter_palette)));

	let status = move || {
		state.with(|s| {
			if s.loading {
				return "Loading…".to_string();
			}
			match &s.dataset {
				Some(d) => format!(
					"{}: {} items, {} categories, {} metrics",
					d.source,
					d.table.records.len(),
					d.aggregates.len(),
					d.table.metric_count()
				),
				None => "No dataset loaded".to_string(),
			}
		})
	};
	let notice = move || state.with(|s| s.notice.clone());
	let dismiss = move |_: MouseEvent| state.update(|s| *s = s.dismiss_notice());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme.name />
		<Title text="Radar Compare" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="radar-compare">
			<header>
				<h1>"Radar Compare"</h1>
				<DatasetPicker state=state config=config />
				<p class="status">{status}</p>
				<Show when=move || notice().is_some()>
					<div class="notice" role="alert">
						{move || notice().unwrap_or_default()}
						<button on:click=dismiss>"Dismiss"</button>
					</div>
				</Show>
			</header>
			<SelectionPanel state=state palette=palette />
			<section class="charts">
				<figure>
					<RadarChartCanvas scene=radar_scene theme=theme.clone() width=width height=height />
					<figcaption>"Profile"</figcaption>
				</figure>
				<figure>
					<ScatterPlotCanvas scene=scatter_scene theme=theme width=width height=height />
					<figcaption>"Similarity map (drag to pan, scroll to zoom, double-click to reset)"</figcaption>
				</figure>
			</section>
		</main>
	}
}
