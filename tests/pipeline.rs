//! End-to-end checks of the load pipeline: CSV text in, chart scenes out.

#![allow(unused_crate_dependencies)]

use radar_compare::components::radar_chart::RadarScene;
use radar_compare::components::scatter_plot::ScatterScene;
use radar_compare::components::theme::SeriesPalette;
use radar_compare::data::{ChartError, IngestOptions, IngestPolicy, Selection, SelectionMode, ingest};
use radar_compare::embedding::ForceLayoutEmbedder;
use radar_compare::state::AppState;
use radar_compare::LoadedDataset;

const BEER: &str = "Category,Item,Color,Body
Lager,Brand A,3,4
Lager,Brand B,5,2
Ale,Brand C,7,6
";

fn load(text: &str) -> Result<LoadedDataset, ChartError> {
	LoadedDataset::build(
		"beer.csv",
		text,
		&IngestOptions::default(),
		&ForceLayoutEmbedder::default(),
		190.0,
	)
}

fn pick(mode: SelectionMode, key: &str, color_index: usize) -> Selection {
	Selection {
		key: Some(key.to_string()),
		..Selection::new(mode, color_index)
	}
}

#[test]
fn worked_example_builds_every_view() {
	let dataset = load(BEER).unwrap();

	assert_eq!(dataset.table.metric_names, ["Color", "Body"]);
	assert_eq!(dataset.table.records[0].label, "Brand A - Lager");
	assert_eq!(dataset.scale.max_value(), 7.0);
	assert_eq!(dataset.aggregates.get("Lager").unwrap().metrics, [4.0, 3.0]);
	assert_eq!(dataset.aggregates.get("Ale").unwrap().metrics, [7.0, 6.0]);

	let planar = dataset.planar_points().unwrap();
	assert_eq!(planar.len(), 3);
	assert!(planar.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn radar_scene_draws_one_polygon_per_resolvable_selection() {
	let dataset = load(BEER).unwrap();
	let palette = SeriesPalette::categorical();
	let selections = [
		pick(SelectionMode::Individual, "Brand C - Ale", 0),
		pick(SelectionMode::Category, "Lager", 1),
		pick(SelectionMode::Category, "Stout", 2),
		Selection::new(SelectionMode::Individual, 3),
	];

	let scene = RadarScene::build(Some(&dataset), &selections, &palette);
	assert_eq!(scene.base.spokes.len(), 2);
	assert_eq!(scene.series.len(), 2);

	// Brand C holds the domain maximum on Color, so it touches the rim.
	let brand_c = &scene.series[0];
	assert_eq!(brand_c.color_index, 0);
	assert!((brand_c.polygon.points[0].radius - 190.0).abs() < 1e-9);
	assert_eq!(scene.series[1].color, palette.get(1));
}

#[test]
fn two_column_csv_is_malformed() {
	let err = load("Category,Item\nLager,Brand A\n").unwrap_err();
	assert!(matches!(err, ChartError::MalformedInput(_)));
	assert!(err.is_fatal());
}

#[test]
fn not_a_number_names_the_column_in_strict_mode() {
	let err = load("Category,Item,Color,Body\nLager,Brand A,3,N/A\n").unwrap_err();
	assert_eq!(
		err,
		ChartError::InvalidMetricValue {
			column: "Body".into(),
			row: 1
		}
	);
}

#[test]
fn lenient_mode_keeps_the_row_at_radius_zero() {
	let options = IngestOptions {
		policy: IngestPolicy::Lenient,
		..IngestOptions::default()
	};
	let dataset = LoadedDataset::build(
		"beer.csv",
		"Category,Item,Color,Body\nLager,Brand A,3,N/A\nAle,Brand C,7,6\n",
		&options,
		&ForceLayoutEmbedder::default(),
		190.0,
	)
	.unwrap();

	let scene = RadarScene::build(
		Some(&dataset),
		&[pick(SelectionMode::Individual, "Brand A - Lager", 0)],
		&SeriesPalette::categorical(),
	);
	let radii: Vec<f64> = scene.series[0].polygon.points.iter().map(|p| p.radius).collect();
	assert_eq!(radii[1], 0.0);
	assert!(radii.iter().all(|r| r.is_finite()));
}

#[test]
fn reingesting_is_idempotent() {
	let first = ingest(BEER, &IngestOptions::default()).unwrap();
	let second = ingest(BEER, &IngestOptions::default()).unwrap();
	assert_eq!(first, second);
}

#[test]
fn failed_load_clears_the_previous_dataset() {
	let (state, generation) = AppState::new().begin_load();
	let state = state.apply_load(generation, load(BEER));
	assert!(state.dataset.is_some());

	let (state, generation) = state.begin_load();
	let state = state.apply_load(generation, load("Category,Item\n"));
	assert!(state.dataset.is_none());
	assert!(state.notice.as_deref().unwrap().starts_with("Error loading data"));

	let palette = SeriesPalette::categorical();
	assert!(state.radar_scene(&palette).series.is_empty());
	assert_eq!(state.scatter_scene(&palette), ScatterScene::default());
}

#[test]
fn slower_earlier_load_does_not_overwrite_newer_one() {
	let (state, first) = AppState::new().begin_load();
	let (state, second) = state.begin_load();

	let state = state.apply_load(second, load(BEER));
	let state = state.apply_load(first, load("Category,Item,X\nA,B,1\n"));

	assert_eq!(state.dataset.as_ref().unwrap().table.metric_names, ["Color", "Body"]);
}

#[test]
fn scatter_highlights_follow_selections() {
	let (state, generation) = AppState::new().begin_load();
	let state = state.apply_load(generation, load(BEER));
	let slot = state.selections[0].color_index;
	let state = state.set_selection_mode(slot, SelectionMode::Category);
	let state = state.set_selection_key(slot, Some("Lager".into()));

	let palette = SeriesPalette::categorical();
	let scene = state.scatter_scene(&palette);
	assert_eq!(scene.points.len(), 3);
	let highlighted: Vec<&str> = scene
		.points
		.iter()
		.filter(|p| p.highlight.is_some())
		.map(|p| p.label.as_str())
		.collect();
	assert_eq!(highlighted, ["Brand A - Lager", "Brand B - Lager"]);
}
