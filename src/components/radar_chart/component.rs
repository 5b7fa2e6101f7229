//! Leptos component wrapping the radar chart canvas.
//!
//! The chart is redrawn from scratch whenever the scene signal changes; there
//! is no animation loop.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::geometry::RadarScene;
use super::render::{self, Viewport};
use crate::components::theme::Theme;

/// Renders a radar chart for the given scene.
///
/// `width`/`height` size the canvas; the chart is centred inside the margin.
#[component]
pub fn RadarChartCanvas(
	#[prop(into)] scene: Signal<RadarScene>,
	theme: Theme,
	#[prop(default = 600.0)] width: f64,
	#[prop(default = 500.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let scene = scene.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas;
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("radar-compare: radar canvas has no 2d context");
			return;
		};

		let viewport = Viewport {
			width,
			height,
			cx: width / 2.0,
			cy: height / 2.0,
		};
		render::render(&ctx, &viewport, &scene, &theme);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="radar-chart-canvas"
			style="display: block;"
		/>
	}
}
