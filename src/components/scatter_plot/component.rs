//! Leptos component wrapping the scatter plot canvas.
//!
//! Mouse handlers pan the view, the wheel zooms around the cursor, and
//! hovering a point shows its label. Every interaction redraws immediately.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render::{self, POINT_RADIUS};
use super::state::{ScatterScene, ScatterState};
use crate::components::theme::Theme;

/// Padding between the outermost points and the canvas edge.
const FIT_PADDING: f64 = 30.0;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|c| c.dyn_into().ok())
}

fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders the planar embedding as an interactive scatter plot.
#[component]
pub fn ScatterPlotCanvas(
	#[prop(into)] scene: Signal<ScatterScene>,
	theme: Theme,
	#[prop(default = 600.0)] width: f64,
	#[prop(default = 500.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(ScatterState::new(width, height)));
	let theme = Rc::new(theme);

	let redraw = {
		let (state, theme) = (state.clone(), theme.clone());
		Rc::new(move || {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let Some(ctx) = context_2d(&canvas) else {
				return;
			};
			scene.with_untracked(|scene| render::render(&ctx, &state.borrow(), scene, &theme));
		})
	};

	let (state_fx, redraw_fx) = (state.clone(), redraw.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		scene.with(|scene| state_fx.borrow_mut().sync(scene, FIT_PADDING));
		redraw_fx();
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);
		state_md.borrow_mut().begin_pan(x, y);
	};

	let (state_mm, redraw_mm) = (state.clone(), redraw.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);
		let changed = {
			let mut s = state_mm.borrow_mut();
			if s.drag_to(x, y) {
				true
			} else {
				let hovered = scene.with_untracked(|scene| s.point_at(scene, x, y, POINT_RADIUS * 2.0));
				let changed = hovered != s.hovered;
				s.hovered = hovered;
				changed
			}
		};
		if changed {
			redraw_mm();
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		state_mu.borrow_mut().end_pan();
	};

	let (state_ml, redraw_ml) = (state.clone(), redraw.clone());
	let on_mouseleave = move |_: MouseEvent| {
		{
			let mut s = state_ml.borrow_mut();
			s.end_pan();
			s.hovered = None;
		}
		redraw_ml();
	};

	let (state_wh, redraw_wh) = (state.clone(), redraw.clone());
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		state_wh.borrow_mut().zoom_at(x, y, factor);
		redraw_wh();
	};

	let (state_dc, redraw_dc) = (state, redraw);
	let on_dblclick = move |_: MouseEvent| {
		scene.with_untracked(|scene| state_dc.borrow_mut().fit(scene, FIT_PADDING));
		redraw_dc();
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="scatter-plot-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:dblclick=on_dblclick
			style="display: block; cursor: grab;"
		/>
	}
}
