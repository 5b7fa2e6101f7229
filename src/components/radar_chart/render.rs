//! Canvas rendering for the radar chart.
//!
//! Drawing order:
//! 1. Background
//! 2. Reference rings and spokes
//! 3. Axis labels
//! 4. Data polygons, in selection order

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{BaseGeometry, RadarScene, SeriesPolygon};
use crate::components::theme::Theme;

/// Canvas size and chart centre.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Chart centre, x.
	pub cx: f64,
	/// Chart centre, y.
	pub cy: f64,
}

/// Renders the complete radar chart to the canvas.
pub fn render(ctx: &CanvasRenderingContext2d, viewport: &Viewport, scene: &RadarScene, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

	ctx.save();
	let _ = ctx.translate(viewport.cx, viewport.cy);

	draw_base(ctx, &scene.base, theme);
	for series in &scene.series {
		draw_series(ctx, series, theme);
	}

	ctx.restore();
}

fn draw_base(ctx: &CanvasRenderingContext2d, base: &BaseGeometry, theme: &Theme) {
	ctx.set_line_width(1.0);

	ctx.set_stroke_style_str(&theme.level.to_css());
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(3.0),
		&JsValue::from_f64(3.0),
	));
	for &r in &base.rings {
		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, r, 0.0, 2.0 * PI);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.set_stroke_style_str(&theme.axis.to_css());
	for spoke in &base.spokes {
		ctx.begin_path();
		ctx.move_to(0.0, 0.0);
		ctx.line_to(spoke.end.0, spoke.end.1);
		ctx.stroke();
	}

	ctx.set_fill_style_str(&theme.text.to_css());
	ctx.set_font(theme.font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for spoke in &base.spokes {
		let _ = ctx.fill_text(&spoke.name, spoke.label_at.0, spoke.label_at.1);
	}
}

fn draw_series(ctx: &CanvasRenderingContext2d, series: &SeriesPolygon, theme: &Theme) {
	let vertices = series.polygon.cartesian();
	let Some(&(x0, y0)) = vertices.first() else {
		return;
	};

	ctx.begin_path();
	ctx.move_to(x0, y0);
	for &(x, y) in &vertices[1..] {
		ctx.line_to(x, y);
	}
	ctx.close_path();

	ctx.set_fill_style_str(&series.color.with_alpha(theme.fill_alpha).to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&series.color.to_css());
	ctx.set_line_width(theme.stroke_width);
	ctx.stroke();
}
