//! Canvas rendering for the planar scatter plot.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ScatterScene, ScatterState};
use crate::components::theme::Theme;

/// Point radius in pixels.
pub const POINT_RADIUS: f64 = 4.0;

/// Renders the scatter plot, or the reason it is unavailable.
pub fn render(ctx: &CanvasRenderingContext2d, state: &ScatterState, scene: &ScatterScene, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.set_font(theme.font);
	ctx.set_fill_style_str(&theme.text.to_css());

	if let Some(reason) = &scene.unavailable {
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(reason, state.width / 2.0, state.height / 2.0);
		return;
	}

	// Plain points first so highlighted ones stay visible on top.
	for pass_highlighted in [false, true] {
		for p in scene
			.points
			.iter()
			.filter(|p| p.highlight.is_some() == pass_highlighted)
		{
			let (x, y) = state.transform.to_screen(p.x, p.y);
			let color = p.highlight.unwrap_or(theme.point);
			let radius = if pass_highlighted {
				POINT_RADIUS * 1.5
			} else {
				POINT_RADIUS
			};
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill();
		}
	}

	if let Some(p) = state.hovered.and_then(|i| scene.points.get(i)) {
		let (x, y) = state.transform.to_screen(p.x, p.y);
		ctx.begin_path();
		let _ = ctx.arc(x, y, POINT_RADIUS + 3.0, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.text.to_css());
		ctx.set_line_width(1.5);
		ctx.stroke();

		ctx.set_fill_style_str(&theme.text.to_css());
		ctx.set_text_align("left");
		ctx.set_text_baseline("bottom");
		let _ = ctx.fill_text(&p.label, x + POINT_RADIUS + 4.0, y - 4.0);
	}
}
