//! Planar embedding scatter plot.
//!
//! Shows every record of the current dataset at its embedded position,
//! colored by the selections that refer to it, with:
//! - drag to pan, wheel to zoom around the cursor, double-click to refit
//! - hover to show a record's label
//! - a notice in place of the points when the embedding is unavailable

mod component;
mod render;
pub mod state;

pub use component::ScatterPlotCanvas;
pub use state::{ScatterPoint, ScatterScene};
