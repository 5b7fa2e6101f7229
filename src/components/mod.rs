//! UI components: the two chart canvases, their shared theme, and the
//! selector panels that drive them.

pub mod radar_chart;
pub mod scatter_plot;
pub mod selectors;
pub mod theme;
