//! Radar ("spider") chart.
//!
//! Draws one spoke per metric, concentric reference rings, and one filled,
//! closed polygon per active selection on a canvas:
//! - [`scale`]: shared value-to-radius scale and polar math
//! - [`geometry`]: axes, rings and polygons as plain data
//! - the canvas renderer and Leptos component
//!
//! # Example
//!
//! ```ignore
//! let scene = Memo::new(move |_| RadarScene::build(dataset.as_ref(), &selections, &palette));
//! view! { <RadarChartCanvas scene=scene theme=Theme::default() /> }
//! ```

mod component;
pub mod geometry;
mod render;
pub mod scale;

pub use component::RadarChartCanvas;
pub use geometry::{BaseGeometry, RadarScene, RadialPolygon, project_radial};
pub use scale::AxisScale;
