//! Watercolour painting simulation: pigment splats advected by a stochastic
//! process over a wet-map moisture field, drying into a baked canvas image.

pub mod analysis;
pub mod app;
pub mod canvas;
pub mod export;
pub mod history;
pub mod painting;
pub mod raster;
pub mod render;
pub mod splat;
pub mod stamp;
pub mod wet_map;

pub use analysis::{AnalysisRecorder, PaintingMetrics};
pub use app::PaintingApp;
pub use canvas::Canvas;
pub use export::ImageExporter;
pub use history::History;
pub use painting::{Painting, SimSettings};
pub use render::Renderer;
pub use splat::{Splat, Vertex};
pub use stamp::{BrushSettings, Stamp};
pub use wet_map::WetMap;
