pub mod render;

pub use render::{render_curve, CsvRenderer, CurveRenderer, JsonRenderer, TableRenderer};
