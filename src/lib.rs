//! barchart-rs: animated bar-chart rendering engine.
//!
//! This crate renders tabular datasets as animated bar charts on a
//! caller-owned drawing surface, driven by a declarative nested
//! configuration. Repeated `render` calls reconcile the existing scene
//! with the new dataset through an enter/update/exit lifecycle instead
//! of rebuilding it.

pub mod anim;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use config::{ChartConfig, ConfigVariant};
pub use error::{ChartError, ChartResult};
pub use render::BarChart;
pub use scene::Surface;
