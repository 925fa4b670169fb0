#![forbid(unsafe_code)]

//! Process map model + Yamazumi chart geometry (headless).
//!
//! Design goals:
//! - the geometry is a pure, deterministic function of `(nodes, takt_time)`
//! - malformed input degrades to defaults instead of failing the whole chart
//! - no pixels here: renderers consume normalized ratios (see `yamazumi-render`)

pub mod config;
pub mod error;
pub mod geom;
pub mod geometry;
pub mod input;
pub mod locale;
pub mod model;

pub use config::ChartConfig;
pub use error::{Error, Result};
pub use geometry::{
    Bar, ChartGeometry, LineBalance, MIN_SCALE_MAX, TAKT_HEADROOM, compute_geometry,
    line_balance,
};
pub use input::{ProcessMap, parse_process_map, parse_process_map_value};
pub use locale::{Labels, Locale};
pub use model::{NodeKind, ProcessNode, UNNAMED_PROCESS, coerce_duration};

#[cfg(test)]
mod tests;
