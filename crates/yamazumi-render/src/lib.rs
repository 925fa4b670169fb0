#![forbid(unsafe_code)]

pub mod layout;
pub mod model;
pub mod svg;
pub mod text;

use crate::model::{ChartLayout, LayoutedChart};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;
use yamazumi_core::{ChartConfig, ChartGeometry, ProcessMap, compute_geometry};

pub use layout::layout_geometry;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid chart layout: {message}")]
    InvalidLayout { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions").finish_non_exhaustive()
    }
}

/// Computes the geometry of `map` and lays it out in one step.
///
/// `config` should already contain any overrides embedded in the map document.
pub fn layout_process_map(
    map: &ProcessMap,
    config: &ChartConfig,
    options: &LayoutOptions,
) -> Result<LayoutedChart> {
    let geometry: ChartGeometry = compute_geometry(&map.nodes, map.takt_time);
    let layout: ChartLayout = layout_geometry(&geometry, config, options)?;
    Ok(LayoutedChart { geometry, layout })
}
