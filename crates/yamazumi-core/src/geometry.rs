use crate::model::{ProcessNode, coerce_duration};
use serde::{Deserialize, Serialize};

/// Headroom above takt time kept free on the value axis.
pub const TAKT_HEADROOM: f64 = 1.5;
/// Floor of the value axis; also rules out a zero divisor.
pub const MIN_SCALE_MAX: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub id: String,
    pub label: String,
    pub cycle_time: f64,
    /// `cycle_time / scale_max`, always within `[0, 1]`.
    pub height_ratio: f64,
    pub is_bottleneck: bool,
}

/// Normalized chart geometry for one `(nodes, takt_time)` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartGeometry {
    pub bars: Vec<Bar>,
    pub scale_max: f64,
    /// Effective takt time after coercion (`0` when disabled).
    pub takt_time: f64,
    /// Present only when `takt_time > 0`.
    pub takt_line_ratio: Option<f64>,
    pub no_data: bool,
}

impl ChartGeometry {
    pub fn bottlenecks(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(|b| b.is_bottleneck)
    }
}

/// Maps process nodes and a takt time to normalized bar geometry.
///
/// Non-process nodes are skipped; bar order follows input order. Total over its input: bad
/// numbers coerce to `0` rather than failing.
pub fn compute_geometry(nodes: &[ProcessNode], takt_time: f64) -> ChartGeometry {
    let takt_time = coerce_duration(takt_time);
    let takt_enabled = takt_time > 0.0;

    let processes: Vec<(&ProcessNode, f64)> = nodes
        .iter()
        .filter(|n| n.kind.is_process())
        .map(|n| (n, coerce_duration(n.cycle_time)))
        .collect();

    let max_cycle = processes.iter().map(|(_, ct)| *ct).fold(0.0_f64, f64::max);
    // Saturates so a huge finite takt still yields a finite axis.
    let headroom = (takt_time * TAKT_HEADROOM).min(f64::MAX);
    let scale_max = headroom.max(max_cycle).max(MIN_SCALE_MAX);

    let bars: Vec<Bar> = processes
        .into_iter()
        .map(|(node, ct)| Bar {
            id: node.id.clone(),
            label: node.display_name().to_string(),
            cycle_time: ct,
            height_ratio: (ct / scale_max).clamp(0.0, 1.0),
            is_bottleneck: takt_enabled && ct > takt_time,
        })
        .collect();

    let geometry = ChartGeometry {
        no_data: bars.is_empty(),
        takt_line_ratio: takt_enabled.then(|| (takt_time / scale_max).min(1.0)),
        bars,
        scale_max,
        takt_time,
    };

    tracing::debug!(
        bars = geometry.bars.len(),
        scale_max = geometry.scale_max,
        takt_time = geometry.takt_time,
        bottlenecks = geometry.bottlenecks().count(),
        "computed yamazumi geometry"
    );

    geometry
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBalance {
    pub total_work: f64,
    pub max_cycle_time: f64,
    pub bottleneck_count: usize,
    /// `total_work / (bars * max_cycle_time)`; absent when there is nothing to balance.
    pub balance_efficiency: Option<f64>,
}

pub fn line_balance(geometry: &ChartGeometry) -> LineBalance {
    let total_work = geometry
        .bars
        .iter()
        .map(|b| b.cycle_time)
        .sum::<f64>()
        .min(f64::MAX);
    let max_cycle_time = geometry
        .bars
        .iter()
        .map(|b| b.cycle_time)
        .fold(0.0_f64, f64::max);
    let denom = (geometry.bars.len() as f64 * max_cycle_time).min(f64::MAX);

    LineBalance {
        total_work,
        max_cycle_time,
        bottleneck_count: geometry.bottlenecks().count(),
        balance_efficiency: (denom > 0.0).then(|| total_work / denom),
    }
}
