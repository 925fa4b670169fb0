use serde::{Deserialize, Serialize};
use yamazumi_core::ChartGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarLayout {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub is_bottleneck: bool,
    /// Untruncated process name (tooltip text).
    pub full_label: String,
    pub label: TextLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_label: Option<TextLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaktLineLayout {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub stroke: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<TextLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickLayout {
    pub value: f64,
    pub y: f64,
    pub label: TextLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLayout {
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub x_right: f64,
    pub stroke: String,
    pub ticks: Vec<TickLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot: Bounds,
    pub background_color: String,
    pub text_color: String,
    pub transition_ms: f64,
    pub bars: Vec<BarLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub takt_line: Option<TaktLineLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisLayout>,
    /// Empty-state message; set exactly when the geometry has no bars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_data: Option<TextLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutedChart {
    pub geometry: ChartGeometry,
    pub layout: ChartLayout,
}
