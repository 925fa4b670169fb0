use crate::model::{
    AxisLayout, BarLayout, Bounds, ChartLayout, TaktLineLayout, TextAnchor, TextLayout, TickLayout,
};
use crate::text::{TextMeasurer, TextStyle, truncate_to_width};
use crate::{Error, LayoutOptions, Result};
use yamazumi_core::geom::{BarSlots, ratio_to_y};
use yamazumi_core::{Bar, ChartConfig, ChartGeometry, Labels};

#[derive(Debug, Clone)]
struct ChartTheme {
    background: String,
    text_color: String,
    bar_color: String,
    bottleneck_color: String,
    takt_line_color: String,
    axis_color: String,
}

#[derive(Debug, Clone)]
struct LayoutConfig {
    width: f64,
    height: f64,
    padding: f64,
    bar_width: f64,
    bar_gap: f64,
    label_font_size: f64,
    value_font_size: f64,
    show_values: bool,
    show_takt_label: bool,
    show_axis: bool,
    tick_count: usize,
    transition_ms: f64,
    theme: ChartTheme,
}

fn config_color(cfg: &ChartConfig, key: &str, default: &str) -> String {
    cfg.get_str(&format!("themeVariables.{key}"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn parse_layout_config(cfg: &ChartConfig) -> LayoutConfig {
    let num =
        |key: &str, default: f64| cfg.get_f64(&format!("yamazumi.{key}")).unwrap_or(default);
    let flag =
        |key: &str, default: bool| cfg.get_bool(&format!("yamazumi.{key}")).unwrap_or(default);

    LayoutConfig {
        width: num("width", 720.0),
        height: num("height", 360.0),
        padding: num("padding", 24.0).max(0.0),
        bar_width: num("barWidth", 56.0).max(1.0),
        bar_gap: num("barGap", 24.0).max(0.0),
        label_font_size: num("labelFontSize", 12.0).max(1.0),
        value_font_size: num("valueFontSize", 11.0).max(1.0),
        show_values: flag("showValues", true),
        show_takt_label: flag("showTaktLabel", true),
        show_axis: flag("showAxis", true),
        tick_count: num("tickCount", 5.0).clamp(1.0, 50.0) as usize,
        transition_ms: num("transitionMs", 300.0).max(0.0),
        theme: ChartTheme {
            background: config_color(cfg, "background", "white"),
            text_color: config_color(cfg, "textColor", "#333333"),
            bar_color: config_color(cfg, "barColor", "#60a5fa"),
            bottleneck_color: config_color(cfg, "bottleneckColor", "#ef4444"),
            takt_line_color: config_color(cfg, "taktLineColor", "#f97316"),
            axis_color: config_color(cfg, "axisColor", "#9ca3af"),
        },
    }
}

/// Labels numbers the way the chart prints them: at most two decimals, no trailing zeros.
pub fn fmt_number(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.005 {
        return "0".to_string();
    }
    let mut s = format!("{:.2}", (v * 100.0).round() / 100.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// D3-style "nice" ticks over `[start, stop]` (ascending input only).
pub(crate) fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 || stop < start {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Negative powers use an inverse increment to keep ticks like 0.1 exact.
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round() as i64;
        let mut i2 = (stop * inc).round() as i64;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        (i1..=i2).map(|i| i as f64 / inc).collect()
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round() as i64;
        let mut i2 = (stop / inc).round() as i64;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        (i1..=i2).map(|i| i as f64 * inc).collect()
    }
}

fn text(
    text: impl Into<String>,
    x: f64,
    y: f64,
    font_size: f64,
    anchor: TextAnchor,
    fill: &str,
) -> TextLayout {
    TextLayout {
        text: text.into(),
        x,
        y,
        font_size,
        anchor,
        fill: fill.to_string(),
    }
}

/// Maps normalized geometry onto a pixel canvas.
///
/// The canvas widens past `yamazumi.width` when the bars need more room; bars are never
/// narrower than `yamazumi.barWidth`.
pub fn layout_geometry(
    geometry: &ChartGeometry,
    config: &ChartConfig,
    options: &LayoutOptions,
) -> Result<ChartLayout> {
    let cfg = parse_layout_config(config);
    let labels = Labels::from_config(config);
    let measurer = options.text_measurer.as_ref();
    let theme = &cfg.theme;

    let ticks = if cfg.show_axis && !geometry.no_data {
        nice_ticks(0.0, geometry.scale_max, cfg.tick_count)
    } else {
        Vec::new()
    };
    let tick_style = TextStyle::sized(cfg.label_font_size);
    let axis_band = if ticks.is_empty() {
        0.0
    } else {
        let widest = ticks
            .iter()
            .map(|t| measurer.measure(&fmt_number(*t), &tick_style).width)
            .fold(0.0_f64, f64::max);
        widest + 8.0
    };

    let top_band = if cfg.show_values || cfg.show_takt_label {
        cfg.value_font_size * 1.5
    } else {
        0.0
    };
    let label_band = cfg.label_font_size * 2.0;

    let plot_x = cfg.padding + axis_band;
    let plot_y = cfg.padding + top_band;
    let plot_height = cfg.height - plot_y - cfg.padding - label_band;
    let slots = BarSlots {
        origin_x: plot_x,
        baseline: plot_y + plot_height,
        bar_width: cfg.bar_width,
        gap: cfg.bar_gap,
    };
    let plot_width =
        (cfg.width - 2.0 * cfg.padding - axis_band).max(slots.span(geometry.bars.len()));
    if !(plot_width > 0.0) || !(plot_height > 0.0) {
        return Err(Error::InvalidLayout {
            message: format!(
                "no drawable area left in a {}x{} chart (plot {}x{})",
                fmt_number(cfg.width),
                fmt_number(cfg.height),
                fmt_number(plot_width),
                fmt_number(plot_height)
            ),
        });
    }

    let plot = Bounds {
        min_x: plot_x,
        min_y: plot_y,
        max_x: plot_x + plot_width,
        max_y: plot_y + plot_height,
    };
    let baseline = plot.max_y;
    let width = plot.max_x + cfg.padding;
    let height = cfg.height;

    let bars = geometry
        .bars
        .iter()
        .enumerate()
        .map(|(idx, bar)| layout_bar(idx, bar, &slots, plot.height(), &cfg, measurer))
        .collect::<Vec<_>>();

    let takt_line = geometry.takt_line_ratio.map(|ratio| {
        let y = ratio_to_y(baseline, plot_height, ratio);
        let label = cfg.show_takt_label.then(|| {
            text(
                format!("{} {}", labels.takt, fmt_number(geometry.takt_time)),
                plot.max_x,
                y - 4.0,
                cfg.value_font_size,
                TextAnchor::End,
                &theme.takt_line_color,
            )
        });
        TaktLineLayout {
            x1: plot.min_x,
            x2: plot.max_x,
            y,
            stroke: theme.takt_line_color.clone(),
            label,
        }
    });

    let axis = (!ticks.is_empty()).then(|| AxisLayout {
        x: plot.min_x,
        y_top: plot.min_y,
        y_bottom: baseline,
        x_right: plot.max_x,
        stroke: theme.axis_color.clone(),
        ticks: ticks
            .iter()
            .map(|&value| {
                let y = ratio_to_y(baseline, plot_height, value / geometry.scale_max);
                TickLayout {
                    value,
                    y,
                    label: text(
                        fmt_number(value),
                        plot.min_x - 6.0,
                        y + cfg.label_font_size * 0.35,
                        cfg.label_font_size,
                        TextAnchor::End,
                        &theme.text_color,
                    ),
                }
            })
            .collect(),
    });

    let no_data = geometry.no_data.then(|| {
        text(
            labels.no_data.clone(),
            width / 2.0,
            plot.min_y + plot_height / 2.0,
            cfg.label_font_size * 1.2,
            TextAnchor::Middle,
            &theme.text_color,
        )
    });

    tracing::debug!(
        width,
        height,
        bars = bars.len(),
        ticks = ticks.len(),
        "laid out yamazumi chart"
    );

    Ok(ChartLayout {
        width,
        height,
        plot,
        background_color: theme.background.clone(),
        text_color: theme.text_color.clone(),
        transition_ms: cfg.transition_ms,
        bars,
        takt_line,
        axis,
        no_data,
    })
}

fn layout_bar(
    idx: usize,
    bar: &Bar,
    slots: &BarSlots,
    plot_height: f64,
    cfg: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> BarLayout {
    let height = bar.height_ratio * plot_height;
    let r = slots.bar_rect(idx, height);
    let center_x = r.center().x;

    let label_style = TextStyle::sized(cfg.label_font_size);
    let label_text =
        truncate_to_width(&bar.label, slots.slot_width() - 4.0, &label_style, measurer);
    let label = text(
        label_text,
        center_x,
        slots.baseline + cfg.label_font_size * 1.4,
        cfg.label_font_size,
        TextAnchor::Middle,
        &cfg.theme.text_color,
    );
    let value_label = cfg.show_values.then(|| {
        text(
            fmt_number(bar.cycle_time),
            center_x,
            r.min_y() - 4.0,
            cfg.value_font_size,
            TextAnchor::Middle,
            &cfg.theme.text_color,
        )
    });

    tracing::trace!(id = %bar.id, x = r.min_x(), height, "bar");

    BarLayout {
        id: bar.id.clone(),
        x: r.min_x(),
        y: r.min_y(),
        width: r.width(),
        height: r.height(),
        fill: if bar.is_bottleneck {
            cfg.theme.bottleneck_color.clone()
        } else {
            cfg.theme.bar_color.clone()
        },
        is_bottleneck: bar.is_bottleneck,
        full_label: bar.label.clone(),
        label,
        value_label,
    }
}
