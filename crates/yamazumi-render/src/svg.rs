use crate::model::{ChartLayout, TextLayout};
use crate::Result;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the chart canvas.
    pub viewbox_padding: f64,
    /// Root `<svg id>`; also prefixes the scoped CSS rules.
    pub diagram_id: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 0.0,
            diagram_id: None,
        }
    }
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal, without `-0` or float noise from layout arithmetic.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    } else {
        v = (v * 1000.0).round() / 1000.0;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn chart_css(id: &str, layout: &ChartLayout) -> String {
    format!(
        r#"#{id}{{font-family:"trebuchet ms",verdana,arial,sans-serif;fill:{text};}}#{id} .bar rect{{transition:height {ms}ms ease,y {ms}ms ease;}}#{id} .takt-line{{stroke-dasharray:6 4;stroke-width:2;}}#{id} .axis line{{stroke-width:1;}}"#,
        id = id,
        text = escape_xml(&layout.text_color),
        ms = fmt(layout.transition_ms),
    )
}

fn write_text(out: &mut String, class: &str, t: &TextLayout) {
    let _ = write!(
        out,
        r#"<text class="{class}" x="{x}" y="{y}" font-size="{size}" text-anchor="{anchor}" fill="{fill}">{text}</text>"#,
        class = class,
        x = fmt(t.x),
        y = fmt(t.y),
        size = fmt(t.font_size),
        anchor = t.anchor.as_svg(),
        fill = escape_xml(&t.fill),
        text = escape_xml(&t.text),
    );
}

pub fn render_svg(layout: &ChartLayout, options: &SvgRenderOptions) -> Result<String> {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("yamazumi");
    let diagram_id_esc = escape_xml(diagram_id);

    let pad = options.viewbox_padding.max(0.0);
    let vb_w = (layout.width + pad * 2.0).max(1.0);
    let vb_h = (layout.height + pad * 2.0).max(1.0);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="100%" xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" style="max-width: {w}px;">"#,
        id = diagram_id_esc,
        x = fmt(-pad),
        y = fmt(-pad),
        w = fmt(vb_w),
        h = fmt(vb_h),
    );
    let _ = write!(
        &mut out,
        r#"<style>{}</style>"#,
        chart_css(&diagram_id_esc, layout)
    );
    let _ = write!(
        &mut out,
        r#"<rect class="background" x="0" y="0" width="{w}" height="{h}" fill="{fill}"/>"#,
        w = fmt(layout.width),
        h = fmt(layout.height),
        fill = escape_xml(&layout.background_color),
    );

    if let Some(axis) = &layout.axis {
        let stroke = escape_xml(&axis.stroke);
        out.push_str(r#"<g class="axis">"#);
        let _ = write!(
            &mut out,
            r#"<line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="{stroke}"/>"#,
            x = fmt(axis.x),
            y1 = fmt(axis.y_top),
            y2 = fmt(axis.y_bottom),
            stroke = stroke,
        );
        let _ = write!(
            &mut out,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{stroke}"/>"#,
            x1 = fmt(axis.x),
            x2 = fmt(axis.x_right),
            y = fmt(axis.y_bottom),
            stroke = stroke,
        );
        for tick in &axis.ticks {
            let _ = write!(
                &mut out,
                r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{stroke}"/>"#,
                x1 = fmt(axis.x - 4.0),
                x2 = fmt(axis.x),
                y = fmt(tick.y),
                stroke = stroke,
            );
            write_text(&mut out, "tick-label", &tick.label);
        }
        out.push_str("</g>");
    }

    out.push_str(r#"<g class="bars">"#);
    for bar in &layout.bars {
        let _ = write!(
            &mut out,
            r#"<g class="bar" data-id="{id}" data-bottleneck="{bottleneck}">"#,
            id = escape_xml(&bar.id),
            bottleneck = bar.is_bottleneck,
        );
        let _ = write!(
            &mut out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="2" fill="{fill}"><title>{title}</title></rect>"#,
            x = fmt(bar.x),
            y = fmt(bar.y),
            w = fmt(bar.width),
            h = fmt(bar.height),
            fill = escape_xml(&bar.fill),
            title = escape_xml(&bar.full_label),
        );
        if let Some(v) = &bar.value_label {
            write_text(&mut out, "bar-value", v);
        }
        write_text(&mut out, "bar-label", &bar.label);
        out.push_str("</g>");
    }
    out.push_str("</g>");

    if let Some(takt) = &layout.takt_line {
        out.push_str(r#"<g class="takt">"#);
        let _ = write!(
            &mut out,
            r#"<line class="takt-line" x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{stroke}"/>"#,
            x1 = fmt(takt.x1),
            x2 = fmt(takt.x2),
            y = fmt(takt.y),
            stroke = escape_xml(&takt.stroke),
        );
        if let Some(label) = &takt.label {
            write_text(&mut out, "takt-label", label);
        }
        out.push_str("</g>");
    }

    if let Some(msg) = &layout.no_data {
        write_text(&mut out, "no-data", msg);
    }

    out.push_str("</svg>");
    Ok(out)
}
