#![forbid(unsafe_code)]

//! `yamazumi` turns a process map into a Yamazumi (work-balance) chart, headless.
//!
//! The core API (re-exported from `yamazumi-core`) computes normalized geometry: bar height
//! ratios, bottleneck flags and the takt-line position.
//!
//! # Features
//!
//! - `render`: pixel layout + SVG output (`yamazumi::render`)
//! - `raster`: PNG output via pure-Rust SVG rasterization

pub use yamazumi_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use yamazumi_render::model::{ChartLayout, LayoutedChart};
    pub use yamazumi_render::svg::{SvgRenderOptions, render_svg};
    pub use yamazumi_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use yamazumi_render::{LayoutOptions, layout_geometry, layout_process_map};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] yamazumi_core::Error),
        #[error(transparent)]
        Render(#[from] yamazumi_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token suitable for embedding
    /// several charts in the same page.
    ///
    /// The id also scopes the chart's CSS rules, so two inlined charts must not share one.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "y-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "y-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "y" {
            return "y-untitled".to_string();
        }
        out.to_string()
    }

    /// Effective config for `map`: site defaults, then the map's embedded `config`, then
    /// `overrides`.
    pub fn effective_config(
        map: &yamazumi_core::ProcessMap,
        overrides: Option<&serde_json::Value>,
    ) -> Result<yamazumi_core::ChartConfig> {
        let mut config = yamazumi_core::ChartConfig::default();
        if let Some(embedded) = map.config.as_ref() {
            config.merge_overrides(embedded)?;
        }
        if let Some(overrides) = overrides {
            config.merge_overrides(overrides)?;
        }
        Ok(config)
    }

    /// Parses, lays out and renders a process map document in one call.
    pub fn render_svg_sync(
        text: &str,
        overrides: Option<&serde_json::Value>,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let map = yamazumi_core::parse_process_map(text)?;
        let config = effective_config(&map, overrides)?;
        let chart = layout_process_map(&map, &config, layout_options)?;
        Ok(yamazumi_render::svg::render_svg(&chart.layout, svg_options)?)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn sanitize_svg_id_produces_safe_tokens() {
            assert_eq!(sanitize_svg_id("Line 3 / Body"), "Line-3-Body");
            assert_eq!(sanitize_svg_id("42"), "y-42");
            assert_eq!(sanitize_svg_id("  "), "y-untitled");
            assert_eq!(sanitize_svg_id("***"), "y-untitled");
        }

        #[test]
        fn render_svg_sync_applies_embedded_then_explicit_config() {
            let text = r#"{
                "taktTime": 10,
                "nodes": [{"id": "a", "name": "Weld", "ct": 12}],
                "config": {"themeVariables": {"bottleneckColor": "maroon", "barColor": "navy"}}
            }"#;
            let overrides = json!({"themeVariables": {"bottleneckColor": "black"}});
            let svg = render_svg_sync(
                text,
                Some(&overrides),
                &LayoutOptions::default(),
                &SvgRenderOptions::default(),
            )
            .unwrap();
            assert!(svg.contains(r#"fill="black""#));
            assert!(!svg.contains("maroon"));
        }

        #[test]
        fn render_svg_sync_reports_parse_errors() {
            let err = render_svg_sync(
                "{",
                None,
                &LayoutOptions::default(),
                &SvgRenderOptions::default(),
            )
            .unwrap_err();
            assert!(matches!(err, HeadlessError::Parse(_)));
        }
    }
}
