use serde_json::json;
use yamazumi_core::{ChartConfig, ProcessNode, compute_geometry, parse_process_map};
use yamazumi_render::model::TextAnchor;
use yamazumi_render::{Error, LayoutOptions, layout_geometry, layout_process_map};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn weld_and_paint() -> Vec<ProcessNode> {
    vec![
        ProcessNode::new("a", "Weld", 12.0),
        ProcessNode::new("b", "Paint", 8.0),
    ]
}

#[test]
fn layout_maps_ratios_onto_the_plot_area() {
    let g = compute_geometry(&weld_and_paint(), 10.0);
    let layout =
        layout_geometry(&g, &ChartConfig::default(), &LayoutOptions::default()).unwrap();

    assert!(approx(layout.width, 720.0));
    assert!(approx(layout.height, 360.0));
    // Left band fits the widest tick label ("14") plus spacing.
    assert!(approx(layout.plot.min_x, 46.4));
    assert!(approx(layout.plot.min_y, 40.5));
    assert!(approx(layout.plot.max_y, 312.0));

    let weld = &layout.bars[0];
    assert_eq!(weld.id, "a");
    assert!(approx(weld.x, 58.4));
    assert!(approx(weld.width, 56.0));
    assert!(approx(weld.height, 0.8 * 271.5));
    assert!(approx(weld.y + weld.height, 312.0));
    assert!(weld.is_bottleneck);
    assert_eq!(weld.fill, "#ef4444");
    assert_eq!(weld.value_label.as_ref().unwrap().text, "12");
    assert_eq!(weld.label.text, "Weld");
    assert_eq!(weld.label.anchor, TextAnchor::Middle);

    let paint = &layout.bars[1];
    assert!(approx(paint.x, 58.4 + 80.0));
    assert!(!paint.is_bottleneck);
    assert_eq!(paint.fill, "#60a5fa");

    let takt = layout.takt_line.as_ref().unwrap();
    assert!(approx(takt.y, 131.0));
    assert!(approx(takt.x1, layout.plot.min_x));
    assert!(approx(takt.x2, layout.plot.max_x));
    assert_eq!(takt.label.as_ref().unwrap().text, "Takt 10");

    let axis = layout.axis.as_ref().unwrap();
    let values: Vec<f64> = axis.ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
    assert!(approx(axis.ticks[0].y, 312.0));
    assert!(layout.no_data.is_none());
}

#[test]
fn layout_of_empty_geometry_shows_no_data_message() {
    let g = compute_geometry(&[], 5.0);
    let layout =
        layout_geometry(&g, &ChartConfig::default(), &LayoutOptions::default()).unwrap();
    assert!(layout.bars.is_empty());
    assert!(layout.axis.is_none());
    let msg = layout.no_data.as_ref().unwrap();
    assert_eq!(msg.text, "No process data");
    assert!(approx(msg.x, layout.width / 2.0));
    // The takt line still marks the (empty) scale.
    assert!(layout.takt_line.is_some());
}

#[test]
fn layout_widens_canvas_instead_of_squeezing_bars() {
    let nodes: Vec<ProcessNode> = (0..20)
        .map(|i| ProcessNode::new(format!("p{i}"), format!("Step {i}"), i as f64))
        .collect();
    let g = compute_geometry(&nodes, 0.0);
    let layout =
        layout_geometry(&g, &ChartConfig::default(), &LayoutOptions::default()).unwrap();
    assert!(approx(layout.plot.width(), 20.0 * 80.0));
    assert!(approx(layout.width, layout.plot.max_x + 24.0));
    assert!(layout.bars.iter().all(|b| approx(b.width, 56.0)));
    assert!(layout.takt_line.is_none());
}

#[test]
fn layout_truncates_long_labels_but_keeps_full_name() {
    let g = compute_geometry(
        &[ProcessNode::new("a", "Final assembly and inspection", 3.0)],
        0.0,
    );
    let layout =
        layout_geometry(&g, &ChartConfig::default(), &LayoutOptions::default()).unwrap();
    assert_eq!(layout.bars[0].label.text, "Final ass…");
    assert_eq!(layout.bars[0].full_label, "Final assembly and inspection");
}

#[test]
fn layout_honors_config_overrides_and_locale() {
    let cfg = ChartConfig::with_overrides(&json!({
        "locale": "zh",
        "yamazumi": { "showValues": false, "showAxis": false, "barWidth": 30, "barGap": 10 },
        "themeVariables": { "bottleneckColor": "crimson" }
    }))
    .unwrap();
    let g = compute_geometry(&weld_and_paint(), 10.0);
    let layout = layout_geometry(&g, &cfg, &LayoutOptions::default()).unwrap();

    assert!(layout.axis.is_none());
    assert!(layout.bars.iter().all(|b| b.value_label.is_none()));
    assert!(approx(layout.bars[1].x - layout.bars[0].x, 40.0));
    assert_eq!(layout.bars[0].fill, "crimson");
    assert_eq!(
        layout.takt_line.as_ref().unwrap().label.as_ref().unwrap().text,
        "节拍 10"
    );
}

#[test]
fn layout_rejects_charts_without_drawable_area() {
    let cfg = ChartConfig::with_overrides(&json!({"yamazumi": {"height": 60}})).unwrap();
    let g = compute_geometry(&weld_and_paint(), 10.0);
    let err = layout_geometry(&g, &cfg, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidLayout { .. }));
}

#[test]
fn layout_process_map_bundles_geometry_and_layout() {
    let map = parse_process_map(
        r#"{"taktTime": 10, "nodes": [{"id": "a", "data": {"name": "Weld", "ct": 12}}]}"#,
    )
    .unwrap();
    let chart =
        layout_process_map(&map, &ChartConfig::default(), &LayoutOptions::default()).unwrap();
    assert_eq!(chart.geometry.bars.len(), 1);
    assert_eq!(chart.layout.bars.len(), 1);

    let value = serde_json::to_value(&chart).unwrap();
    assert_eq!(value["geometry"]["scaleMax"], json!(15.0));
    assert_eq!(value["layout"]["bars"][0]["isBottleneck"], json!(true));
}
