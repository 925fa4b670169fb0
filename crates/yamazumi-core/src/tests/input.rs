use crate::*;
use serde_json::json;

#[test]
fn parse_process_map_reads_editor_nodes_with_nested_data() {
    let text = r#"{
        "taktTime": 10,
        "nodes": [
            { "id": "a", "type": "process", "data": { "name": "Weld", "ct": 12 } },
            { "id": "s", "type": "start", "data": { "name": "Start" } },
            { "id": "b", "type": "Process", "data": { "name": "Paint", "ct": "8" } }
        ],
        "edges": [{ "source": "a", "target": "b" }]
    }"#;
    let map = parse_process_map(text).unwrap();
    assert_eq!(map.takt_time, 10.0);
    assert_eq!(map.nodes.len(), 3);
    assert_eq!(map.nodes[1].kind, NodeKind::Other("start".to_string()));
    assert_eq!(map.nodes[2].cycle_time, 8.0);

    let ids: Vec<&str> = map.process_nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn parse_process_map_accepts_flat_nodes_and_aliases() {
    let map = parse_process_map(
        r#"{"takt": "6.5", "nodes": [{"id": 7, "label": "Cut", "cycleTime": 4.25}]}"#,
    )
    .unwrap();
    assert_eq!(map.takt_time, 6.5);
    assert_eq!(map.nodes[0], ProcessNode::new("7", "Cut", 4.25));
}

#[test]
fn parse_process_map_accepts_bare_arrays() {
    let map = parse_process_map(r#"[{"id": "a", "name": "Weld", "ct": 3}]"#).unwrap();
    assert_eq!(map.takt_time, 0.0);
    assert_eq!(map.nodes.len(), 1);
}

#[test]
fn parse_process_map_coerces_malformed_fields() {
    let map = parse_process_map_value(&json!({
        "taktTime": "soon",
        "nodes": [
            { "name": "NaNish", "ct": "abc" },
            { "id": "", "ct": true },
            { "id": "neg", "ct": -4 },
            42
        ]
    }))
    .unwrap();
    assert_eq!(map.takt_time, 0.0);
    assert_eq!(map.nodes[0].id, "node-0");
    assert_eq!(map.nodes[0].cycle_time, 0.0);
    assert_eq!(map.nodes[1].id, "node-1");
    assert_eq!(map.nodes[1].name, "");
    assert_eq!(map.nodes[2].cycle_time, 0.0);
    assert_eq!(map.nodes[3], ProcessNode::new("node-3", "", 0.0));
}

#[test]
fn parse_process_map_keeps_duplicate_ids_in_order() {
    let map = parse_process_map(
        r#"{"nodes": [{"id": "a", "ct": 1}, {"id": "a", "ct": 2}]}"#,
    )
    .unwrap();
    let cts: Vec<f64> = map.nodes.iter().map(|n| n.cycle_time).collect();
    assert_eq!(cts, [1.0, 2.0]);
}

#[test]
fn parse_process_map_keeps_embedded_config() {
    let map = parse_process_map(
        r#"{"nodes": [], "config": {"yamazumi": {"barWidth": 40}}}"#,
    )
    .unwrap();
    assert_eq!(map.config, Some(json!({"yamazumi": {"barWidth": 40}})));
}

#[test]
fn parse_process_map_rejects_bad_top_level_shapes() {
    let err = parse_process_map("not json").unwrap_err();
    assert!(matches!(err, Error::InvalidJson { .. }));

    let err = parse_process_map("12").unwrap_err().to_string();
    assert_eq!(
        err,
        "Invalid process map: expected an object with `nodes` or an array of nodes"
    );

    let err = parse_process_map(r#"{"nodes": {"a": 1}}"#)
        .unwrap_err()
        .to_string();
    assert_eq!(err, "Invalid process map: `nodes` must be an array");
}

#[test]
fn parse_process_map_without_nodes_is_empty() {
    let map = parse_process_map(r#"{"taktTime": 5}"#).unwrap();
    assert!(map.nodes.is_empty());
    assert!(compute_geometry(&map.nodes, map.takt_time).no_data);
}
