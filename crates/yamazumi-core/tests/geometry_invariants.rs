use proptest::prelude::*;
use yamazumi_core::{MIN_SCALE_MAX, NodeKind, ProcessNode, TAKT_HEADROOM, compute_geometry};

fn cycle_time_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => 0.0f64..1.0e6,
        1 => 1.0e300f64..f64::MAX,
        1 => Just(0.0),
        1 => -1.0e3f64..0.0,
        1 => prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
    ]
}

fn node_strategy() -> impl Strategy<Value = ProcessNode> {
    (any::<u16>(), "[a-zA-Z ]{0,8}", cycle_time_strategy(), any::<bool>()).prop_map(
        |(id, name, ct, is_process)| {
            let mut node = ProcessNode::new(format!("n{id}"), name, 0.0);
            // Bypass the constructor's coercion so the engine sees raw values.
            node.cycle_time = ct;
            if !is_process {
                node.kind = NodeKind::Other("buffer".to_string());
            }
            node
        },
    )
}

proptest! {
    #[test]
    fn height_ratios_stay_within_unit_interval(
        nodes in prop::collection::vec(node_strategy(), 0..24),
        takt in cycle_time_strategy(),
    ) {
        let g = compute_geometry(&nodes, takt);
        for bar in &g.bars {
            prop_assert!((0.0..=1.0).contains(&bar.height_ratio), "ratio {}", bar.height_ratio);
        }
        if let Some(r) = g.takt_line_ratio {
            prop_assert!((0.0..=1.0).contains(&r), "takt ratio {}", r);
            if g.takt_time <= f64::MAX / TAKT_HEADROOM {
                prop_assert!(r <= 1.0 / TAKT_HEADROOM + 1e-12);
            }
        }
    }

    #[test]
    fn scale_max_dominates_every_input(
        nodes in prop::collection::vec(node_strategy(), 0..24),
        takt in cycle_time_strategy(),
    ) {
        let g = compute_geometry(&nodes, takt);
        prop_assert!(g.scale_max.is_finite());
        prop_assert!(g.scale_max >= MIN_SCALE_MAX);
        prop_assert!(g.scale_max >= (g.takt_time * TAKT_HEADROOM).min(f64::MAX));
        for bar in &g.bars {
            prop_assert!(g.scale_max >= bar.cycle_time);
        }
        prop_assert_eq!(g.no_data, g.bars.is_empty());
    }

    #[test]
    fn disabled_takt_never_marks_bottlenecks(
        nodes in prop::collection::vec(node_strategy(), 0..24),
        takt in -1.0e6f64..=0.0,
    ) {
        let g = compute_geometry(&nodes, takt);
        prop_assert!(g.bars.iter().all(|b| !b.is_bottleneck));
        prop_assert_eq!(g.takt_line_ratio, None);
    }

    #[test]
    fn bars_follow_process_nodes_in_input_order(
        nodes in prop::collection::vec(node_strategy(), 0..24),
        takt in cycle_time_strategy(),
    ) {
        let g = compute_geometry(&nodes, takt);
        let expected: Vec<&str> = nodes
            .iter()
            .filter(|n| n.kind.is_process())
            .map(|n| n.id.as_str())
            .collect();
        let actual: Vec<&str> = g.bars.iter().map(|b| b.id.as_str()).collect();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn recomputation_is_bit_identical(
        nodes in prop::collection::vec(node_strategy(), 0..24),
        takt in cycle_time_strategy(),
    ) {
        let a = compute_geometry(&nodes, takt);
        let b = compute_geometry(&nodes, takt);
        prop_assert_eq!(a.scale_max.to_bits(), b.scale_max.to_bits());
        prop_assert_eq!(a.bars.len(), b.bars.len());
        for (x, y) in a.bars.iter().zip(&b.bars) {
            prop_assert_eq!(x.height_ratio.to_bits(), y.height_ratio.to_bits());
            prop_assert_eq!(x.is_bottleneck, y.is_bottleneck);
        }
    }
}
