// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for cluster planning.

use proptest::prelude::*;
use understory_cluster_list::{PlanInput, plan_cluster, replan};

fn plan_input(
    scroll_fraction: f64,
    viewport: f64,
    row_height: f64,
    total_rows: usize,
    rows_per_block: usize,
    blocks_per_cluster: usize,
    keep_parity: bool,
) -> PlanInput<f64> {
    let content = total_rows as f64 * row_height;
    PlanInput {
        scroll_offset: scroll_fraction * content,
        viewport_extent: viewport,
        row_height: Some(row_height),
        total_rows,
        rows_per_block,
        blocks_per_cluster,
        keep_parity,
    }
}

proptest! {
    #[test]
    fn spacers_and_rows_reproduce_the_full_extent(
        scroll_fraction in 0.0_f64..=1.0,
        viewport in 0.0_f64..2_000.0,
        row_height in 1_u8..64,
        total_rows in 0_usize..5_000,
        rows_per_block in 1_usize..20,
        blocks_per_cluster in 1_usize..6,
        keep_parity in any::<bool>(),
    ) {
        let row_height = f64::from(row_height);
        let input = plan_input(
            scroll_fraction, viewport, row_height, total_rows,
            rows_per_block, blocks_per_cluster, keep_parity,
        );
        let window = plan_cluster(&input);

        prop_assert!(window.rows.end <= total_rows);
        prop_assert!(window.rows.start <= window.rows.end);
        prop_assert!(window.top_spacer >= 0.0);
        prop_assert!(window.bottom_spacer >= 0.0);
        let expected = total_rows as f64 * row_height;
        prop_assert!((window.total_extent(row_height) - expected).abs() < 1e-6);
    }

    #[test]
    fn materialized_rows_cover_the_viewport(
        scroll_fraction in 0.0_f64..=1.0,
        viewport in 0.0_f64..2_000.0,
        row_height in 1_u8..64,
        total_rows in 0_usize..5_000,
        rows_per_block in 1_usize..20,
        blocks_per_cluster in 1_usize..6,
    ) {
        let row_height = f64::from(row_height);
        let input = plan_input(
            scroll_fraction, viewport, row_height, total_rows,
            rows_per_block, blocks_per_cluster, true,
        );
        let window = plan_cluster(&input);

        let content = total_rows as f64 * row_height;
        let scroll = input.scroll_offset.min((content - viewport).max(0.0));
        let visible_end = (scroll + viewport).min(content);
        prop_assert!(window.top_spacer <= scroll + 1e-6);
        prop_assert!(window.rows.end as f64 * row_height + 1e-6 >= visible_end);
    }

    #[test]
    fn scrolling_within_a_cluster_keeps_the_window(
        cluster in 0_usize..50,
        a in 0.0_f64..1.0,
        b in 0.0_f64..1.0,
        viewport in 0.0_f64..500.0,
        row_height in 1_u8..64,
        total_rows in 0_usize..5_000,
        rows_per_block in 1_usize..20,
        blocks_per_cluster in 1_usize..6,
    ) {
        let row_height = f64::from(row_height);
        let cluster_height = row_height * (rows_per_block * blocks_per_cluster) as f64;
        let offset = |fraction: f64| (cluster as f64 + fraction * 0.99) * cluster_height;

        let mut first = plan_input(
            0.0, viewport, row_height, total_rows,
            rows_per_block, blocks_per_cluster, true,
        );
        first.scroll_offset = offset(a);
        let mut second = first;
        second.scroll_offset = offset(b);

        let window = plan_cluster(&first);
        prop_assert!(replan(&second, Some(&window)).is_unchanged());
    }
}
