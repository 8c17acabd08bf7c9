// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cluster planning: which rows to materialize for a scroll position.
//!
//! Rows are grouped into blocks of `rows_per_block`, and blocks into clusters
//! of `blocks_per_cluster`. The planner locates the cluster containing the
//! block under the scroll offset and materializes a window of three clusters
//! around it: the previous one, the current one, and the next one. Scrolling
//! anywhere inside the current cluster therefore maps to the same window, and
//! a new window is only needed once the viewport crosses a cluster boundary.
//! When the viewport is taller than a cluster, the trailing side grows by as
//! many clusters as needed to cover it.
//!
//! Everything outside the window is stood in for by two spacers whose
//! extents are exact multiples of the row height, so the scrollable extent is
//! always `total_rows * row_height` regardless of how few rows exist.

use core::ops::Range;

use crate::{Metrics, Scalar};

/// Inputs to [`plan_cluster`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanInput<S> {
    /// Current scroll offset. Clamped to the scrollable range before use.
    pub scroll_offset: S,
    /// Height of the visible viewport.
    pub viewport_extent: S,
    /// Measured row height, or `None` while unknown.
    pub row_height: Option<S>,
    /// Number of rows in the list.
    pub total_rows: usize,
    /// Rows per block. Zero is treated as one.
    pub rows_per_block: usize,
    /// Blocks per cluster. Zero is treated as one.
    pub blocks_per_cluster: usize,
    /// Extend odd-length ranges by one row when possible.
    pub keep_parity: bool,
}

impl<S: Scalar> PlanInput<S> {
    /// Builds planner input from list metrics and the current scroll state.
    #[must_use]
    pub fn from_metrics(
        metrics: &Metrics<S>,
        total_rows: usize,
        scroll_offset: S,
        viewport_extent: S,
        keep_parity: bool,
    ) -> Self {
        Self {
            scroll_offset,
            viewport_extent,
            row_height: metrics.row_height(),
            total_rows,
            rows_per_block: metrics.rows_per_block(),
            blocks_per_cluster: metrics.blocks_per_cluster(),
            keep_parity,
        }
    }
}

/// The materialized portion of a list.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterWindow<S> {
    /// Row indices to materialize, `start..end`.
    pub rows: Range<usize>,
    /// Blocks touched by `rows`, `first..last + 1`.
    pub blocks: Range<usize>,
    /// Extent of the spacer standing in for rows before `rows.start`.
    pub top_spacer: S,
    /// Extent of the spacer standing in for rows from `rows.end` onward.
    pub bottom_spacer: S,
    /// Whether the host should emit one extra hidden element ahead of the
    /// top spacer, so nth-child styling of the rows stays aligned.
    pub parity_filler: bool,
}

impl<S: Scalar> ClusterWindow<S> {
    /// A window that materializes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: 0..0,
            blocks: 0..0,
            top_spacer: S::zero(),
            bottom_spacer: S::zero(),
            parity_filler: false,
        }
    }

    /// A window over `rows` with no spacers.
    ///
    /// Used when a list is not virtualized at all.
    #[must_use]
    pub fn unspaced(rows: Range<usize>, rows_per_block: usize) -> Self {
        let blocks = block_span(&rows, rows_per_block.max(1));
        Self {
            rows,
            blocks,
            top_spacer: S::zero(),
            bottom_spacer: S::zero(),
            parity_filler: false,
        }
    }

    /// Returns the number of materialized rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows are materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first block touched by the window.
    #[must_use]
    pub fn first_block(&self) -> usize {
        self.blocks.start
    }

    /// Returns the last block touched by the window, if any.
    #[must_use]
    pub fn last_block(&self) -> Option<usize> {
        self.blocks.end.checked_sub(1).filter(|_| !self.blocks.is_empty())
    }

    /// Returns the spacers plus the materialized rows at `row_height`.
    ///
    /// For a planned window this equals `total_rows * row_height`.
    #[must_use]
    pub fn total_extent(&self, row_height: S) -> S {
        self.top_spacer + S::from_usize(self.len()) * row_height + self.bottom_spacer
    }
}

/// Result of re-planning against a previous window.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanOutcome<S> {
    /// The window is identical; nothing needs to be written.
    Unchanged,
    /// Same rows and top spacer; only the bottom spacer differs.
    TrailingSpacer(ClusterWindow<S>),
    /// The materialized rows or top spacer changed.
    Changed(ClusterWindow<S>),
}

impl<S> PlanOutcome<S> {
    /// Returns the new window, if any.
    #[must_use]
    pub fn window(&self) -> Option<&ClusterWindow<S>> {
        match self {
            Self::Unchanged => None,
            Self::TrailingSpacer(window) | Self::Changed(window) => Some(window),
        }
    }

    /// Returns `true` for [`PlanOutcome::Unchanged`].
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Computes the window to materialize for `input`.
///
/// - Without a known row height, the leading cluster is materialized with no
///   spacers.
/// - Lists no longer than one cluster are materialized whole with no spacers.
/// - Otherwise the three-cluster window around the scroll offset is returned,
///   clamped to `0..total_rows`.
#[must_use]
pub fn plan_cluster<S: Scalar>(input: &PlanInput<S>) -> ClusterWindow<S> {
    let rows_per_block = input.rows_per_block.max(1);
    let blocks_per_cluster = input.blocks_per_cluster.max(1);
    let rows_per_cluster = rows_per_block.saturating_mul(blocks_per_cluster);
    let total = input.total_rows;

    let Some(row_height) = input.row_height.filter(|h| h.is_positive_finite()) else {
        return ClusterWindow::unspaced(0..total.min(rows_per_cluster), rows_per_block);
    };
    if total <= rows_per_cluster {
        return ClusterWindow::unspaced(0..total, rows_per_block);
    }

    let block_height = row_height * S::from_usize(rows_per_block);
    let cluster_height = block_height * S::from_usize(blocks_per_cluster);
    let viewport = input.viewport_extent.clamp_non_negative();
    let content = row_height * S::from_usize(total);
    let max_scroll = (content - viewport).clamp_non_negative();
    let scroll = input.scroll_offset.clamp_non_negative().min(max_scroll);

    let block = (scroll / block_height).floor_to_usize();
    let cluster = block / blocks_per_cluster;
    let lookahead = if viewport.is_finite() {
        viewport.ceil_div_to_usize(cluster_height).max(1)
    } else {
        1
    };

    let start_block = cluster.saturating_sub(1).saturating_mul(blocks_per_cluster);
    let end_block = cluster
        .saturating_add(1)
        .saturating_add(lookahead)
        .saturating_mul(blocks_per_cluster);
    let start = start_block.saturating_mul(rows_per_block).min(total);
    let mut end = end_block.saturating_mul(rows_per_block).min(total);
    if input.keep_parity && !(end - start).is_multiple_of(2) && end < total {
        end += 1;
    }

    ClusterWindow {
        blocks: block_span(&(start..end), rows_per_block),
        top_spacer: S::from_usize(start) * row_height,
        bottom_spacer: S::from_usize(total - end) * row_height,
        parity_filler: input.keep_parity && start > 0,
        rows: start..end,
    }
}

/// Plans against `previous` and classifies what changed.
///
/// Passing `None` always yields [`PlanOutcome::Changed`], which is how
/// structural changes bypass the unchanged shortcut.
#[must_use]
pub fn replan<S: Scalar>(
    input: &PlanInput<S>,
    previous: Option<&ClusterWindow<S>>,
) -> PlanOutcome<S> {
    let next = plan_cluster(input);
    match previous {
        Some(prev) if *prev == next => {
            log::trace!("cluster window unchanged at rows {:?}", next.rows);
            PlanOutcome::Unchanged
        }
        Some(prev)
            if prev.rows == next.rows
                && prev.top_spacer == next.top_spacer
                && prev.parity_filler == next.parity_filler =>
        {
            log::trace!(
                "cluster window rows {:?} kept, bottom spacer {:?} -> {:?}",
                next.rows,
                prev.bottom_spacer,
                next.bottom_spacer
            );
            PlanOutcome::TrailingSpacer(next)
        }
        _ => {
            log::trace!(
                "cluster window moved to rows {:?} (blocks {:?})",
                next.rows,
                next.blocks
            );
            PlanOutcome::Changed(next)
        }
    }
}

fn block_span(rows: &Range<usize>, rows_per_block: usize) -> Range<usize> {
    if rows.is_empty() {
        let first = rows.start / rows_per_block;
        return first..first;
    }
    rows.start / rows_per_block..rows.end.div_ceil(rows_per_block)
}
