// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row height measurement and derived block/cluster metrics.

use crate::Scalar;

/// The measured extent of a run of materialized rows.
///
/// Hosts produce this by measuring the rows they currently have on screen,
/// for example the distance from the top of the first probed row to the
/// bottom of the last one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Probe<S> {
    /// Total extent covered by the probed rows.
    pub extent: S,
    /// Number of rows covered by `extent`.
    pub rows: usize,
}

impl<S: Scalar> Probe<S> {
    /// Creates a probe result.
    #[must_use]
    pub fn new(extent: S, rows: usize) -> Self {
        Self { extent, rows }
    }

    /// A probe over nothing; it never yields a row height.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(S::zero(), 0)
    }

    /// Returns the per-row height, or `None` if the probe cannot provide one.
    ///
    /// Probes over zero rows, or with a non-positive or non-finite extent,
    /// yield `None`.
    #[must_use]
    pub fn row_height(&self) -> Option<S> {
        if self.rows == 0 {
            return None;
        }
        let height = self.extent / S::from_usize(self.rows);
        height.is_positive_finite().then_some(height)
    }
}

/// Capability to measure materialized rows.
///
/// The list never reads layout itself; the host implements this on whatever
/// it renders into.
pub trait Measurer<S: Scalar> {
    /// Error raised by the host. The list propagates it unchanged.
    type Error;

    /// Measures up to `max_rows` of the currently materialized rows.
    ///
    /// Returning a probe over zero rows is allowed and means that nothing can
    /// be measured yet.
    fn measure(&mut self, max_rows: usize) -> Result<Probe<S>, Self::Error>;
}

/// Row height plus the block and cluster sizes derived from it.
///
/// The row height starts unknown and becomes known after the first probe
/// that covers at least one row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Metrics<S> {
    row_height: Option<S>,
    rows_per_block: usize,
    blocks_per_cluster: usize,
}

impl<S: Scalar> Metrics<S> {
    /// Creates metrics with an unknown row height.
    #[must_use]
    pub fn new(rows_per_block: usize, blocks_per_cluster: usize) -> Self {
        Self {
            row_height: None,
            rows_per_block,
            blocks_per_cluster,
        }
    }

    /// Creates metrics with a known row height.
    ///
    /// Non-positive or non-finite heights are treated as unknown.
    #[must_use]
    pub fn with_row_height(mut self, row_height: S) -> Self {
        self.row_height = row_height.is_positive_finite().then_some(row_height);
        self
    }

    /// Returns the measured row height, if known.
    #[must_use]
    pub fn row_height(&self) -> Option<S> {
        self.row_height
    }

    /// Returns the row height, or zero while unknown.
    #[must_use]
    pub fn row_height_or_zero(&self) -> S {
        self.row_height.unwrap_or_else(S::zero)
    }

    /// Returns `true` once a row height has been measured.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.row_height.is_some()
    }

    /// Returns the number of rows per block.
    #[must_use]
    pub fn rows_per_block(&self) -> usize {
        self.rows_per_block
    }

    /// Returns the number of blocks per cluster.
    #[must_use]
    pub fn blocks_per_cluster(&self) -> usize {
        self.blocks_per_cluster
    }

    /// Returns `row_height * rows_per_block`, or zero while unknown.
    #[must_use]
    pub fn block_height(&self) -> S {
        self.row_height_or_zero() * S::from_usize(self.rows_per_block)
    }

    /// Returns `block_height * blocks_per_cluster`, or zero while unknown.
    #[must_use]
    pub fn cluster_height(&self) -> S {
        self.block_height() * S::from_usize(self.blocks_per_cluster)
    }

    /// Returns the full scrollable extent of `total_rows` rows.
    #[must_use]
    pub fn content_extent(&self, total_rows: usize) -> S {
        self.row_height_or_zero() * S::from_usize(total_rows)
    }

    /// Applies a probe result and reports whether the row height changed.
    ///
    /// A probe that cannot provide a height keeps the previous one.
    pub fn apply_probe(&mut self, probe: Probe<S>) -> bool {
        let Some(height) = probe.row_height() else {
            log::warn!(
                "cluster list probe over {} rows yielded no usable row height",
                probe.rows
            );
            return false;
        };
        if self.row_height == Some(height) {
            return false;
        }
        log::debug!(
            "cluster list row height changed from {:?} to {:?}",
            self.row_height,
            height
        );
        self.row_height = Some(height);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_divides_extent_by_rows() {
        assert_eq!(Probe::new(200.0_f64, 10).row_height(), Some(20.0));
        assert_eq!(Probe::new(200.0_f64, 0).row_height(), None);
        assert_eq!(Probe::new(0.0_f64, 4).row_height(), None);
        assert_eq!(Probe::new(f64::NAN, 4).row_height(), None);
        assert_eq!(Probe::<f32>::empty().row_height(), None);
    }

    #[test]
    fn derived_heights_follow_row_height() {
        let metrics = Metrics::new(50, 4).with_row_height(20.0_f32);
        assert_eq!(metrics.block_height(), 1000.0);
        assert_eq!(metrics.cluster_height(), 4000.0);
        assert_eq!(metrics.content_extent(3), 60.0);
    }

    #[test]
    fn unknown_height_yields_zero_extents() {
        let metrics = Metrics::<f64>::new(50, 4);
        assert!(!metrics.is_known());
        assert_eq!(metrics.block_height(), 0.0);
        assert_eq!(metrics.content_extent(1_000), 0.0);

        let rejected = Metrics::new(50, 4).with_row_height(-3.0_f64);
        assert!(!rejected.is_known());
    }

    #[test]
    fn apply_probe_reports_changes_only() {
        let mut metrics = Metrics::<f64>::new(2, 1);
        assert!(metrics.apply_probe(Probe::new(40.0, 2)));
        assert_eq!(metrics.row_height(), Some(20.0));

        // Same height again is not a change.
        assert!(!metrics.apply_probe(Probe::new(60.0, 3)));

        // An empty probe keeps the previous height.
        assert!(!metrics.apply_probe(Probe::empty()));
        assert_eq!(metrics.row_height(), Some(20.0));

        assert!(metrics.apply_probe(Probe::new(50.0, 2)));
        assert_eq!(metrics.row_height(), Some(25.0));
    }
}
