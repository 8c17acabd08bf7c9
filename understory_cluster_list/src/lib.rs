// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_cluster_list --heading-base-level=0

//! Understory Cluster List: cluster-based virtualization for very large lists.
//!
//! This crate renders lists of thousands to millions of uniform-height rows
//! while keeping only a small, bounded number of them materialized. It is
//! renderer-agnostic: a host (a DOM binding, a retained widget tree, a
//! terminal UI) implements [`ClusterHost`] and this crate decides what the
//! host should show.
//!
//! The core concepts are:
//!
//! - **Blocks and clusters**: rows are grouped into blocks of
//!   `rows_per_block` rows, and blocks into clusters of `blocks_per_cluster`
//!   blocks (see [`ClusterConfig`]).
//! - [`plan_cluster`]: a pure function that maps a scroll offset, viewport
//!   height, row height and row count to a [`ClusterWindow`]: the rows to
//!   materialize, plus the extents of the spacers standing in for everything
//!   else. The window covers the cluster under the viewport and its
//!   neighbours, so it only moves when the viewport crosses a cluster
//!   boundary. [`replan`] compares against the previous window and reports
//!   [`PlanOutcome::Unchanged`] when nothing needs to be written.
//! - [`Metrics`]: a single row height measured from a [`Probe`] of
//!   materialized rows, from which block and cluster heights derive.
//! - [`ClusterList`]: the coordinator. It owns the rows ([`RowStore`]), reads
//!   scroll state from the host, re-plans on scroll, resize and structural
//!   changes, and notifies observers around each materialization.
//! - [`ScrollProgress`]: a `0..=1` progress value for the scroll position.
//!
//! Spacer extents are always whole multiples of the row height, so the
//! scrollable extent stays `rows_amount * row_height` no matter how few rows
//! are materialized.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::convert::Infallible;
//! use understory_cluster_list::{
//!     ClusterConfig, ClusterFrame, ClusterHost, ClusterList, FrameContent, Measurer, Probe,
//! };
//!
//! /// A host that lays rows out 20px apart and remembers what it was given.
//! struct Host {
//!     scroll: f64,
//!     rows: Vec<String>,
//! }
//!
//! impl Measurer<f64> for Host {
//!     type Error = Infallible;
//!
//!     fn measure(&mut self, max_rows: usize) -> Result<Probe<f64>, Infallible> {
//!         let rows = self.rows.len().min(max_rows);
//!         Ok(Probe::new(rows as f64 * 20.0, rows))
//!     }
//! }
//!
//! impl ClusterHost<String, f64> for Host {
//!     fn scroll_offset(&self) -> f64 {
//!         self.scroll
//!     }
//!
//!     fn viewport_extent(&self) -> f64 {
//!         200.0
//!     }
//!
//!     fn materialize(&mut self, frame: ClusterFrame<'_, String, f64>) -> Result<(), Infallible> {
//!         self.rows = match frame.content {
//!             FrameContent::Rows(rows) => rows.to_vec(),
//!             FrameContent::Placeholder(p) => vec![p.text().to_string()],
//!         };
//!         Ok(())
//!     }
//!
//!     fn resize_trailing_spacer(&mut self, _extent: f64) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! let rows: Vec<String> = (0..10_000).map(|i| format!("<li>{i}</li>")).collect();
//! let mut list = ClusterList::new(ClusterConfig::default(), rows).unwrap();
//! let mut host = Host { scroll: 0.0, rows: Vec::new() };
//!
//! list.attach(&mut host).unwrap();
//! assert_eq!(list.metrics().row_height(), Some(20.0));
//! // Two clusters of 200 rows are materialized: the current one and the next.
//! assert_eq!(host.rows.len(), 400);
//!
//! host.scroll = 100_000.0;
//! list.on_scroll(&mut host).unwrap();
//! let window = list.window().unwrap();
//! assert!(window.rows.contains(&5_000));
//! assert_eq!(window.total_extent(20.0), 10_000.0 * 20.0);
//! ```
//!
//! All extents and offsets live in a caller-chosen 1D coordinate space
//! (typically logical pixels). This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod list;
mod measure;
mod planner;
mod progress;
mod scalar;
mod store;

pub use config::{
    ClusterConfig, DEFAULT_BLOCKS_PER_CLUSTER, DEFAULT_ROWS_PER_BLOCK, EmptyPlaceholder,
};
pub use error::ConfigError;
pub use list::{ClusterFrame, ClusterHost, ClusterList, FrameContent, Phase, ScrollState};
pub use measure::{Measurer, Metrics, Probe};
pub use planner::{ClusterWindow, PlanInput, PlanOutcome, plan_cluster, replan};
pub use progress::{ScrollProgress, scroll_progress};
pub use scalar::Scalar;
pub use store::{RowContent, RowStore};
