// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when a [`ClusterConfig`](crate::ClusterConfig) cannot be used.
///
/// Construction of a [`ClusterList`](crate::ClusterList) fails with this error
/// before any state is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `rows_per_block` was zero.
    ZeroRowsPerBlock,
    /// `blocks_per_cluster` was zero.
    ZeroBlocksPerCluster,
    /// `rows_per_block * blocks_per_cluster` does not fit in `usize`.
    ClusterTooLarge {
        /// Requested rows per block (after even normalization).
        rows_per_block: usize,
        /// Requested blocks per cluster.
        blocks_per_cluster: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRowsPerBlock => f.write_str("rows_per_block must be positive"),
            Self::ZeroBlocksPerCluster => f.write_str("blocks_per_cluster must be positive"),
            Self::ClusterTooLarge {
                rows_per_block,
                blocks_per_cluster,
            } => write!(
                f,
                "a cluster of {blocks_per_cluster} blocks of {rows_per_block} rows overflows usize"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
