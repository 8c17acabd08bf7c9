// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-list configuration.

use alloc::string::String;

use crate::ConfigError;

/// Default number of rows grouped into one block.
pub const DEFAULT_ROWS_PER_BLOCK: usize = 50;

/// Default number of blocks grouped into one cluster.
pub const DEFAULT_BLOCKS_PER_CLUSTER: usize = 4;

/// Configuration of a [`ClusterList`](crate::ClusterList).
///
/// Built from [`Default`] with the `with_*` methods, then checked by
/// [`ClusterConfig::validate`] (which [`ClusterList::new`](crate::ClusterList::new)
/// does for you).
///
/// ```rust
/// use understory_cluster_list::ClusterConfig;
///
/// let config = ClusterConfig::default()
///     .with_rows_per_block(25)
///     .with_blocks_per_cluster(2)
///     .validate()
///     .unwrap();
///
/// // Odd block sizes are bumped so that row parity survives re-plans.
/// assert_eq!(config.rows_per_block(), 26);
/// assert_eq!(config.rows_per_cluster(), 52);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ClusterConfig {
    rows_per_block: usize,
    blocks_per_cluster: usize,
    keep_parity: bool,
    show_empty_placeholder: bool,
    placeholder: EmptyPlaceholder,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            rows_per_block: DEFAULT_ROWS_PER_BLOCK,
            blocks_per_cluster: DEFAULT_BLOCKS_PER_CLUSTER,
            keep_parity: true,
            show_empty_placeholder: true,
            placeholder: EmptyPlaceholder::default(),
        }
    }
}

impl ClusterConfig {
    /// Sets the number of rows per block.
    ///
    /// Blocks are the granularity of re-plan boundaries. Keeping this close to
    /// the number of rows visible at once works well.
    #[must_use]
    pub fn with_rows_per_block(mut self, rows: usize) -> Self {
        self.rows_per_block = rows;
        self
    }

    /// Sets the number of blocks per cluster.
    ///
    /// Larger clusters materialize more rows beyond the viewport and re-plan
    /// less often.
    #[must_use]
    pub fn with_blocks_per_cluster(mut self, blocks: usize) -> Self {
        self.blocks_per_cluster = blocks;
        self
    }

    /// Sets whether materialized ranges keep even/odd row styling stable.
    #[must_use]
    pub fn with_keep_parity(mut self, keep: bool) -> Self {
        self.keep_parity = keep;
        self
    }

    /// Sets whether an empty list materializes a placeholder row.
    #[must_use]
    pub fn with_show_empty_placeholder(mut self, show: bool) -> Self {
        self.show_empty_placeholder = show;
        self
    }

    /// Sets the text of the empty-list placeholder row.
    #[must_use]
    pub fn with_empty_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder.text = text.into();
        self
    }

    /// Sets the class of the empty-list placeholder row.
    #[must_use]
    pub fn with_empty_placeholder_class(mut self, class: impl Into<String>) -> Self {
        self.placeholder.class = class.into();
        self
    }

    /// Sets the tag used for the placeholder row and spacer elements.
    ///
    /// When unset, the tag is inferred from the first row ever supplied.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.placeholder.tag = Some(tag.into());
        self
    }

    /// Checks the configuration and normalizes `rows_per_block` to an even number.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.rows_per_block == 0 {
            return Err(ConfigError::ZeroRowsPerBlock);
        }
        if self.blocks_per_cluster == 0 {
            return Err(ConfigError::ZeroBlocksPerCluster);
        }
        let too_large = ConfigError::ClusterTooLarge {
            rows_per_block: self.rows_per_block,
            blocks_per_cluster: self.blocks_per_cluster,
        };
        if !self.rows_per_block.is_multiple_of(2) {
            self.rows_per_block = self.rows_per_block.checked_add(1).ok_or(too_large)?;
        }
        if self
            .rows_per_block
            .checked_mul(self.blocks_per_cluster)
            .is_none()
        {
            return Err(ConfigError::ClusterTooLarge {
                rows_per_block: self.rows_per_block,
                blocks_per_cluster: self.blocks_per_cluster,
            });
        }
        Ok(self)
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

    /// Returns the number of rows in one cluster.
    ///
    /// Saturates for configurations that have not been validated.
    #[must_use]
    pub fn rows_per_cluster(&self) -> usize {
        self.rows_per_block.saturating_mul(self.blocks_per_cluster)
    }

    /// Returns whether row parity is kept stable.
    #[must_use]
    pub fn keep_parity(&self) -> bool {
        self.keep_parity
    }

    /// Returns whether an empty list shows a placeholder row.
    #[must_use]
    pub fn show_empty_placeholder(&self) -> bool {
        self.show_empty_placeholder
    }

    /// Returns the configured placeholder row.
    #[must_use]
    pub fn placeholder(&self) -> &EmptyPlaceholder {
        &self.placeholder
    }
}

/// The synthetic row materialized when a list has no rows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EmptyPlaceholder {
    text: String,
    class: String,
    tag: Option<String>,
}

impl Default for EmptyPlaceholder {
    fn default() -> Self {
        Self {
            text: String::from("No data"),
            class: String::from("understory-no-data"),
            tag: None,
        }
    }
}

impl EmptyPlaceholder {
    /// Returns the placeholder text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the class hosts should attach to the placeholder element.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the element tag, if configured or already inferred.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub(crate) fn infer_tag(&mut self, tag: &str) {
        if self.tag.is_none() && !tag.is_empty() {
            self.tag = Some(String::from(tag));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ClusterConfig::default();
        assert_eq!(config.rows_per_block(), 50);
        assert_eq!(config.blocks_per_cluster(), 4);
        assert!(config.keep_parity());
        assert!(config.show_empty_placeholder());
        assert_eq!(config.placeholder().text(), "No data");
        assert_eq!(config.placeholder().tag(), None);
    }

    #[test]
    fn validate_bumps_odd_block_size() {
        let config = ClusterConfig::default()
            .with_rows_per_block(7)
            .validate()
            .unwrap();
        assert_eq!(config.rows_per_block(), 8);

        let even = ClusterConfig::default()
            .with_rows_per_block(8)
            .validate()
            .unwrap();
        assert_eq!(even.rows_per_block(), 8);
    }

    #[test]
    fn validate_rejects_zero_sizes() {
        assert_eq!(
            ClusterConfig::default().with_rows_per_block(0).validate(),
            Err(ConfigError::ZeroRowsPerBlock)
        );
        assert_eq!(
            ClusterConfig::default()
                .with_blocks_per_cluster(0)
                .validate(),
            Err(ConfigError::ZeroBlocksPerCluster)
        );
    }

    #[test]
    fn validate_rejects_overflowing_clusters() {
        let err = ClusterConfig::default()
            .with_rows_per_block(usize::MAX / 2 + 1)
            .with_blocks_per_cluster(4)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ClusterTooLarge { .. }));

        let err = ClusterConfig::default()
            .with_rows_per_block(usize::MAX)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ClusterTooLarge { .. }));
    }

    #[test]
    fn inferred_tag_never_overrides_configured_tag() {
        let config = ClusterConfig::default().with_tag("tr");
        let mut placeholder = config.placeholder().clone();
        placeholder.infer_tag("li");
        assert_eq!(placeholder.tag(), Some("tr"));

        let mut placeholder = EmptyPlaceholder::default();
        placeholder.infer_tag("");
        assert_eq!(placeholder.tag(), None);
        placeholder.infer_tag("li");
        assert_eq!(placeholder.tag(), Some("li"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_deserializes_with_defaults() {
        let json = r#"{"rows_per_block": 10, "placeholder": {"text": "Empty"}}"#;
        let config: ClusterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.rows_per_block(), 10);
        assert_eq!(config.blocks_per_cluster(), DEFAULT_BLOCKS_PER_CLUSTER);
        assert!(config.keep_parity());
        assert!(config.show_empty_placeholder());
        assert_eq!(config.placeholder().text(), "Empty");
        assert_eq!(config.placeholder().class(), "understory-no-data");
        assert_eq!(config.placeholder().tag(), None);

        let encoded = serde_json::to_string(&config.with_tag("tr")).unwrap();
        let decoded: ClusterConfig = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.placeholder().tag(), Some("tr"));
        assert_eq!(decoded.rows_per_block(), 10);
    }
}
