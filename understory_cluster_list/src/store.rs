// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered row storage.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

/// Row content the list can inspect for a tag name.
///
/// The store treats rows as opaque; the only thing the list ever asks of a
/// row is which element tag it renders as, so the placeholder row and spacers
/// can match it. Markup strings report their leading tag name. Other row
/// types can keep the default, which reports nothing.
pub trait RowContent {
    /// Returns the element tag this row renders as, if known.
    fn tag_name(&self) -> Option<&str> {
        None
    }
}

impl RowContent for String {
    fn tag_name(&self) -> Option<&str> {
        leading_tag(self)
    }
}

impl RowContent for &str {
    fn tag_name(&self) -> Option<&str> {
        leading_tag(self)
    }
}

/// Extracts the tag name of the first element in a markup fragment.
///
/// `"  <tr class=x><td>1</td></tr>"` yields `Some("tr")`.
fn leading_tag(markup: &str) -> Option<&str> {
    let rest = markup.trim_start().strip_prefix('<')?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len());
    let tag = &rest[..end];
    (!tag.is_empty()).then_some(tag)
}

/// The full ordered sequence of rows.
///
/// Indices are contiguous (`0..len`) and stable until the next mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowStore<R> {
    rows: Vec<R>,
}

impl<R> Default for RowStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RowStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates a store holding `rows`.
    #[must_use]
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Replaces every row.
    pub fn replace_all(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    /// Appends a batch at the end. Existing indices are unchanged.
    pub fn append_batch(&mut self, rows: impl IntoIterator<Item = R>) {
        self.rows.extend(rows);
    }

    /// Prepends a batch. Every existing index shifts by the batch size.
    pub fn prepend_batch(&mut self, rows: Vec<R>) {
        if rows.is_empty() {
            return;
        }
        let old = core::mem::replace(&mut self.rows, rows);
        self.rows.extend(old);
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// Returns rows `start..end`, clamped to the stored range.
    ///
    /// Out-of-bounds or inverted requests yield a shorter (possibly empty)
    /// slice instead of panicking.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &[R] {
        let range = self.clamp(start..end);
        &self.rows[range]
    }

    /// Clamps `range` to `0..len`, collapsing inverted ranges.
    #[must_use]
    pub fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        start..end
    }

    /// Returns every row.
    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.rows
    }
}
