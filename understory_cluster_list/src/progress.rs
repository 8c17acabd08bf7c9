// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll progress reporting.

use crate::Scalar;

/// Scroll progress as a fraction in `0..=1`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct ScrollProgress<S>(S);

impl<S: Scalar> ScrollProgress<S> {
    /// Computes progress for a scroll offset over a scrollable extent.
    ///
    /// Progress is `scroll_offset / (content_extent - viewport_extent)`,
    /// clamped to `0..=1`. Content that fits inside the viewport reports `0`.
    #[must_use]
    pub fn new(scroll_offset: S, content_extent: S, viewport_extent: S) -> Self {
        let range = content_extent - viewport_extent;
        if !range.is_positive_finite() {
            return Self(S::zero());
        }
        let fraction = (scroll_offset / range).clamp_non_negative();
        Self(fraction.min(S::from_usize(1)))
    }

    /// Returns the fraction in `0..=1`.
    #[must_use]
    pub fn fraction(self) -> S {
        self.0
    }

    /// Returns the progress as a percentage in `0..=100`.
    #[must_use]
    pub fn percent(self) -> S {
        self.0 * S::from_usize(100)
    }
}

/// Computes scroll progress as a fraction in `0..=1`.
///
/// See [`ScrollProgress::new`].
#[must_use]
pub fn scroll_progress<S: Scalar>(scroll_offset: S, content_extent: S, viewport_extent: S) -> S {
    ScrollProgress::new(scroll_offset, content_extent, viewport_extent).fraction()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_scrollable_reports_zero() {
        assert_eq!(scroll_progress(0.0_f64, 100.0, 100.0), 0.0);
        assert_eq!(scroll_progress(10.0_f64, 50.0, 100.0), 0.0);
        assert_eq!(scroll_progress(10.0_f64, 0.0, 0.0), 0.0);
    }

    #[test]
    fn end_of_content_reports_one() {
        assert_eq!(scroll_progress(160.0_f64, 200.0, 40.0), 1.0);
        assert_eq!(scroll_progress(80.0_f64, 200.0, 40.0), 0.5);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        assert_eq!(scroll_progress(-5.0_f32, 200.0, 40.0), 0.0);
        assert_eq!(scroll_progress(500.0_f32, 200.0, 40.0), 1.0);
        assert_eq!(scroll_progress(f32::NAN, 200.0, 40.0), 0.0);
    }

    #[test]
    fn percent_scales_fraction() {
        let progress = ScrollProgress::new(40.0_f64, 200.0, 40.0);
        assert_eq!(progress.fraction(), 0.25);
        assert_eq!(progress.percent(), 25.0);
    }
}
