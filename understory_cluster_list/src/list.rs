// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render coordinator: decides when to re-plan and drives the host.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{
    ClusterConfig, ClusterWindow, ConfigError, EmptyPlaceholder, Measurer, Metrics, PlanInput,
    PlanOutcome, RowContent, RowStore, Scalar, ScrollProgress, replan,
};

/// The rendering side of a [`ClusterList`].
///
/// Hosts own the scroll container and the materialized elements. The list
/// reads scroll state from the host, asks it to measure rows, and hands it
/// frames to materialize. Host errors are returned unchanged from whichever
/// list operation triggered them.
pub trait ClusterHost<R, S: Scalar>: Measurer<S> {
    /// Returns the current scroll offset of the container.
    fn scroll_offset(&self) -> S;

    /// Returns the current height of the container's viewport.
    fn viewport_extent(&self) -> S;

    /// Replaces everything materialized with `frame`.
    ///
    /// The host emits, in order: the parity filler element if
    /// [`ClusterWindow::parity_filler`] is set, a top spacer of
    /// [`ClusterWindow::top_spacer`] when non-zero, the frame content, and a
    /// bottom spacer of [`ClusterWindow::bottom_spacer`] when non-zero.
    fn materialize(&mut self, frame: ClusterFrame<'_, R, S>) -> Result<(), Self::Error>;

    /// Resizes the bottom spacer in place, leaving materialized rows untouched.
    fn resize_trailing_spacer(&mut self, extent: S) -> Result<(), Self::Error>;
}

/// Content handed to [`ClusterHost::materialize`].
#[derive(Debug)]
pub struct ClusterFrame<'a, R, S> {
    /// The window being materialized.
    pub window: &'a ClusterWindow<S>,
    /// What goes between the spacers.
    pub content: FrameContent<'a, R>,
}

impl<R, S> ClusterFrame<'_, R, S> {
    /// Returns how many elements sit between the spacers.
    ///
    /// The placeholder counts as one even though the list reports no rows.
    #[must_use]
    pub fn materialized_len(&self) -> usize {
        match self.content {
            FrameContent::Rows(rows) => rows.len(),
            FrameContent::Placeholder(_) => 1,
        }
    }
}

/// The rows of a [`ClusterFrame`], or the empty-list placeholder.
#[derive(Debug)]
pub enum FrameContent<'a, R> {
    /// A contiguous slice of rows, starting at the window's first row.
    Rows(&'a [R]),
    /// The list is empty and shows its placeholder row.
    Placeholder(&'a EmptyPlaceholder),
}

/// Coordinator state.
///
/// Every operation runs to completion and returns with the list in
/// [`Phase::Idle`]. `Planning` and `Materializing` are the transient states an
/// operation passes through; planning never starts while another window is
/// being materialized.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next event.
    #[default]
    Idle,
    /// Computing the next window.
    Planning,
    /// Handing a window to the host.
    Materializing,
}

/// The last scroll offset and viewport height read from the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollState<S> {
    /// Scroll offset of the container.
    pub offset: S,
    /// Height of the container's viewport.
    pub viewport: S,
}

type Notify = Box<dyn FnMut()>;
type NotifyProgress<S> = Box<dyn FnMut(S)>;

struct Observers<S> {
    will_change: Option<Notify>,
    changed: Option<Notify>,
    progress: Option<NotifyProgress<S>>,
}

impl<S> fmt::Debug for Observers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("will_change", &self.will_change.is_some())
            .field("changed", &self.changed.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// A clustered, virtualized list of uniform-height rows.
///
/// The list owns every row but only materializes a bounded window of them
/// through a [`ClusterHost`]. See the [crate documentation](crate) for the
/// planning model.
///
/// Observers registered with [`on_cluster_will_change`](Self::on_cluster_will_change),
/// [`on_cluster_changed`](Self::on_cluster_changed) and
/// [`on_scroll_progress`](Self::on_scroll_progress) run synchronously, at most
/// once per operation.
#[derive(Debug)]
pub struct ClusterList<R, S = f64> {
    config: ClusterConfig,
    store: RowStore<R>,
    metrics: Metrics<S>,
    placeholder: EmptyPlaceholder,
    window: Option<ClusterWindow<S>>,
    scroll: ScrollState<S>,
    phase: Phase,
    revision: u64,
    observers: Observers<S>,
}

impl<R: RowContent, S: Scalar> ClusterList<R, S> {
    /// Creates a list over `rows`.
    ///
    /// Nothing is materialized until [`attach`](Self::attach) is called.
    pub fn new(config: ClusterConfig, rows: Vec<R>) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        let metrics = Metrics::new(config.rows_per_block(), config.blocks_per_cluster());
        let mut list = Self {
            placeholder: config.placeholder().clone(),
            config,
            store: RowStore::new(),
            metrics,
            window: None,
            scroll: ScrollState {
                offset: S::zero(),
                viewport: S::zero(),
            },
            phase: Phase::Idle,
            revision: 0,
            observers: Observers {
                will_change: None,
                changed: None,
                progress: None,
            },
        };
        list.infer_tag(&rows);
        list.store.replace_all(rows);
        Ok(list)
    }

    /// Registers a callback run right before a new cluster is materialized.
    pub fn on_cluster_will_change(&mut self, callback: impl FnMut() + 'static) {
        self.observers.will_change = Some(Box::new(callback));
    }

    /// Registers a callback run right after a new cluster is materialized.
    pub fn on_cluster_changed(&mut self, callback: impl FnMut() + 'static) {
        self.observers.changed = Some(Box::new(callback));
    }

    /// Registers a callback receiving scroll progress (`0..=1`) on every scroll.
    pub fn on_scroll_progress(&mut self, callback: impl FnMut(S) + 'static) {
        self.observers.progress = Some(Box::new(callback));
    }

    /// Performs the first render into `host`.
    ///
    /// If rows exist but no row height is known yet, a probe block is
    /// materialized and measured first.
    pub fn attach<H: ClusterHost<R, S>>(&mut self, host: &mut H) -> Result<(), H::Error> {
        self.sync_scroll(host);
        self.ensure_metrics(host)?;
        self.plan_and_render(host, true)
    }

    /// Handles a scroll event.
    ///
    /// Re-materializes only when the viewport crossed into another cluster.
    /// Scroll progress observers are notified either way.
    pub fn on_scroll<H: ClusterHost<R, S>>(&mut self, host: &mut H) -> Result<(), H::Error> {
        self.sync_scroll(host);
        self.plan_and_render(host, false)?;
        let progress = self.scroll_progress();
        if let Some(callback) = self.observers.progress.as_mut() {
            callback(progress);
        }
        Ok(())
    }

    /// Handles a resize of the container.
    ///
    /// Row height is re-measured; a changed height forces a full re-plan,
    /// otherwise the window is re-planned for the new viewport height.
    pub fn on_resize<H: ClusterHost<R, S>>(&mut self, host: &mut H) -> Result<(), H::Error> {
        self.sync_scroll(host);
        let changed = self.remeasure(host)?;
        self.plan_and_render(host, changed)
    }

    /// Re-measures the row height.
    ///
    /// Re-plans and re-materializes if the height changed, or unconditionally
    /// when `force` is set. Calling this repeatedly without intervening
    /// changes leaves the window as it is.
    pub fn refresh<H: ClusterHost<R, S>>(
        &mut self,
        force: bool,
        host: &mut H,
    ) -> Result<(), H::Error> {
        self.sync_scroll(host);
        let changed = self.remeasure(host)?;
        if changed || force {
            self.plan_and_render(host, true)?;
        }
        Ok(())
    }

    /// Replaces every row and re-materializes.
    pub fn update<H: ClusterHost<R, S>>(
        &mut self,
        rows: Vec<R>,
        host: &mut H,
    ) -> Result<(), H::Error> {
        self.infer_tag(&rows);
        self.store.replace_all(rows);
        self.sync_scroll(host);
        self.ensure_metrics(host)?;
        self.plan_and_render(host, true)
    }

    /// Appends rows.
    ///
    /// Materialized rows keep their identity. When the planned rows stay the
    /// same, only the bottom spacer grows. Empty batches are ignored.
    pub fn append<H: ClusterHost<R, S>>(
        &mut self,
        rows: Vec<R>,
        host: &mut H,
    ) -> Result<(), H::Error> {
        if rows.is_empty() {
            return Ok(());
        }
        let was_empty = self.store.is_empty();
        self.infer_tag(&rows);
        self.store.append_batch(rows);
        self.sync_scroll(host);
        let probed = self.ensure_metrics(host)?;
        self.plan_and_render(host, was_empty || probed)
    }

    /// Prepends rows, shifting every existing index by the batch size.
    ///
    /// The previous window is invalidated and exactly one new one is
    /// materialized. Empty batches are ignored.
    pub fn prepend<H: ClusterHost<R, S>>(
        &mut self,
        rows: Vec<R>,
        host: &mut H,
    ) -> Result<(), H::Error> {
        if rows.is_empty() {
            return Ok(());
        }
        self.infer_tag(&rows);
        self.store.prepend_batch(rows);
        self.sync_scroll(host);
        self.ensure_metrics(host)?;
        self.plan_and_render(host, true)
    }

    /// Removes every row.
    pub fn clear<H: ClusterHost<R, S>>(&mut self, host: &mut H) -> Result<(), H::Error> {
        self.update(Vec::new(), host)
    }

    /// Tears the list down.
    ///
    /// With `clear_content`, the host is left with only the placeholder (or
    /// nothing, if placeholders are disabled). Otherwise every row is
    /// materialized at once, without spacers. No observers are notified.
    pub fn destroy<H: ClusterHost<R, S>>(
        self,
        clear_content: bool,
        host: &mut H,
    ) -> Result<(), H::Error> {
        let show_placeholder = self.config.show_empty_placeholder();
        let (window, content) = if clear_content {
            let content = if show_placeholder {
                FrameContent::Placeholder(&self.placeholder)
            } else {
                FrameContent::Rows(&[])
            };
            (ClusterWindow::empty(), content)
        } else {
            let window = ClusterWindow::unspaced(0..self.store.len(), self.config.rows_per_block());
            let content = if self.store.is_empty() && show_placeholder {
                FrameContent::Placeholder(&self.placeholder)
            } else {
                FrameContent::Rows(self.store.as_slice())
            };
            (window, content)
        };
        log::debug!(
            "destroying cluster list of {} rows (clear: {clear_content})",
            self.store.len()
        );
        host.materialize(ClusterFrame {
            window: &window,
            content,
        })
    }

    /// Returns the number of rows, not counting the placeholder.
    #[must_use]
    pub fn rows_amount(&self) -> usize {
        self.store.len()
    }

    /// Returns all rows.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        self.store.as_slice()
    }

    /// Returns scroll progress (`0..=1`) for the last scroll state read.
    #[must_use]
    pub fn scroll_progress(&self) -> S {
        ScrollProgress::new(
            self.scroll.offset,
            self.metrics.content_extent(self.store.len()),
            self.scroll.viewport,
        )
        .fraction()
    }

    /// Returns the currently materialized window, if any.
    #[must_use]
    pub fn window(&self) -> Option<&ClusterWindow<S>> {
        self.window.as_ref()
    }

    /// Returns the current metrics.
    #[must_use]
    pub fn metrics(&self) -> &Metrics<S> {
        &self.metrics
    }

    /// Returns the validated configuration.
    #[must_use]
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Returns the placeholder, including any inferred tag.
    #[must_use]
    pub fn placeholder(&self) -> &EmptyPlaceholder {
        &self.placeholder
    }

    /// Returns the last scroll state read from the host.
    #[must_use]
    pub fn scroll_state(&self) -> ScrollState<S> {
        self.scroll
    }

    /// Returns the coordinator phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns how many clusters have been materialized.
    ///
    /// Probe renders and trailing-spacer resizes do not count.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn infer_tag(&mut self, rows: &[R]) {
        if let Some(tag) = rows.first().and_then(RowContent::tag_name) {
            self.placeholder.infer_tag(tag);
        }
    }

    fn sync_scroll<H: ClusterHost<R, S>>(&mut self, host: &H) {
        self.scroll = ScrollState {
            offset: host.scroll_offset(),
            viewport: host.viewport_extent(),
        };
    }

    /// Makes sure a row height is known, rendering a probe block if needed.
    ///
    /// Returns `true` if a probe was materialized.
    fn ensure_metrics<H: ClusterHost<R, S>>(&mut self, host: &mut H) -> Result<bool, H::Error> {
        if self.metrics.is_known() || self.store.is_empty() {
            return Ok(false);
        }
        let probe_rows = self.store.len().min(self.config.rows_per_block());
        let window = ClusterWindow::unspaced(0..probe_rows, self.config.rows_per_block());
        log::debug!("materializing {probe_rows} probe rows to measure row height");
        self.window = None;
        host.materialize(ClusterFrame {
            window: &window,
            content: FrameContent::Rows(self.store.slice(0, probe_rows)),
        })?;
        self.window = Some(window);
        let probe = host.measure(probe_rows)?;
        self.metrics.apply_probe(probe);
        Ok(true)
    }

    /// Measures the materialized rows and reports whether the window must be
    /// re-materialized.
    ///
    /// A probe render replaces the window, so it always asks for a re-plan.
    fn remeasure<H: ClusterHost<R, S>>(&mut self, host: &mut H) -> Result<bool, H::Error> {
        if self.store.is_empty() {
            return Ok(false);
        }
        let materialized = self.window.as_ref().map_or(0, ClusterWindow::len);
        if materialized == 0 {
            return self.ensure_metrics(host);
        }
        let probe = host.measure(materialized.min(self.config.rows_per_block()))?;
        Ok(self.metrics.apply_probe(probe))
    }

    /// Plans a window and writes whatever changed to the host.
    ///
    /// `force` skips the comparison against the current window, so the
    /// result is always fully materialized.
    fn plan_and_render<H: ClusterHost<R, S>>(
        &mut self,
        host: &mut H,
        force: bool,
    ) -> Result<(), H::Error> {
        debug_assert_eq!(self.phase, Phase::Idle, "cluster planning is not re-entrant");
        self.phase = Phase::Planning;
        let input = PlanInput::from_metrics(
            &self.metrics,
            self.store.len(),
            self.scroll.offset,
            self.scroll.viewport,
            self.config.keep_parity(),
        );
        let previous = if force { None } else { self.window.as_ref() };
        let result = match replan(&input, previous) {
            PlanOutcome::Unchanged => Ok(()),
            PlanOutcome::TrailingSpacer(window) => {
                self.phase = Phase::Materializing;
                let bottom = window.bottom_spacer;
                self.commit(window, host.resize_trailing_spacer(bottom))
            }
            PlanOutcome::Changed(window) => self.materialize(host, window),
        };
        self.phase = Phase::Idle;
        result
    }

    fn materialize<H: ClusterHost<R, S>>(
        &mut self,
        host: &mut H,
        window: ClusterWindow<S>,
    ) -> Result<(), H::Error> {
        self.phase = Phase::Materializing;
        if let Some(callback) = self.observers.will_change.as_mut() {
            callback();
        }
        let content = if self.store.is_empty() && self.config.show_empty_placeholder() {
            FrameContent::Placeholder(&self.placeholder)
        } else {
            FrameContent::Rows(self.store.slice(window.rows.start, window.rows.end))
        };
        let result = host.materialize(ClusterFrame {
            window: &window,
            content,
        });
        self.commit(window, result)?;
        self.revision += 1;
        if let Some(callback) = self.observers.changed.as_mut() {
            callback();
        }
        Ok(())
    }

    /// Records `window` as materialized if the host succeeded.
    ///
    /// On failure the host's state is unknown, so the next plan is forced.
    fn commit<E>(&mut self, window: ClusterWindow<S>, result: Result<(), E>) -> Result<(), E> {
        match result {
            Ok(()) => {
                self.window = Some(window);
                Ok(())
            }
            Err(err) => {
                self.window = None;
                Err(err)
            }
        }
    }
}
