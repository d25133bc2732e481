//! Scroll progress to active-experience mapping.
//!
//! The experience region is a tall scroll track with a sticky viewport.
//! Each job owns `per_item_span` units of scroll distance; an entry buffer
//! before the first transition and an exit buffer after the last give the
//! first and last jobs extra dwell time. All spans share one unit
//! (viewport-height percent by default).

use serde::{Deserialize, Serialize};

use crate::state::{ActiveIndex, Observable, Subscription};

/// Tunables for the scroll track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollParams {
    /// Scroll distance each job stays active for.
    pub per_item_span: f64,
    /// Distance before the first transition.
    pub entry_buffer: f64,
    /// Distance after the last transition.
    pub exit_buffer: f64,
    /// Height of the sticky viewport; adds to the track but never to the
    /// scrollable distance.
    pub viewport_span: f64,
}

impl Default for ScrollParams {
    fn default() -> Self {
        Self {
            per_item_span: 100.0,
            entry_buffer: 20.0,
            exit_buffer: 30.0,
            viewport_span: 100.0,
        }
    }
}

impl ScrollParams {
    /// Total height of the scroll track for `item_count` jobs.
    pub fn track_height(&self, item_count: usize) -> f64 {
        let transitions = item_count.saturating_sub(1) as f64;
        self.viewport_span + self.entry_buffer + self.per_item_span * transitions + self.exit_buffer
    }

    /// Distance that actually scrolls (track minus the sticky viewport).
    pub fn scrollable_span(&self, item_count: usize) -> f64 {
        self.track_height(item_count) - self.viewport_span
    }

    /// Progress at the middle of `index`'s plateau, clamped to the track.
    /// Used by keyboard navigation to jump the scroll position.
    pub fn progress_for_index(&self, index: usize, item_count: usize) -> f64 {
        let span = self.scrollable_span(item_count);
        if index == 0 || span <= 0.0 {
            return 0.0;
        }
        let middle = self.entry_buffer.max(0.0) + self.per_item_span * (index as f64 + 0.5);
        (middle / span).clamp(0.0, 1.0)
    }
}

/// Map a scroll fraction to the index of the highlighted job.
///
/// Total over all inputs: progress outside `[0, 1]` (overscroll bounce) is
/// clamped, NaN counts as 0, and the result is always `< item_count` (or 0
/// for an empty list).
pub fn compute_active_index(progress: f64, params: &ScrollParams, item_count: usize) -> usize {
    if item_count <= 1 {
        return 0;
    }
    let last = item_count - 1;
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    // The exit buffer guarantees the final plateau; pin it against rounding.
    if progress >= 1.0 {
        return last;
    }
    if params.per_item_span <= 0.0 {
        return 0;
    }

    let entry = params.entry_buffer.max(0.0);
    let exit = params.exit_buffer.max(0.0);
    let scrollable = entry + params.per_item_span * last as f64 + exit;

    let scrolled = progress * scrollable;
    let adjusted = scrolled - entry;
    let raw = adjusted / params.per_item_span;
    if raw <= 0.0 {
        0
    } else {
        (raw.floor() as usize).min(last)
    }
}

/// Stateless mapper bound to one track configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMapper {
    params: ScrollParams,
    item_count: usize,
}

impl ScrollMapper {
    pub fn new(params: ScrollParams, item_count: usize) -> Self {
        Self { params, item_count }
    }

    pub fn params(&self) -> &ScrollParams {
        &self.params
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn map(&self, progress: f64) -> usize {
        compute_active_index(progress, &self.params, self.item_count)
    }

    /// Start forwarding `progress` changes into `active`.
    ///
    /// The listener lives as long as the returned guard; drop it when the
    /// experience region is torn down.
    #[must_use = "dropping the listener detaches it immediately"]
    pub fn attach(self, progress: &Observable<f64>, active: &ActiveIndex) -> ScrollListener {
        let writer = active.clone();
        let subscription = progress.subscribe(move |&p| {
            writer.set(self.map(p));
        });
        log::debug!("scroll listener attached ({} items)", self.item_count);
        ScrollListener {
            _subscription: subscription,
        }
    }
}

/// Scoped scroll subscription. Dropping it stops index updates.
#[derive(Debug)]
pub struct ScrollListener {
    _subscription: Subscription,
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        log::debug!("scroll listener detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> ScrollParams {
        ScrollParams {
            per_item_span: 100.0,
            entry_buffer: 20.0,
            exit_buffer: 30.0,
            viewport_span: 100.0,
        }
    }

    #[test]
    fn reference_track_height() {
        assert_eq!(reference_params().track_height(5), 550.0);
        assert_eq!(reference_params().scrollable_span(5), 450.0);
    }

    #[test]
    fn reference_scenario_endpoints() {
        let p = reference_params();
        assert_eq!(compute_active_index(0.0, &p, 5), 0);
        assert_eq!(compute_active_index(1.0, &p, 5), 4);
    }

    #[test]
    fn plateaus_follow_entry_buffer() {
        let p = reference_params();
        // 120 / 450 scrolled: adjusted 100 -> exactly index 1.
        let at = |scrolled: f64| compute_active_index(scrolled / 450.0, &p, 5);
        assert_eq!(at(0.0), 0);
        assert_eq!(at(119.0), 0);
        assert_eq!(at(121.0), 1);
        assert_eq!(at(219.0), 1);
        assert_eq!(at(221.0), 2);
        assert_eq!(at(421.0), 4);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let p = reference_params();
        assert_eq!(compute_active_index(-0.3, &p, 5), 0);
        assert_eq!(compute_active_index(1.7, &p, 5), 4);
        assert_eq!(compute_active_index(f64::NAN, &p, 5), 0);
        assert_eq!(compute_active_index(f64::INFINITY, &p, 5), 4);
    }

    #[test]
    fn single_and_empty_lists() {
        let p = reference_params();
        for progress in [0.0, 0.5, 1.0, 3.0] {
            assert_eq!(compute_active_index(progress, &p, 1), 0);
            assert_eq!(compute_active_index(progress, &p, 0), 0);
        }
    }

    #[test]
    fn degenerate_span_steps_at_end() {
        let p = ScrollParams {
            per_item_span: 0.0,
            ..reference_params()
        };
        assert_eq!(compute_active_index(0.99, &p, 5), 0);
        assert_eq!(compute_active_index(1.0, &p, 5), 4);
    }

    #[test]
    fn progress_for_index_lands_on_plateau() {
        let p = reference_params();
        for i in 0..5 {
            let progress = p.progress_for_index(i, 5);
            assert_eq!(compute_active_index(progress, &p, 5), i, "index {i}");
        }
    }

    #[test]
    fn listener_writes_until_dropped() {
        let progress = Observable::new(0.0);
        let active = ActiveIndex::new(5);
        let listener = ScrollMapper::new(reference_params(), 5).attach(&progress, &active);

        progress.set(0.5);
        assert_eq!(active.get(), 2);

        drop(listener);
        progress.set(1.0);
        assert_eq!(active.get(), 2);
    }

    #[test]
    fn scroll_overrides_click_on_next_event() {
        let progress = Observable::new(0.0);
        let active = ActiveIndex::new(5);
        let _listener = ScrollMapper::new(reference_params(), 5).attach(&progress, &active);

        progress.set(0.3);
        let scrolled = active.get();
        active.set(4);
        progress.set(0.31);
        assert_eq!(active.get(), scrolled);
    }
}
