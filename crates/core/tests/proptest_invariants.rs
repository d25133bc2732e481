//! Property-based invariant tests for the scroll mapper, smoothing and the
//! gallery.
//!
//! 1. The active index is always a valid item index.
//! 2. The active index never decreases as progress increases.
//! 3. Progress 0 maps to the first item, progress 1 to the last.
//! 4. A single-item list always maps to 0.
//! 5. Interpolating toward the current value is a no-op.
//! 6. Repeated interpolation converges on the target.
//! 7. The first smoothing tick adopts the target exactly.
//! 8. Re-capturing a square never duplicates it in the revealed set.

use std::collections::BTreeSet;

use folio_core::model::embedded_projects;
use folio_core::views::gallery::{BOARD_SQUARES, Gallery, QUEEN_HOME};
use folio_core::{ScrollParams, Smoothed, compute_active_index, lerp};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn progress() -> impl Strategy<Value = f64> {
    (0u32..=1000).prop_map(|v| f64::from(v) / 1000.0)
}

fn params() -> impl Strategy<Value = ScrollParams> {
    (1u32..400, 0u32..100, 0u32..100, 1u32..200).prop_map(|(span, entry, exit, viewport)| {
        ScrollParams {
            per_item_span: f64::from(span),
            entry_buffer: f64::from(entry),
            exit_buffer: f64::from(exit),
            viewport_span: f64::from(viewport),
        }
    })
}

fn finite() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

// ── Scroll mapping ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn index_is_in_range(p in progress(), params in params(), n in 1usize..40) {
        prop_assert!(compute_active_index(p, &params, n) < n);
    }

    #[test]
    fn index_is_monotone(a in progress(), b in progress(), params in params(), n in 1usize..40) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            compute_active_index(lo, &params, n) <= compute_active_index(hi, &params, n)
        );
    }

    #[test]
    fn endpoints_map_to_first_and_last(params in params(), n in 1usize..40) {
        prop_assert_eq!(compute_active_index(0.0, &params, n), 0);
        prop_assert_eq!(compute_active_index(1.0, &params, n), n - 1);
    }

    #[test]
    fn single_item_is_always_zero(p in -2.0..3.0f64, params in params()) {
        prop_assert_eq!(compute_active_index(p, &params, 1), 0);
    }

    #[test]
    fn out_of_range_progress_is_clamped(p in 1.0..10.0f64, params in params(), n in 1usize..40) {
        prop_assert_eq!(compute_active_index(p, &params, n), n - 1);
        prop_assert_eq!(compute_active_index(-p, &params, n), 0);
    }
}

// ── Smoothing ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn lerp_toward_self_is_identity(x in finite(), alpha in 0.0..=1.0f64) {
        prop_assert_eq!(lerp(x, x, alpha), x);
    }

    #[test]
    fn repeated_lerp_converges(start in finite(), target in finite(), alpha in 0.05..0.95f64) {
        let mut actual = start;
        for _ in 0..2000 {
            actual = lerp(actual, target, alpha);
        }
        prop_assert!((actual - target).abs() < 1e-6);
    }

    #[test]
    fn first_tick_snaps(target in finite(), alpha in 0.0..=1.0f64) {
        let mut s = Smoothed::<f64>::new();
        prop_assert_eq!(s.tick(target, alpha), target);
    }
}

// ── Gallery ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn revealed_set_has_no_duplicates(clicks in prop::collection::vec(0u8..BOARD_SQUARES as u8, 0..40)) {
        let projects = embedded_projects().unwrap();
        let targets: BTreeSet<u8> = projects.iter().map(|p| p.square).collect();
        let mut gallery = Gallery::new(projects);

        let mut expected = BTreeSet::new();
        let mut queen = QUEEN_HOME;
        for square in clicks {
            let hit = gallery.click(square).is_some();
            prop_assert_eq!(hit, targets.contains(&square));
            if hit {
                expected.insert(square);
                queen = square;
            }
        }

        prop_assert_eq!(gallery.revealed().collect::<BTreeSet<_>>(), expected.clone());
        prop_assert_eq!(gallery.revealed_count(), expected.len());
        prop_assert_eq!(gallery.queen(), queen);
    }
}
