//! Fixed reference patterns and guard matching over run-length views.

use crate::RunView;

/// A reference pattern of `N` alternating bar/space widths, bar first, whose
/// total width at unit scale is a known module count.
///
/// The module count is declared rather than derived so a pattern can carry a
/// nominal width that differs from the sum of its listed elements (a prefix
/// pattern standing in for a longer code does exactly that).
#[derive(Clone, Copy, Debug)]
pub struct FixedPattern<const N: usize> {
    widths: [u32; N],
    unit_sum: u32,
}

impl<const N: usize> FixedPattern<N> {
    pub const fn new(widths: [u32; N], unit_sum: u32) -> Self {
        Self { widths, unit_sum }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Nominal width of the whole pattern, in modules.
    #[inline]
    pub const fn unit_sum(&self) -> u32 {
        self.unit_sum
    }

    pub fn widths(&self) -> &[u32; N] {
        &self.widths
    }
}

/// Pixel width of one module when `window` matches `pattern` after scaling,
/// `None` otherwise. Each run must stay within half a module (plus one pixel)
/// of its nominal width.
fn match_unit<const N: usize>(window: &[u32], pattern: &FixedPattern<N>) -> Option<f32> {
    if window.len() != N {
        return None;
    }
    let total: u32 = window.iter().sum();
    if total < pattern.unit_sum() {
        return None;
    }

    let unit = total as f32 / pattern.unit_sum() as f32;
    let slack = unit * 0.5 + 1.0;
    for (&w, &p) in window.iter().zip(pattern.widths()) {
        if (w as f32 - p as f32 * unit).abs() > slack {
            return None;
        }
    }
    Some(unit)
}

/// Slide forward from `view`'s cursor to the first window matching `pattern`
/// with a quiet space of at least `min_quiet_zone` modules before it.
///
/// Candidate windows always start on a bar. The returned view is positioned
/// on the match's first bar with the window covering exactly the pattern; the
/// row edge counts as quiet.
pub fn find_left_guard<'a, const N: usize>(
    view: &RunView<'a>,
    pattern: &FixedPattern<N>,
    min_quiet_zone: f32,
) -> Option<RunView<'a>> {
    let mut offset = usize::from(!view.is_bar());
    loop {
        let probe = view.subview(offset, N);
        let window = probe.window()?;
        if let Some(unit) = match_unit(window, pattern) {
            let quiet = probe
                .space_in_front()
                .map_or(true, |s| s as f32 >= min_quiet_zone * unit);
            if quiet {
                return Some(probe);
            }
        }
        offset += 2;
    }
}

/// Whether `view`'s window matches `pattern` and is followed by a quiet
/// space of at least `min_quiet_zone` modules. The row edge counts as quiet.
pub fn is_right_guard<const N: usize>(
    view: &RunView<'_>,
    pattern: &FixedPattern<N>,
    min_quiet_zone: f32,
) -> bool {
    let Some(window) = view.window() else {
        return false;
    };
    match match_unit(window, pattern) {
        Some(unit) => view
            .space_behind()
            .map_or(true, |s| s as f32 >= min_quiet_zone * unit),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARD: FixedPattern<3> = FixedPattern::new([2, 1, 1], 4);

    #[test]
    fn finds_scaled_pattern_behind_noise() {
        // bar 9, space 3, then the guard at 3 px per module
        let row = [9, 30, 6, 3, 3, 12];
        let found = find_left_guard(&RunView::new(&row), &GUARD, 2.0).expect("guard");
        assert_eq!(found.pixels_in_front(), 39);
        assert_eq!(found.pixels_till_end(), 51);
        assert!(found.is_bar());
    }

    #[test]
    fn quiet_zone_is_enforced() {
        let row = [9, 5, 6, 3, 3, 12];
        assert!(find_left_guard(&RunView::new(&row), &GUARD, 2.0).is_none());
        assert!(find_left_guard(&RunView::new(&row), &GUARD, 1.0).is_some());
    }

    #[test]
    fn row_edge_counts_as_quiet() {
        let row = [6, 3, 3, 12];
        let found = find_left_guard(&RunView::new(&row), &GUARD, 5.0).expect("guard at edge");
        assert_eq!(found.pixels_in_front(), 0);
    }

    #[test]
    fn mismatched_proportions_are_skipped() {
        // middle space is two modules wide, not one
        let row = [40, 6, 6, 3, 40];
        assert!(find_left_guard(&RunView::new(&row), &GUARD, 1.0).is_none());
    }

    #[test]
    fn right_guard_checks_trailing_space() {
        let row = [40, 6, 3, 3, 12];
        let stop = RunView::starting_with_space(&row).subview(1, 3);
        assert!(stop.is_bar());
        assert!(is_right_guard(&stop, &GUARD, 2.0));
        assert!(!is_right_guard(&stop, &GUARD, 5.0));

        let row_end = [40, 6, 3, 3];
        let stop = RunView::starting_with_space(&row_end).subview(1, 3);
        assert!(is_right_guard(&stop, &GUARD, 5.0));
    }
}
