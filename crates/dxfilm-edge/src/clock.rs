//! Detected clock tracks and the per-image clock registry.

use serde::Serialize;

/// One detected clock track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Clock {
    /// Row on which this clock was most recently observed.
    pub row_number: i32,
    /// Whether this is the longer variant whose data track carries a
    /// half-frame number.
    pub half_frame: bool,
    /// Pixel offset of the clock's left edge.
    pub x_start: u32,
    /// Pixel offset of the clock's right edge.
    pub x_stop: u32,
    /// Half-window within which a data track edge counts as aligned to this
    /// clock.
    pub pixel_tolerance: u32,
}

impl Clock {
    /// Whether `x` lies within `pixel_tolerance` of the clock's left edge.
    #[inline]
    pub fn x_start_near(&self, x: u32) -> bool {
        self.x_start.abs_diff(x) <= self.pixel_tolerance
    }

    /// Whether `x` lies within `pixel_tolerance` of the clock's right edge.
    #[inline]
    pub fn x_stop_near(&self, x: u32) -> bool {
        self.x_stop.abs_diff(x) <= self.pixel_tolerance
    }

    /// Two observations describe the same physical clock when their left
    /// edges lie within the larger of the two tolerances, even if the
    /// variants or right edges differ.
    pub fn same_track(&self, other: &Clock) -> bool {
        let tolerance = self.pixel_tolerance.max(other.pixel_tolerance);
        self.x_start.abs_diff(other.x_start) <= tolerance
    }
}

/// Ordered set of clocks keyed by `x_start`.
///
/// Implementation note: realistic film images yield one or two clocks, so a
/// sorted vector keeps this simple while still giving ordered nearest-key
/// lookup.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClockRegistry {
    clocks: Vec<Clock>,
}

impl ClockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clock> {
        self.clocks.iter()
    }

    /// Clock whose left edge is closest to `x`. The lower edge wins exact
    /// ties.
    pub fn nearest(&self, x: u32) -> Option<&Clock> {
        let after = self.clocks.partition_point(|c| c.x_start < x);
        match (self.clocks.get(after.wrapping_sub(1)), self.clocks.get(after)) {
            (Some(prev), Some(next)) => {
                if x - prev.x_start <= next.x_start - x {
                    Some(prev)
                } else {
                    Some(next)
                }
            }
            (prev, next) => prev.or(next),
        }
    }

    /// Insert `clock`, replacing any existing entry that observes the same
    /// track. The freshest geometry wins.
    pub fn insert_or_refine(&mut self, clock: Clock) {
        if let Some(i) = self.nearest_index(clock.x_start) {
            if self.clocks[i].same_track(&clock) {
                self.clocks.remove(i);
            }
        }
        let at = self.clocks.partition_point(|c| c.x_start < clock.x_start);
        self.clocks.insert(at, clock);
    }

    fn nearest_index(&self, x: u32) -> Option<usize> {
        let nearest = self.nearest(x)?;
        self.clocks.iter().position(|c| c.x_start == nearest.x_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(x_start: u32, tolerance: u32) -> Clock {
        Clock {
            row_number: 0,
            half_frame: false,
            x_start,
            x_stop: x_start + 690,
            pixel_tolerance: tolerance,
        }
    }

    #[test]
    fn nearest_prefers_closest_and_breaks_ties_low() {
        let mut registry = ClockRegistry::new();
        registry.insert_or_refine(clock(50, 10));
        registry.insert_or_refine(clock(400, 10));
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.nearest(200).map(|c| c.x_start), Some(50));
        assert_eq!(registry.nearest(300).map(|c| c.x_start), Some(400));
        // 225 is 175 away from both entries
        assert_eq!(registry.nearest(225).map(|c| c.x_start), Some(50));
        assert_eq!(registry.nearest(0).map(|c| c.x_start), Some(50));
        assert_eq!(registry.nearest(5000).map(|c| c.x_start), Some(400));
    }

    #[test]
    fn nearest_on_empty_registry_is_none() {
        assert!(ClockRegistry::new().nearest(100).is_none());
    }

    #[test]
    fn refinement_replaces_without_growing() {
        let mut registry = ClockRegistry::new();
        registry.insert_or_refine(clock(100, 15));

        let mut refined = clock(110, 15);
        refined.row_number = 7;
        registry.insert_or_refine(refined);

        assert_eq!(registry.len(), 1);
        let stored = registry.nearest(100).expect("one clock");
        assert_eq!(stored.x_start, 110);
        assert_eq!(stored.row_number, 7);
    }

    #[test]
    fn distinct_tracks_coexist() {
        let mut registry = ClockRegistry::new();
        registry.insert_or_refine(clock(100, 15));
        registry.insert_or_refine(clock(400, 15));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn same_track_uses_larger_tolerance() {
        let wide = clock(100, 30);
        let narrow = clock(125, 5);
        assert!(wide.same_track(&narrow));
        assert!(narrow.same_track(&wide));
        assert!(!narrow.same_track(&clock(160, 5)));
    }
}
