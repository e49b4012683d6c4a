//! Reference patterns for the DX film edge clock and data tracks.
//!
//! Two clock variants exist; the longer one announces that the data track
//! below it carries a half-frame number. Both open with the same wide bar and
//! stripe sequence, which [`CLOCK_COMMON`] captures so a single cheap match
//! can rule out rows with no code at all.

use dxfilm_core::FixedPattern;

/// Module count of the half-frame clock track.
pub const CLOCK_UNITS_HF: u32 = 31;
/// Module count of the short clock track.
pub const CLOCK_UNITS_NO_HF: u32 = 23;

/// Shared prefix of both clock variants.
pub const CLOCK_COMMON: FixedPattern<15> =
    FixedPattern::new([5, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], 20);

/// Full clock track with half-frame information.
pub const CLOCK_HF: FixedPattern<25> = FixedPattern::new(
    [
        5, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 3,
    ],
    CLOCK_UNITS_HF,
);

/// Full clock track without half-frame information.
pub const CLOCK_NO_HF: FixedPattern<17> = FixedPattern::new(
    [5, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 3],
    CLOCK_UNITS_NO_HF,
);

/// Start pattern of the data track: bar, space, bar, space, bar, one module
/// each.
pub const DATA_START: FixedPattern<5> = FixedPattern::new([1, 1, 1, 1, 1], 5);

/// Stop pattern of the data track.
pub const DATA_STOP: FixedPattern<3> = FixedPattern::new([1, 1, 1], 3);

/// Payload bit count of the half-frame data track, start/stop excluded.
pub const DATA_LENGTH_HF: usize = 23;
/// Payload bit count of the short data track.
pub const DATA_LENGTH_NO_HF: usize = 15;
