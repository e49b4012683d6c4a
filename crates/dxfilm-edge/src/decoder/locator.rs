//! Clock track location.

use dxfilm_core::{find_left_guard, RunView};
use log::debug;

use super::DecoderParams;
use crate::clock::{Clock, ClockRegistry};
use crate::patterns::{CLOCK_COMMON, CLOCK_HF, CLOCK_NO_HF, CLOCK_UNITS_HF, CLOCK_UNITS_NO_HF};

/// Try to detect a clock track on this row and record it in the registry.
///
/// The shared clock prefix is matched first so that rows without any code,
/// the overwhelming majority, cost a single scan. Re-observing a known clock
/// replaces its entry: rows scanned later often yield tighter edges when the
/// film is slightly skewed.
pub(crate) fn locate_clock(
    row_number: i32,
    view: &RunView<'_>,
    clocks: &mut ClockRegistry,
    params: &DecoderParams,
) {
    let common_quiet = params
        .clock_quiet_zone_no_hf
        .min(params.clock_quiet_zone_hf);
    if find_left_guard(view, &CLOCK_COMMON, common_quiet).is_none() {
        return;
    }

    let (found, half_frame) = match find_left_guard(view, &CLOCK_HF, params.clock_quiet_zone_hf) {
        Some(found) => (found, true),
        None => match find_left_guard(view, &CLOCK_NO_HF, params.clock_quiet_zone_no_hf) {
            Some(found) => (found, false),
            None => return,
        },
    };

    let x_start = found.pixels_in_front();
    let x_stop = found.pixels_till_end();
    let units = if half_frame {
        CLOCK_UNITS_HF
    } else {
        CLOCK_UNITS_NO_HF
    };
    let pixel_tolerance = ((x_stop - x_start) as f32 / units as f32 * params.tolerance_ratio) as u32;

    debug!("clock at x=[{x_start}, {x_stop}] half_frame={half_frame} row={row_number}");
    clocks.insert_or_refine(Clock {
        row_number,
        half_frame,
        x_start,
        x_stop,
        pixel_tolerance,
    });
}
