//! Data track decoding.

use std::ops::Range;

use dxfilm_core::{find_left_guard, is_right_guard, RunView};
use log::debug;
#[cfg(feature = "tracing")]
use tracing::instrument;

use super::locator::locate_clock;
use super::result::DX_FILM_EDGE_SYMBOLOGY;
use super::{BarcodeFormat, DecoderParams, DecoderParamsError, RowResult};
use crate::clock::{Clock, ClockRegistry};
use crate::patterns::{DATA_LENGTH_HF, DATA_LENGTH_NO_HF, DATA_START, DATA_STOP};

/// Bit image the long clock track itself produces when a scan accidentally
/// reads it as a data track.
const HF_CLOCK_AS_DATA: [bool; DATA_LENGTH_HF] = [
    false, true, false, true, false, true, false, true, false, true, false, true, false, true,
    false, true, true, true, false, false, false, false, false,
];

/// Per-image decoding state: the clock tracks seen so far.
///
/// Create one per image, pass it to every row call, and drop it with the
/// image. Decoding several images concurrently just means independent states;
/// there is nothing global to contend on.
#[derive(Clone, Debug, Default)]
pub struct DecodingState {
    clocks: ClockRegistry,
}

impl DecodingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clocks located so far on this image.
    pub fn clocks(&self) -> &ClockRegistry {
        &self.clocks
    }
}

/// Row decoder for DX film edge codes.
#[derive(Clone, Debug, Default)]
pub struct RowDecoder {
    params: DecoderParams,
}

impl RowDecoder {
    pub fn new(params: DecoderParams) -> Result<Self, DecoderParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &DecoderParams {
        &self.params
    }

    /// Decode one scan line.
    ///
    /// Runs the clock locator first (recording any clock in `state`), then
    /// attempts the data track against the located clocks. Rows must arrive
    /// so that a clock is seen no later than its data track; the reference
    /// orchestration scans from the vertical centre outward, which guarantees
    /// it.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, view, state))
    )]
    pub fn decode_row(
        &self,
        row_number: i32,
        view: RunView<'_>,
        state: &mut DecodingState,
    ) -> Option<RowResult> {
        locate_clock(row_number, &view, &mut state.clocks, &self.params);

        // A data track with no previously located clock is a false positive.
        if state.clocks.is_empty() {
            return None;
        }

        let mut data = find_left_guard(&view, &DATA_START, self.params.data_quiet_zone)?;
        let x_start = data.pixels_in_front();

        let clock = *state.clocks.nearest(x_start)?;
        if !clock.x_start_near(x_start) {
            return None;
        }
        // Data above its clock belongs to another film stacked over this one.
        if clock.row_number > row_number {
            return None;
        }

        // Every run of the start pattern is one module wide, so its first
        // run measures the module width at this row's scale.
        let per_module = data.width();
        if per_module == 0 {
            return None;
        }

        data.shift(DATA_START.len());

        let payload_len = if clock.half_frame {
            DATA_LENGTH_HF
        } else {
            DATA_LENGTH_NO_HF
        };
        let bits = recover_bits(&mut data, per_module, payload_len)?;

        let stop = data.subview(0, DATA_STOP.len());
        if !is_right_guard(&stop, &DATA_STOP, self.params.data_quiet_zone) {
            return None;
        }

        if !separators_clear(&bits, clock.half_frame) {
            return None;
        }
        if clock.half_frame && bits == HF_CLOCK_AS_DATA {
            return None;
        }
        if !parity_holds(&bits) {
            return None;
        }

        let product_number = field(&bits, 1..8) as u8;
        if product_number == 0 {
            return None;
        }
        let generation_number = field(&bits, 9..13) as u8;
        let half_frame = clock.half_frame.then(|| field(&bits, 13..20) as u8);

        let x_stop = stop.pixels_till_end();
        if !clock.x_stop_near(x_stop) {
            return None;
        }

        // Fresher edges help later rows on skewed film.
        if clock.x_start != x_start || clock.x_stop != x_stop {
            state.clocks.insert_or_refine(Clock {
                x_start,
                x_stop,
                ..clock
            });
        }

        let text = format_text(product_number, generation_number, half_frame);
        debug!("decoded {text:?} on row {row_number} at x=[{x_start}, {x_stop}]");

        Some(RowResult {
            text,
            row_number,
            x_start,
            x_stop,
            product_number,
            generation_number,
            half_frame,
            format: BarcodeFormat::DxFilmEdge,
            symbology: DX_FILM_EDGE_SYMBOLOGY,
        })
    }
}

/// Decode one scan line with default parameters.
pub fn decode_row(
    row_number: i32,
    view: RunView<'_>,
    state: &mut DecodingState,
) -> Option<RowResult> {
    RowDecoder::default().decode_row(row_number, view, state)
}

/// Rebuild the payload bit vector from raw run widths.
///
/// Each run is scaled by `per_module` and rounded to whole modules, half a
/// module rounding up. The first recovered bit is always white: the separator
/// between the start pattern and the payload. Runs must tile the payload
/// exactly; over- or undershoot rejects the row.
fn recover_bits(data: &mut RunView<'_>, per_module: u32, payload_len: usize) -> Option<Vec<bool>> {
    let mut bits = Vec::with_capacity(payload_len);
    let mut signal_length = 0usize;
    let mut current_is_black = false;

    while signal_length < payload_len {
        if !data.is_valid() {
            return None;
        }
        let raw = data.width();
        if raw == 0 {
            return None;
        }

        let modules = modules_for(raw, per_module);
        signal_length += modules as usize;

        // An oversized final run must not spill past the payload; the exact
        // length check below still rejects the row if it would.
        let take = (modules as usize).min(payload_len - bits.len());
        bits.extend(std::iter::repeat(current_is_black).take(take));

        current_is_black = !current_is_black;
        data.shift(1);
    }

    (signal_length == payload_len).then_some(bits)
}

/// Width of a run in whole modules; half a module rounds up.
#[inline]
fn modules_for(raw: u32, per_module: u32) -> u32 {
    raw / per_module + u32::from(raw % per_module >= per_module / 2)
}

/// Structural separator bits that must stay white.
fn separators_clear(bits: &[bool], half_frame: bool) -> bool {
    if bits[0] || bits[8] {
        return false;
    }
    if half_frame {
        !bits[20] && !bits[22]
    } else {
        !bits[14]
    }
}

/// The bit before the last must equal the parity of everything before it.
fn parity_holds(bits: &[bool]) -> bool {
    let parity_bit = bits[bits.len() - 2];
    let ones = bits[..bits.len() - 2].iter().filter(|&&b| b).count();
    (ones % 2 == 1) == parity_bit
}

/// Decimal value of `bits[range]`, most significant bit first.
fn field(bits: &[bool], range: Range<usize>) -> u32 {
    bits[range].iter().fold(0, |acc, &b| (acc << 1) | u32::from(b))
}

fn format_text(product: u8, generation: u8, half_frame: Option<u8>) -> String {
    let mut text = format!("{product}-{generation}");
    if let Some(frame) = half_frame {
        text.push('/');
        text.push_str(&(frame / 2).to_string());
        if frame % 2 == 1 {
            text.push('A');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_a_module_rounds_up() {
        assert_eq!(modules_for(150, 100), 2);
        assert_eq!(modules_for(149, 100), 1);
        assert_eq!(modules_for(100, 100), 1);
        assert_eq!(modules_for(30, 30), 1);
        assert_eq!(modules_for(44, 30), 1);
        assert_eq!(modules_for(45, 30), 2);
    }

    #[test]
    fn bit_fields_read_msb_first() {
        let bits = [false, true, true, true, false, false, true, true];
        assert_eq!(field(&bits, 1..8), 115);
        assert_eq!(field(&bits, 0..1), 0);
    }

    #[test]
    fn parity_counts_all_but_the_last_two_bits() {
        // three ones ahead of the parity bit
        let mut bits = vec![false; 15];
        bits[1] = true;
        bits[4] = true;
        bits[7] = true;
        bits[13] = true;
        assert!(parity_holds(&bits));

        bits[13] = false;
        assert!(!parity_holds(&bits));
    }

    #[test]
    fn runs_tile_the_payload_exactly() {
        // 1 + 1 + 2 + 4 + 3 + 3 + 1 modules = 15
        let runs = [30, 30, 60, 120, 90, 90, 30, 30, 30, 30];
        let mut view = RunView::starting_with_space(&runs);
        let bits = recover_bits(&mut view, 30, 15).expect("payload");
        assert_eq!(bits.len(), 15);
        assert_eq!(
            bits,
            vec![
                false, true, false, false, true, true, true, true, false, false, false, true,
                true, true, false
            ]
        );

        // a 13-module payload ends mid-run: overshoot is rejected
        let mut view = RunView::starting_with_space(&runs);
        assert!(recover_bits(&mut view, 30, 13).is_none());
    }

    #[test]
    fn zero_width_runs_abort() {
        let runs = [30, 0, 60];
        let mut view = RunView::starting_with_space(&runs);
        assert!(recover_bits(&mut view, 30, 15).is_none());
    }

    #[test]
    fn exhausted_rows_abort() {
        let runs = [30, 30, 60];
        let mut view = RunView::starting_with_space(&runs);
        assert!(recover_bits(&mut view, 30, 15).is_none());
    }

    #[test]
    fn frame_text_halves_and_marks_odd() {
        assert_eq!(format_text(115, 10, Some(23)), "115-10/11A");
        assert_eq!(format_text(115, 10, Some(22)), "115-10/11");
        assert_eq!(format_text(79, 3, None), "79-3");
        assert_eq!(format_text(1, 0, Some(0)), "1-0/0");
        assert_eq!(format_text(1, 0, Some(1)), "1-0/0A");
    }
}
