//! Decode a synthetic pair of film scan lines.
//!
//! Real callers get run-length rows from a binariser; here the two tracks of
//! a half-frame code (product 115, generation 10, frame 11A) are rendered by
//! hand at 30 px per module.

use dxfilm_core::{logger, RunView};
use dxfilm_edge::{DecoderParams, DecodingState, RowDecoder};
use log::{info, LevelFilter};

fn main() {
    logger::init_with_level(LevelFilter::Debug).expect("install logger");

    const UNIT: u32 = 30;

    // Half-frame clock track: wide bar, 23 stripes, closing bar.
    let mut clock_row = vec![100u32];
    clock_row.push(5 * UNIT);
    clock_row.extend(std::iter::repeat(UNIT).take(23));
    clock_row.push(3 * UNIT);
    clock_row.push(60);

    // Data track below it: start pattern, payload, stop pattern. Runs are
    // whole modules; a run of 90 px is three bits of one colour.
    let data_row: Vec<u32> = vec![
        100, // quiet margin
        30, 30, 30, 30, 30, // start pattern
        30, 90, 60, 60, 30, 30, 30, 30, 90, 30, 30, 90, 30, 30, 30, // payload
        30, 30, 30, // stop pattern
        60,
    ];

    let decoder = RowDecoder::new(DecoderParams::default()).expect("valid params");
    let mut state = DecodingState::new();

    let on_clock = decoder.decode_row(10, RunView::starting_with_space(&clock_row), &mut state);
    info!(
        "row 10: {:?} ({} clock(s) located)",
        on_clock.as_ref().map(|r| &r.text),
        state.clocks().len()
    );

    let result = decoder
        .decode_row(20, RunView::starting_with_space(&data_row), &mut state)
        .expect("data track decodes");
    info!(
        "row 20: {} at x=[{}, {}]",
        result.text, result.x_start, result.x_stop
    );
}
