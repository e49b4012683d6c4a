//! Row-based decoder for the DX film edge barcode.
//!
//! The DX film edge code is a 1D optical code printed between the sprocket
//! holes of 35 mm film. It carries a 7-bit product number, a 4-bit
//! generation number and, in the longer variant, a 7-bit half-frame index.
//! The code consists of two horizontal tracks: a uniformly striped *clock*
//! and, below it, the payload-bearing *data* track. A scan line crosses one
//! track at a time, so decoding is stateful across the rows of an image:
//! clocks found on earlier rows gate and align data tracks found later.
//!
//! Inputs are run-length views over binarised scan lines (see
//! [`dxfilm_core::RunView`]); producing those from pixels is the caller's
//! business.
//!
//! ## Quickstart
//!
//! ```
//! use dxfilm_core::RunView;
//! use dxfilm_edge::{decode_row, DecodingState};
//!
//! // Short clock track at 4 px per module, then its data track encoding
//! // product 79, generation 3.
//! let clock_row: Vec<u32> = [20, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 12, 40].to_vec();
//! let data_row: Vec<u32> =
//!     [4, 4, 4, 4, 4, 4, 4, 8, 16, 12, 12, 4, 4, 4, 4, 20].to_vec();
//!
//! let mut state = DecodingState::new();
//! assert!(decode_row(0, RunView::new(&clock_row), &mut state).is_none());
//!
//! let result = decode_row(1, RunView::new(&data_row), &mut state).expect("data track");
//! assert_eq!(result.text, "79-3");
//! assert_eq!(result.product_number, 79);
//! assert_eq!(result.generation_number, 3);
//! ```

mod clock;
mod decoder;
pub mod patterns;

pub use clock::{Clock, ClockRegistry};
pub use decoder::{
    decode_row, BarcodeFormat, DecoderParams, DecoderParamsError, DecodingState, RowDecoder,
    RowResult, SymbologyIdentifier, DX_FILM_EDGE_SYMBOLOGY,
};
