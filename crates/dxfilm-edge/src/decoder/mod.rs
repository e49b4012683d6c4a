//! Row-based decoding pipeline.
//!
//! The decoder is stateful across the rows of one image: clock tracks found
//! on earlier rows gate and align the data tracks found on later ones. Rows
//! are decoded one at a time; most yield nothing, and that is the normal
//! outcome rather than an error.

mod error;
mod locator;
mod params;
mod pipeline;
mod result;

pub use error::DecoderParamsError;
pub use params::DecoderParams;
pub use pipeline::{decode_row, DecodingState, RowDecoder};
pub use result::{BarcodeFormat, RowResult, SymbologyIdentifier, DX_FILM_EDGE_SYMBOLOGY};
