use serde::Serialize;

/// Barcode family emitted by this decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BarcodeFormat {
    DxFilmEdge,
}

/// AIM-style symbology identifier attached to every result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SymbologyIdentifier {
    pub code: char,
    pub modifier: char,
}

/// Identifier reported for DX film edge codes. The symbology predates AIM
/// identifiers and has no check-character scheme to announce.
pub const DX_FILM_EDGE_SYMBOLOGY: SymbologyIdentifier = SymbologyIdentifier {
    code: 'I',
    modifier: '0',
};

/// One decoded data track.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowResult {
    /// Canonical text: `"DX1-DX2"`, or `"DX1-DX2/frame"` with a trailing `A`
    /// on odd half-frames.
    pub text: String,
    /// Row the data track was read from.
    pub row_number: i32,
    /// Pixel offset of the data track's left edge.
    pub x_start: u32,
    /// Pixel offset of the data track's right edge.
    pub x_stop: u32,
    /// DX product number (7 bits, never zero).
    pub product_number: u8,
    /// DX generation number (4 bits).
    pub generation_number: u8,
    /// Raw half-frame index when the long variant was read.
    pub half_frame: Option<u8>,
    pub format: BarcodeFormat,
    pub symbology: SymbologyIdentifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_serialize_to_json() {
        let result = RowResult {
            text: "115-10/11A".into(),
            row_number: 20,
            x_start: 100,
            x_stop: 1030,
            product_number: 115,
            generation_number: 10,
            half_frame: Some(23),
            format: BarcodeFormat::DxFilmEdge,
            symbology: DX_FILM_EDGE_SYMBOLOGY,
        };

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["text"], "115-10/11A");
        assert_eq!(json["format"], "DxFilmEdge");
        assert_eq!(json["half_frame"], 23);
    }
}
