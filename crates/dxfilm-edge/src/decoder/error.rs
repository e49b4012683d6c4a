/// Errors returned when constructing a [`RowDecoder`](super::RowDecoder).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecoderParamsError {
    #[error("{name} quiet zone must be positive (got {got})")]
    NonPositiveQuietZone { name: &'static str, got: f32 },
    #[error("tolerance ratio must lie in (0, 1] (got {got})")]
    ToleranceRatioOutOfRange { got: f32 },
}
