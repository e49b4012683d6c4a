use serde::{Deserialize, Serialize};

use super::DecoderParamsError;

/// Tuning knobs for the row decoder.
///
/// Quiet zones are multiples of one module. The data zone is deliberately
/// small: shrinking it improves recall, and the clock gate keeps the false
/// positives in check.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DecoderParams {
    /// Minimum white margin left of the short clock, in modules.
    pub clock_quiet_zone_no_hf: f32,
    /// Minimum white margin left of the half-frame clock, in modules.
    pub clock_quiet_zone_hf: f32,
    /// Minimum white margin around the data track, in modules.
    pub data_quiet_zone: f32,
    /// Fraction of one module of horizontal drift tolerated between a data
    /// track edge and its clock.
    pub tolerance_ratio: f32,
}

impl Default for DecoderParams {
    fn default() -> Self {
        Self {
            clock_quiet_zone_no_hf: 2.0,
            clock_quiet_zone_hf: 1.0,
            data_quiet_zone: 0.5,
            tolerance_ratio: 0.5,
        }
    }
}

impl DecoderParams {
    pub fn validate(&self) -> Result<(), DecoderParamsError> {
        let zones = [
            ("short clock", self.clock_quiet_zone_no_hf),
            ("half-frame clock", self.clock_quiet_zone_hf),
            ("data", self.data_quiet_zone),
        ];
        for (name, got) in zones {
            if !(got > 0.0) {
                return Err(DecoderParamsError::NonPositiveQuietZone { name, got });
            }
        }

        if !(self.tolerance_ratio > 0.0 && self.tolerance_ratio <= 1.0) {
            return Err(DecoderParamsError::ToleranceRatioOutOfRange {
                got: self.tolerance_ratio,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(DecoderParams::default().validate(), Ok(()));
    }

    #[test]
    fn bad_values_are_rejected() {
        let params = DecoderParams {
            data_quiet_zone: 0.0,
            ..DecoderParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DecoderParamsError::NonPositiveQuietZone { name: "data", .. })
        ));

        let params = DecoderParams {
            tolerance_ratio: f32::NAN,
            ..DecoderParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DecoderParamsError::ToleranceRatioOutOfRange { .. })
        ));
    }
}
