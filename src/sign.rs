use serde_json::Value;

pub const PV_NEG_GEN: &str = "pv_neg_gen";
pub const GRID_NEG_IMPORT: &str = "grid_neg_import";
pub const BAT_POS_CHARGE: &str = "bat_pos_charge";

/// Sign convention of a raw sensor reading.
///
/// Canonical polarity is: PV positive while generating, grid positive while
/// importing, battery positive while discharging. Sensors that report the
/// opposite polarity are tagged with one of the inverting conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignConvention {
    /// Reading is already in canonical polarity. Also used for unset and
    /// unrecognized tags.
    Default,
    /// PV reports negative values while generating.
    InvertOnGeneration,
    /// Grid reports negative values while importing.
    InvertOnImport,
    /// Battery reports positive values while charging.
    InvertOnCharge,
}

impl Default for SignConvention {
    fn default() -> Self {
        SignConvention::Default
    }
}

impl SignConvention {
    /// Map a configuration tag to its convention. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            PV_NEG_GEN => SignConvention::InvertOnGeneration,
            GRID_NEG_IMPORT => SignConvention::InvertOnImport,
            BAT_POS_CHARGE => SignConvention::InvertOnCharge,
            _ => SignConvention::Default,
        }
    }

    pub fn inverts(self) -> bool {
        !matches!(self, SignConvention::Default)
    }

    /// Convert a raw reading into canonical polarity. Absent stays absent.
    pub fn apply(self, value: Option<f64>) -> Option<f64> {
        value.map(|v| if self.inverts() { -v } else { v })
    }
}

impl<'de> serde::Deserialize<'de> for SignConvention {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;

        /* Anything that is not a known tag, including non-strings, is the default convention */
        Ok(value
            .as_str()
            .map(SignConvention::from_tag)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod test {
    use super::SignConvention;

    const ALL: [SignConvention; 4] = [
        SignConvention::Default,
        SignConvention::InvertOnGeneration,
        SignConvention::InvertOnImport,
        SignConvention::InvertOnCharge,
    ];

    #[test]
    fn absent_stays_absent() {
        for sign in ALL.iter() {
            assert_eq!(None, sign.apply(None));
        }
    }

    #[test]
    fn invert_tags_negate() {
        assert_eq!(Some(500.0), SignConvention::from_tag("pv_neg_gen").apply(Some(-500.0)));
        assert_eq!(Some(-200.0), SignConvention::from_tag("grid_neg_import").apply(Some(200.0)));
        assert_eq!(Some(-1.5), SignConvention::from_tag("bat_pos_charge").apply(Some(1.5)));
    }

    #[test]
    fn inversion_is_involutive() {
        for sign in ALL.iter() {
            assert_eq!(Some(42.25), sign.apply(sign.apply(Some(42.25))));
        }
    }

    #[test]
    fn unknown_tags_pass_through() {
        for tag in ["", "pv_pos_gen", "grid_pos_import", "bat_pos_discharge", "PV_NEG_GEN", "🙃"].iter() {
            let sign = SignConvention::from_tag(tag);
            assert_eq!(SignConvention::Default, sign);
            assert_eq!(Some(-3.0), sign.apply(Some(-3.0)));
        }
    }

    #[test]
    fn deserialize_is_lenient() {
        let sign: SignConvention = serde_json::from_str("\"grid_neg_import\"").unwrap();
        assert_eq!(SignConvention::InvertOnImport, sign);

        let sign: SignConvention = serde_json::from_str("\"nonsense\"").unwrap();
        assert_eq!(SignConvention::Default, sign);

        let sign: SignConvention = serde_json::from_str("17").unwrap();
        assert_eq!(SignConvention::Default, sign);
    }
}
