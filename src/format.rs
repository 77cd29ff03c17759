use crate::config::CardConfig;
use crate::model::DisplayValue;

/// Shown in place of absent readings.
pub const PLACEHOLDER: &str = "--";

const SOC_DECIMALS: usize = 1;
const SOC_UNIT: &str = "%";

/* Enough fractional digits to print any f64 without rounding */
const EXACT_DIGITS: usize = 1100;

/// Format a power reading with the configured precision and unit, e.g. `1234.5 W`.
pub fn format_power(value: DisplayValue, config: &CardConfig) -> String {
    format_with(value, config.decimals, &config.unit)
}

/// Format a state of charge reading, e.g. `64.0 %`.
pub fn format_soc(value: DisplayValue) -> String {
    format_with(value, SOC_DECIMALS, SOC_UNIT)
}

fn format_with(value: DisplayValue, decimals: usize, unit: &str) -> String {
    match value {
        None => String::from(PLACEHOLDER),
        Some(v) => format!("{} {}", fixed(v, decimals), unit),
    }
}

fn fixed(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        let name = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return String::from(name);
    }

    /* -0.0 shows up when a zero reading is inverted */
    let value = if value == 0.0 { 0.0 } else { value };
    round_tie_away(value, decimals).unwrap_or_else(|| format!("{:.*}", decimals, value))
}

/// Format `value` if it lies exactly halfway between two representable outputs, rounding away
/// from zero (`2.5` -> `3`, `-2.5` -> `-3`). Returns `None` for every other value.
fn round_tie_away(value: f64, decimals: usize) -> Option<String> {
    if decimals >= EXACT_DIGITS {
        return None;
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let point = exact.find('.')?;
    let (kept, rest) = exact.split_at(point + 1 + decimals);

    let mut rest = rest.bytes();
    if rest.next() != Some(b'5') || !rest.all(|b| b == b'0') {
        return None;
    }

    let mut digits: Vec<u8> = kept.trim_end_matches('.').bytes().collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev().filter(|d| **d != b'.') {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let sign = if value < 0.0 { "-" } else { "" };
    String::from_utf8(digits)
        .ok()
        .map(|digits| format!("{}{}", sign, digits))
}

#[cfg(test)]
mod test {
    use super::{format_power, format_soc, PLACEHOLDER};
    use crate::config::{CardConfig, EntitiesConfig};

    fn config(unit: &str, decimals: usize) -> CardConfig {
        CardConfig {
            entities: EntitiesConfig::default(),
            unit: String::from(unit),
            decimals,
        }
    }

    #[test]
    fn absent_is_placeholder() {
        assert_eq!(PLACEHOLDER, format_power(None, &CardConfig::new(EntitiesConfig::default())));
        assert_eq!(PLACEHOLDER, format_power(None, &config("kW", 3)));
        assert_eq!(PLACEHOLDER, format_power(None, &config("", 0)));
        assert_eq!(PLACEHOLDER, format_soc(None));
    }

    #[test]
    fn configured_precision_and_unit() {
        assert_eq!("1234.50 W", format_power(Some(1234.5), &config("W", 2)));
        assert_eq!("1234.5 W", format_power(Some(1234.5), &CardConfig::new(EntitiesConfig::default())));
        assert_eq!("1235 W", format_power(Some(1234.5625), &config("W", 0)));
        assert_eq!("-0.875 kW", format_power(Some(-0.875), &config("kW", 3)));
    }

    #[test]
    fn negative_zero_is_zero() {
        let config = CardConfig::new(EntitiesConfig::default());
        assert_eq!("0.0 W", format_power(Some(-0.0), &config));
    }

    #[test]
    fn infinite_values() {
        let config = CardConfig::new(EntitiesConfig::default());
        assert_eq!("Infinity W", format_power(Some(f64::INFINITY), &config));
        assert_eq!("-Infinity W", format_power(Some(f64::NEG_INFINITY), &config));
    }

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!("1235 W", format_power(Some(1234.5), &config("W", 0)));
        assert_eq!("3 W", format_power(Some(2.5), &config("W", 0)));
        assert_eq!("-3 W", format_power(Some(-2.5), &config("W", 0)));
        assert_eq!("100 W", format_power(Some(99.5), &config("W", 0)));
        assert_eq!("-1000 W", format_power(Some(-999.5), &config("W", 0)));
        assert_eq!("9.8 kW", format_power(Some(9.75), &config("kW", 1)));
        assert_eq!("0.13 kW", format_power(Some(0.125), &config("kW", 2)));
        assert_eq!("50.3 %", format_soc(Some(50.25)));
        assert_eq!("0.3 %", format_soc(Some(0.25)));
    }

    #[test]
    fn near_halves_follow_exact_value() {
        /* 1.005 and 9.95 are stored slightly below the written value */
        assert_eq!("1.00 W", format_power(Some(1.005), &config("W", 2)));
        assert_eq!("9.9 W", format_power(Some(9.95), &config("W", 1)));
        assert_eq!("2 W", format_power(Some(2.4999), &config("W", 0)));
    }

    #[test]
    fn soc_ignores_configured_unit() {
        assert_eq!("64.0 %", format_soc(Some(64.0)));
        assert_eq!("99.5 %", format_soc(Some(99.48)));
    }
}
