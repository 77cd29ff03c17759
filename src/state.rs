use crate::model::{DisplayValue, StateSnapshot};

const INFINITY: &str = "Infinity";

/// Read the numeric state of `entity_id` from `snapshot`.
///
/// Returns `None` when the host has not supplied a snapshot yet, when no entity is configured,
/// when the entity is unknown to the host or when its state has no numeric prefix
/// (`unavailable`, `unknown`, empty string, ...).
pub fn state_value(snapshot: Option<&StateSnapshot>, entity_id: Option<&str>) -> DisplayValue {
    let entity_id = entity_id.filter(|id| !id.is_empty())?;
    let entity = snapshot?.get(entity_id)?;
    let value = parse_leading_float(&entity.state);

    log::trace!("entity: {}, state: {:?}, value: {:?}", entity_id, entity.state, value);
    value
}

/// Parse the longest numeric prefix of `input`, ignoring leading whitespace and any trailing
/// garbage (`"230.5 W"` reads as `230.5`). Returns `None` if there is no numeric prefix.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start_matches(is_leading_space);
    let bytes = s.as_bytes();
    let mut end = 0;

    if let Some(b'+') | Some(b'-') = bytes.first() {
        end += 1;
    }

    if s[end..].starts_with(INFINITY) {
        let magnitude = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -magnitude } else { magnitude });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    /* Exponent only counts when followed by at least one digit */
    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let mut exp_end = end + 1;
        if let Some(b'+') | Some(b'-') = bytes.get(exp_end) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/* Byte order mark counts as space, next line (U+0085) does not */
fn is_leading_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
