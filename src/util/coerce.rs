//! Lenient numeric coercion for form input and pointer math.

#[cfg(test)]
#[path = "coerce_test.rs"]
mod coerce_test;

/// Parse the leading integer of a form value.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit, and input without leading digits yields 0. Values beyond the
/// `i32` range saturate.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> i32 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(byte - b'0'));
    }
    if negative {
        value = -value;
    }
    saturate_i32(value)
}

/// Round a pointer-space distance to whole pixels. Non-finite input is 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_px(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn saturate_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
