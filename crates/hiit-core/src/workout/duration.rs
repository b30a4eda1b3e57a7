//! ISO-8601-like duration tokens.
//!
//! The schedule layer stores offsets as `P{n}D`, `PT{n}H` or `PT{n}M`
//! tokens. This codec is only consumed for computing default schedule
//! offsets; the execution engine itself never touches it.

use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
}

/// Render an amount/unit pair as a duration token.
pub fn serialize_duration(amount: u64, unit: DurationUnit) -> String {
    match unit {
        DurationUnit::Minutes => format!("PT{amount}M"),
        DurationUnit::Hours => format!("PT{amount}H"),
        DurationUnit::Days => format!("P{amount}D"),
    }
}

/// Parse one of the three single-unit token forms.
///
/// Returns `None` for anything else; callers report the anomaly and fall
/// back to a zero offset.
pub fn deserialize_duration(token: &str) -> Option<(u64, DurationUnit)> {
    if let Some(rest) = token.strip_prefix("PT") {
        if let Some(digits) = rest.strip_suffix('H') {
            return parse_amount(digits).map(|n| (n, DurationUnit::Hours));
        }
        if let Some(digits) = rest.strip_suffix('M') {
            return parse_amount(digits).map(|n| (n, DurationUnit::Minutes));
        }
        return None;
    }
    if let Some(rest) = token.strip_prefix('P') {
        if let Some(digits) = rest.strip_suffix('D') {
            return parse_amount(digits).map(|n| (n, DurationUnit::Days));
        }
    }
    None
}

/// Parse the combined `P{d}DT{h}H{m}M` form into an offset.
///
/// Every component is optional (`PT2H`, `P1D`, `P1DT30M`, ...), but the
/// leading `P` is not.
pub fn parse_duration_offset(token: &str) -> Option<Duration> {
    let rest = token.strip_prefix('P')?;
    let (days, rest) = take_component(rest, 'D');
    let rest = match rest.strip_prefix('T') {
        Some(timed) => timed,
        None if rest.is_empty() => "",
        None => return None,
    };
    let (hours, rest) = take_component(rest, 'H');
    let (minutes, rest) = take_component(rest, 'M');
    if !rest.is_empty() {
        return None;
    }

    let minutes = days.checked_mul(24 * 60)?
        .checked_add(hours.checked_mul(60)?)?
        .checked_add(minutes)?;
    Duration::try_minutes(minutes as i64)
}

/// Split a leading `{digits}{marker}` component off `input`, yielding the
/// parsed amount (0 when the component is absent) and the remainder.
fn take_component(input: &str, marker: char) -> (u64, &str) {
    let digits_len = input.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits_len == 0 {
        return (0, input);
    }
    let (digits, rest) = input.split_at(digits_len);
    match rest.strip_prefix(marker) {
        Some(remainder) => (parse_amount(digits).unwrap_or(0), remainder),
        None => (0, input),
    }
}

fn parse_amount(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
