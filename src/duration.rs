//! Duration literals: `"1500ms"`, `"2h45m"`, `"1.5h"`, `"-3s"`.
//!
//! A literal is an optional sign followed by one or more `<number><unit>`
//! terms. Numbers may carry a fraction; units are `ns`, `us` (or `µs`/`μs`),
//! `ms`, `s`, `m` and `h`. The bare literal `0` needs no unit. Values are
//! signed nanosecond counts that must fit an `i64`.

use std::fmt::Write as _;

use thiserror::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of `i64::MIN`; the largest absolute value a literal may reach.
const LIMIT: u64 = 1 << 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{literal}'")]
    UnknownUnit { unit: String, literal: String },

    #[error("duration '{0}' overflows a signed 64-bit nanosecond count")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a duration literal into signed nanoseconds.
pub fn parse_duration(literal: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(literal.to_string());
    let overflow = || DurationError::Overflow(literal.to_string());

    let mut s = literal;
    let negative = match s.as_bytes().first() {
        Some(b'-') => {
            s = &s[1..];
            true
        }
        Some(b'+') => {
            s = &s[1..];
            false
        }
        _ => false,
    };

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let first = s.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        let int_len = leading_digits(s);
        let whole = leading_int(&s[..int_len]).ok_or_else(overflow)?;
        s = &s[int_len..];

        let mut frac: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut frac_len = 0;
        if let Some(after_dot) = s.strip_prefix('.') {
            s = after_dot;
            frac_len = leading_digits(s);
            (frac, scale) = leading_fraction(&s[..frac_len]);
            s = &s[frac_len..];
        }
        if int_len == 0 && frac_len == 0 {
            return Err(invalid());
        }

        let unit_len = s
            .bytes()
            .position(|c| c == b'.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(literal.to_string()));
        }
        let unit_str = &s[..unit_len];
        let unit = unit_nanos(unit_str).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit_str.to_string(),
            literal: literal.to_string(),
        })?;
        s = &s[unit_len..];

        let mut term = whole.checked_mul(unit).ok_or_else(overflow)?;
        if term > LIMIT {
            return Err(overflow());
        }
        if frac > 0 {
            term = term
                .checked_add((frac as f64 * (unit as f64 / scale)) as u64)
                .ok_or_else(overflow)?;
            if term > LIMIT {
                return Err(overflow());
            }
        }

        total = total.checked_add(term).ok_or_else(overflow)?;
        if total > LIMIT {
            return Err(overflow());
        }
    }

    if negative {
        if total == LIMIT {
            Ok(i64::MIN)
        } else {
            Ok(-(total as i64))
        }
    } else if total == LIMIT {
        Err(overflow())
    } else {
        Ok(total as i64)
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn leading_int(digits: &str) -> Option<u64> {
    digits.bytes().try_fold(0u64, |acc, c| {
        acc.checked_mul(10)?.checked_add(u64::from(c - b'0'))
    })
}

/// Fraction digits as `(value, scale)`. Digits past `u64` precision are dropped.
fn leading_fraction(digits: &str) -> (u64, f64) {
    let mut value: u64 = 0;
    let mut scale = 1.0;
    for c in digits.bytes() {
        let Some(next) = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(c - b'0')))
        else {
            break;
        };
        value = next;
        scale *= 10.0;
    }
    (value, scale)
}

/// Format signed nanoseconds as a duration literal, e.g. `2m0s`, `1.5ms`.
pub fn format_duration(nanos: i64) -> String {
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    out.push_str(&format_magnitude(u128::from(nanos.unsigned_abs())));
    out
}

/// Format an unsigned nanosecond count, the magnitude part of [`format_duration`].
pub fn format_nanos(nanos: u128) -> String {
    format_magnitude(nanos)
}

fn format_magnitude(u: u128) -> String {
    if u == 0 {
        return "0s".to_string();
    }

    let micro = u128::from(MICROSECOND);
    let milli = u128::from(MILLISECOND);
    let second = u128::from(SECOND);

    if u < second {
        return if u < micro {
            format!("{u}ns")
        } else if u < milli {
            format!("{}µs", with_fraction(u, 3))
        } else {
            format!("{}ms", with_fraction(u, 6))
        };
    }

    let seconds = with_fraction(u % (60 * second), 9);
    let minutes_total = u / (60 * second);

    let mut out = String::new();
    if minutes_total > 0 {
        let hours = minutes_total / 60;
        if hours > 0 {
            let _ = write!(out, "{hours}h");
        }
        let _ = write!(out, "{}m", minutes_total % 60);
    }
    out.push_str(&seconds);
    out.push('s');
    out
}

/// `value / 10^prec` with trailing fractional zeros (and a bare `.`) trimmed.
fn with_fraction(value: u128, prec: u32) -> String {
    let pow = 10u128.pow(prec);
    let whole = value / pow;
    let frac = value % pow;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}", width = prec as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
