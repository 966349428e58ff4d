//! String-to-value parsers shared by the store getters and the zero policy.

use thiserror::Error;

use crate::duration::{self, DurationError};

/// A stored string that could not be read as the requested type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("invalid boolean '{0}'")]
    Bool(String),

    #[error("invalid integer '{0}'")]
    Int(String),

    #[error("invalid unsigned integer '{0}'")]
    Uint(String),

    #[error("invalid float '{0}'")]
    Float(String),

    #[error("'{0}' is out of range")]
    OutOfRange(String),

    #[error("'{raw}' is neither an integer nor a duration: {source}")]
    Nanos { raw: String, source: DurationError },
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(s: &str) -> Result<bool, ValueError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::Bool(s.to_string())),
    }
}

/// Base-10 integer, falling back to a float truncated toward zero.
///
/// A float outside the `i64` range is an error rather than a saturated value.
pub fn parse_int(s: &str) -> Result<i64, ValueError> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        Ok(f) if f.is_finite() => {
            let t = f.trunc();
            if t >= i64::MIN as f64 && t < i64::MAX as f64 {
                Ok(t as i64)
            } else {
                Err(ValueError::OutOfRange(s.to_string()))
            }
        }
        _ => Err(ValueError::Int(s.to_string())),
    }
}

/// Base-10 unsigned integer, falling back to a non-negative float.
pub fn parse_uint(s: &str) -> Result<u64, ValueError> {
    if let Ok(u) = s.parse::<u64>() {
        return Ok(u);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => {
            let t = f.trunc();
            if t < u64::MAX as f64 {
                Ok(t as u64)
            } else {
                Err(ValueError::OutOfRange(s.to_string()))
            }
        }
        _ => Err(ValueError::Uint(s.to_string())),
    }
}

pub fn parse_float(s: &str) -> Result<f64, ValueError> {
    s.parse::<f64>()
        .map_err(|_| ValueError::Float(s.to_string()))
}

/// A float narrowed to `f32`. Finite values too large for `f32` are errors;
/// an explicit `inf` or `NaN` passes through.
pub fn parse_f32(s: &str) -> Result<f32, ValueError> {
    let f = parse_float(s)?;
    let narrowed = f as f32;
    if f.is_finite() && !narrowed.is_finite() {
        return Err(ValueError::OutOfRange(s.to_string()));
    }
    Ok(narrowed)
}

/// Integer first, duration literal second. Both yield nanoseconds when the
/// value is used as a duration.
pub fn parse_nanos(s: &str) -> Result<i64, ValueError> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    duration::parse_duration(s).map_err(|source| ValueError::Nanos {
        raw: s.to_string(),
        source,
    })
}
