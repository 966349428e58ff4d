//! Zero-value predicates used by export to avoid clobbering empty keys.
//!
//! A key is left out of an export batch when both the stored string and the
//! field value are the zero of the field's kind. Stored strings that do not
//! parse under the kind are treated as non-zero and reported as warnings.

use std::fmt::Display;
use std::time::Duration;

use crate::kind::{FieldRef, Kind};
use crate::parse;

/// Whether a field value is the zero of its kind.
pub fn is_zero_typed(value: &FieldRef<'_>) -> bool {
    match *value {
        FieldRef::Bool(v) => !v,
        FieldRef::I8(v) => v == 0,
        FieldRef::I16(v) => v == 0,
        FieldRef::I32(v) => v == 0,
        FieldRef::I64(v) => v == 0,
        FieldRef::Isize(v) => v == 0,
        FieldRef::U8(v) => v == 0,
        FieldRef::U16(v) => v == 0,
        FieldRef::U32(v) => v == 0,
        FieldRef::U64(v) => v == 0,
        FieldRef::Usize(v) => v == 0,
        FieldRef::F32(v) => v == 0.0,
        FieldRef::F64(v) => v == 0.0,
        FieldRef::Str(s) => s.is_empty(),
        FieldRef::Duration(d) => d == Duration::ZERO,
        FieldRef::Optional(present) => !present,
        FieldRef::Opaque(kind) => {
            tracing::warn!(%kind, "no zero value for kind");
            false
        }
    }
}

/// Whether `raw`, read as `kind`, is that kind's zero. An empty string is
/// always zero.
pub fn is_zero_string(raw: &str, kind: Kind) -> bool {
    if raw.is_empty() {
        return true;
    }

    match kind {
        Kind::Bool => parsed_zero(raw, kind, parse::parse_bool(raw), |v| !v),
        Kind::F32 | Kind::F64 => parsed_zero(raw, kind, parse::parse_float(raw), |v| v == 0.0),
        Kind::I8 | Kind::I16 | Kind::I32 => {
            parsed_zero(raw, kind, raw.parse::<i32>(), |v| v == 0)
        }
        Kind::Isize => parsed_zero(raw, kind, raw.parse::<i64>(), |v| v == 0),
        Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 | Kind::Usize => {
            parsed_zero(raw, kind, raw.parse::<u64>(), |v| v == 0)
        }
        Kind::I64 | Kind::Duration => parsed_zero(raw, kind, parse::parse_nanos(raw), |v| v == 0),
        Kind::String | Kind::Optional | Kind::Sequence | Kind::Map => false,
    }
}

fn parsed_zero<T, E: Display>(
    raw: &str,
    kind: Kind,
    parsed: Result<T, E>,
    is_zero: impl FnOnce(T) -> bool,
) -> bool {
    match parsed {
        Ok(v) => is_zero(v),
        Err(e) => {
            tracing::warn!(value = raw, %kind, error = %e, "couldn't convert stored value");
            false
        }
    }
}
