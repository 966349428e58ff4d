//! Config operations: key lookup, listing, value validation and result types.
//!
//! Provides the logic behind `config list`, `config get` and `config set`, and
//! the `ConfigResult` enum that callers use to display results.

use std::fmt::{self, Display};

use crate::bind::{Binding, BindingSet};
use crate::error::BindError;
use crate::kind::Kind;
use crate::parse;
use crate::record::Record;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A bound key and the value its field holds.
    KeyValue { key: String, value: String },
    /// Confirmation that a value was committed to the store.
    ValueSet {
        key: String,
        value: String,
        exported: bool,
    },
    /// Every bound key with its value, in declaration order.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::ValueSet {
                key,
                value,
                exported,
            } => {
                write!(f, "Set {key} = {value}")?;
                if *exported {
                    write!(f, " (exported)")?;
                }
                Ok(())
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Get the value of one bound key.
pub fn get_value<R: Record>(
    set: &BindingSet<R>,
    record: &R,
    key: &str,
) -> Result<ConfigResult, BindError> {
    let binding = set
        .get(key)
        .ok_or_else(|| BindError::KeyNotFound(key.into()))?;
    let field = set.field(binding)?;

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: field.get(record).to_string(),
    })
}

/// List every bound key with its value.
pub fn list_values<R: Record>(set: &BindingSet<R>, record: &R) -> Result<ConfigResult, BindError> {
    let entries = set
        .iter()
        .map(|binding| {
            let field = set.field(binding)?;
            Ok((binding.key().to_string(), field.get(record).to_string()))
        })
        .collect::<Result<Vec<_>, BindError>>()?;

    Ok(ConfigResult::Listing { entries })
}

/// Check that `raw` would import cleanly into the binding's field.
///
/// Accepts exactly what the importer accepts, including the integer-or-duration
/// forms for `i64` and `Duration` fields, and rejects values that do not fit
/// the field's width. An empty value is always accepted, since importing it
/// leaves the field alone.
pub fn validate_value(binding: &Binding, raw: &str) -> Result<(), BindError> {
    if raw.is_empty() {
        return Ok(());
    }

    let checked = match binding.kind() {
        Kind::Bool => parse::parse_bool(raw).map(drop).map_err(reason),
        Kind::String => Ok(()),
        Kind::I64 => parse::parse_nanos(raw).map(drop).map_err(reason),
        Kind::Duration => parse::parse_nanos(raw)
            .map_err(reason)
            .and_then(fits::<u64, _>),
        Kind::I8 => parse::parse_int(raw).map_err(reason).and_then(fits::<i8, _>),
        Kind::I16 => parse::parse_int(raw).map_err(reason).and_then(fits::<i16, _>),
        Kind::I32 => parse::parse_int(raw).map_err(reason).and_then(fits::<i32, _>),
        Kind::Isize => parse::parse_int(raw).map_err(reason).and_then(fits::<isize, _>),
        Kind::U8 => parse::parse_uint(raw).map_err(reason).and_then(fits::<u8, _>),
        Kind::U16 => parse::parse_uint(raw).map_err(reason).and_then(fits::<u16, _>),
        Kind::U32 => parse::parse_uint(raw).map_err(reason).and_then(fits::<u32, _>),
        Kind::U64 => parse::parse_uint(raw).map(drop).map_err(reason),
        Kind::Usize => parse::parse_uint(raw).map_err(reason).and_then(fits::<usize, _>),
        Kind::F32 => parse::parse_f32(raw).map(drop).map_err(reason),
        Kind::F64 => parse::parse_float(raw).map(drop).map_err(reason),
        kind @ (Kind::Optional | Kind::Sequence | Kind::Map) => {
            return Err(BindError::UnsupportedKind {
                key: binding.key().to_string(),
                kind,
            });
        }
    };

    checked.map_err(|reason| BindError::InvalidValue {
        key: binding.key().to_string(),
        reason,
    })
}

fn reason(e: impl Display) -> String {
    e.to_string()
}

fn fits<T: TryFrom<W>, W: Display + Copy>(wide: W) -> Result<(), String> {
    T::try_from(wide)
        .map(drop)
        .map_err(|_| format!("{wide} is out of range"))
}
