//! The external key/value medium a binder reads from and writes to.
//!
//! A store is addressed through two capabilities:
//!
//! - [`Source`]: typed reads. Only [`lookup`](Source::lookup) is required;
//!   the typed getters parse its result and fall back to a caller-supplied
//!   value (or the type's zero) when the key is absent or unparsable.
//! - [`Sink`]: a single batch commit with an export flag.
//!
//! Three stores ship with the crate: [`MapStore`] (in memory), [`EnvStore`]
//! (a snapshot of the process environment) and [`TomlStore`] (a settings
//! file).

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::BindError;
use crate::parse;

mod env;
mod file;
mod map;

pub use env::EnvStore;
pub use file::TomlStore;
pub use map::MapStore;

/// Key/value pairs ready to commit, ordered by key.
pub type Batch = BTreeMap<String, String>;

/// Read capability of a store.
///
/// [`Importer`](crate::Importer) reads every key through
/// [`lookup`](Source::lookup) and parses the raw string itself, so it can
/// report values that fail to parse. Overriding a typed getter changes what
/// direct callers see, not what import assigns.
pub trait Source {
    /// Raw value of `key`. A key that is set but empty yields `Some("")`.
    fn lookup(&self, key: &str) -> Option<String>;

    fn get_string(&self, key: &str, fallback: Option<&str>) -> String {
        self.lookup(key)
            .unwrap_or_else(|| fallback.unwrap_or_default().to_string())
    }

    fn get_bool(&self, key: &str, fallback: Option<bool>) -> bool {
        let fb = fallback.unwrap_or_default();
        self.lookup(key)
            .map_or(fb, |s| parse::parse_bool(&s).unwrap_or(fb))
    }

    fn get_int(&self, key: &str, fallback: Option<i64>) -> i64 {
        let fb = fallback.unwrap_or_default();
        self.lookup(key)
            .map_or(fb, |s| parse::parse_int(&s).unwrap_or(fb))
    }

    fn get_uint(&self, key: &str, fallback: Option<u64>) -> u64 {
        let fb = fallback.unwrap_or_default();
        self.lookup(key)
            .map_or(fb, |s| parse::parse_uint(&s).unwrap_or(fb))
    }

    fn get_float(&self, key: &str, fallback: Option<f64>) -> f64 {
        let fb = fallback.unwrap_or_default();
        self.lookup(key)
            .map_or(fb, |s| parse::parse_float(&s).unwrap_or(fb))
    }

    /// Reads a duration literal such as `5m` or `1500ms`. Negative values fall back.
    fn get_duration(&self, key: &str, fallback: Option<Duration>) -> Duration {
        let fb = fallback.unwrap_or_default();
        self.lookup(key).map_or(fb, |s| {
            crate::duration::parse_duration(&s)
                .ok()
                .and_then(|n| u64::try_from(n).ok())
                .map_or(fb, Duration::from_nanos)
        })
    }
}

/// Write capability of a store.
pub trait Sink {
    /// Write every entry of `batch`. `export` asks the store to also make the
    /// values visible to child processes; stores without that notion ignore it.
    fn commit(&mut self, batch: &Batch, export: bool) -> Result<(), BindError>;
}

impl<S: Source + ?Sized> Source for &S {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn commit(&mut self, batch: &Batch, export: bool) -> Result<(), BindError> {
        (**self).commit(batch, export)
    }
}
