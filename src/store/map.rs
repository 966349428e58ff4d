use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Batch, Sink, Source};
use crate::error::BindError;

/// An in-memory store. Useful for tests and for staging values.
///
/// Deserializes from a plain table of strings, so fixtures can be written
/// inline:
///
/// ```
/// use varbind::store::{MapStore, Source};
///
/// let store: MapStore = toml::from_str(r#"
///     [vars]
///     HOST = "example.com"
///     PORT = "8080"
/// "#).unwrap();
/// assert_eq!(store.get_int("PORT", None), 8080);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStore {
    #[serde(default)]
    vars: BTreeMap<String, String>,
    #[serde(default)]
    exported: BTreeSet<String>,
    #[serde(skip)]
    commits: usize,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Keys committed with the export flag, in sorted order.
    pub fn exported(&self) -> impl Iterator<Item = &str> {
        self.exported.iter().map(String::as_str)
    }

    /// Number of batch commits received.
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Source for MapStore {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl Sink for MapStore {
    fn commit(&mut self, batch: &Batch, export: bool) -> Result<(), BindError> {
        for (key, value) in batch {
            self.vars.insert(key.clone(), value.clone());
            if export {
                self.exported.insert(key.clone());
            }
        }
        self.commits += 1;
        Ok(())
    }
}
