use std::collections::BTreeMap;
use std::process::Command;

use super::{Batch, Sink, Source};
use crate::error::BindError;

/// A store over environment variables.
///
/// Values are read from a snapshot taken at construction. With a prefix, key
/// `HOST` maps to variable `{PREFIX}__HOST`. Double underscore separates the
/// prefix; single `_` inside the key is literal.
///
/// Commits update the snapshot; the live process environment is never
/// modified. Values committed with the export flag are collected and can be
/// handed to child processes with [`apply_to`](Self::apply_to).
#[derive(Debug, Clone, Default)]
pub struct EnvStore {
    prefix: Option<String>,
    vars: BTreeMap<String, String>,
    exported: BTreeMap<String, String>,
}

impl EnvStore {
    /// Snapshot the current process environment. Variables whose name or
    /// value is not valid Unicode are skipped.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build from any set of variables. Tests pass synthetic data here instead
    /// of `std::env::vars()`.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            prefix: None,
            vars: vars.into_iter().collect(),
            exported: BTreeMap::new(),
        }
    }

    /// Namespace every key under `{prefix}__`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// The variable name a key maps to.
    pub fn var_name(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}__{key}"),
            None => key.to_string(),
        }
    }

    /// Exported variables, by full variable name.
    pub fn exported(&self) -> &BTreeMap<String, String> {
        &self.exported
    }

    /// Set exported variables on a child process command.
    pub fn apply_to<'c>(&self, cmd: &'c mut Command) -> &'c mut Command {
        cmd.envs(&self.exported)
    }
}

impl Source for EnvStore {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(&self.var_name(key)).cloned()
    }
}

impl Sink for EnvStore {
    fn commit(&mut self, batch: &Batch, export: bool) -> Result<(), BindError> {
        for (key, value) in batch {
            let name = self.var_name(key);
            if export {
                self.exported.insert(name.clone(), value.clone());
            }
            self.vars.insert(name, value.clone());
        }
        Ok(())
    }
}
