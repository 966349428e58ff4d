//! Settings file store: a flat TOML table of keys.
//!
//! Reads accept any scalar TOML value (`port = 8080` reads as `"8080"`).
//! Commits write every value as a TOML string through `toml_edit`, so
//! existing comments and formatting survive. Parent directories are created
//! as needed, and a missing file is treated as empty.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use toml_edit::{DocumentMut, Value};

use super::{Batch, Sink, Source};
use crate::error::BindError;
use crate::types::SettingsPath;

#[derive(Debug, Clone)]
pub struct TomlStore {
    path: PathBuf,
    doc: DocumentMut,
    exported: BTreeSet<String>,
}

impl TomlStore {
    /// Open the settings file at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BindError> {
        let path = path.into();
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(BindError::IoError { path, source: e });
            }
        };

        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| BindError::ParseError {
                path: path.clone(),
                source: e,
            })?;

        Ok(Self {
            path,
            doc,
            exported: BTreeSet::new(),
        })
    }

    /// Open `{dir}/{file_name}`, where `dir` is resolved from `location`.
    ///
    /// `app_name` is used by [`SettingsPath::Platform`] to build the
    /// platform-specific config directory (e.g. `~/.config/{app_name}/`).
    pub fn locate(
        location: &SettingsPath,
        file_name: &str,
        app_name: &str,
    ) -> Result<Self, BindError> {
        let dir = resolve_settings_dir(location, app_name)
            .ok_or_else(|| BindError::UnresolvedPath(location.clone()))?;
        Self::open(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keys committed with the export flag during this session. The flag is
    /// not written to the file.
    pub fn exported(&self) -> impl Iterator<Item = &str> {
        self.exported.iter().map(String::as_str)
    }
}

/// Resolve a [`SettingsPath`] to a concrete directory.
///
/// Returns `None` if the path cannot be resolved (e.g. no home directory found).
pub fn resolve_settings_dir(location: &SettingsPath, app_name: &str) -> Option<PathBuf> {
    match location {
        SettingsPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SettingsPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SettingsPath::Cwd => std::env::current_dir().ok(),
        SettingsPath::Path(p) => Some(p.clone()),
    }
}

/// Render a scalar TOML value the way a flat store reports it.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.value().clone()),
        Value::Integer(i) => Some(i.value().to_string()),
        Value::Float(f) => Some(f.value().to_string()),
        Value::Boolean(b) => Some(b.value().to_string()),
        Value::Datetime(d) => Some(d.value().to_string()),
        Value::Array(_) | Value::InlineTable(_) => None,
    }
}

impl Source for TomlStore {
    fn lookup(&self, key: &str) -> Option<String> {
        self.doc.get(key)?.as_value().and_then(scalar_to_string)
    }
}

impl Sink for TomlStore {
    fn commit(&mut self, batch: &Batch, export: bool) -> Result<(), BindError> {
        for (key, value) in batch {
            self.doc[key.as_str()] = toml_edit::value(value.as_str());
            if export {
                self.exported.insert(key.clone());
            }
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| BindError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(&self.path, self.doc.to_string()).map_err(|e| BindError::IoError {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), keys = batch.len(), "committed settings");
        Ok(())
    }
}
