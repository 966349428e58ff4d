use std::path::PathBuf;

/// Where a settings file lives.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Every bound key with the value the record resolves to.
    List,
    /// One bound key.
    Get { key: String },
    /// Write one bound key to the store.
    Set {
        key: String,
        value: String,
        export: bool,
    },
}
