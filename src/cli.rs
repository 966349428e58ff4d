//! Clap adapter for varbind.
//!
//! This module is the optional integration layer between the binder and the
//! [clap](https://docs.rs/clap) CLI parser. It is compiled only when the `clap`
//! Cargo feature is enabled (on by default).
//!
//! [`ConfigArgs`] and [`ConfigSubcommand`] can be embedded in an application's
//! own clap derive to get `config list|get|set` subcommands. The only bridge
//! to the core is [`ConfigArgs::into_action()`]; from there everything goes
//! through [`Binder::handle()`](crate::Binder::handle).

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show every bound key with its current value.
    List,
    /// Show the value of one key.
    Get {
        /// Store key (e.g. "PING_INTERVAL").
        key: String,
    },
    /// Write one value to the store.
    Set {
        /// Store key (e.g. "PING_INTERVAL").
        key: String,
        /// Value to set.
        value: String,
        /// Also make the value visible to child processes.
        #[arg(long)]
        export: bool,
    },
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Set { key, value, export }) => {
                ConfigAction::Set { key, value, export }
            }
        }
    }
}
