//! Bind typed configuration records to flat string key/value stores.
//!
//! Environment variables, settings files and similar stores hold nothing but
//! strings under flat keys. Varbind maps those keys onto the fields of a
//! plain Rust struct and back, without per-field conversion code:
//!
//! ```
//! use std::time::Duration;
//! use varbind::Binder;
//! use varbind::store::MapStore;
//!
//! #[derive(Debug, Default)]
//! struct Host {
//!     hostname: String,
//!     port: u16,
//!     ping_interval: Duration,
//! }
//!
//! varbind::record!(Host {
//!     #[bind(name = "HOST")]
//!     hostname,
//!     port,
//!     ping_interval,
//! });
//!
//! let store = MapStore::from_pairs([
//!     ("HOST", "db.local"),
//!     ("PORT", "5432"),
//!     ("PING_INTERVAL", "1m30s"),
//! ]);
//!
//! let host: Host = Binder::new(store).load()?;
//! assert_eq!(host.hostname, "db.local");
//! assert_eq!(host.ping_interval, Duration::from_secs(90));
//! # Ok::<(), varbind::BindError>(())
//! ```
//!
//! # Declaring a record
//!
//! A record lists its fields once through [`record!`], which implements
//! [`Record`]. Each field becomes a [`Field`] entry holding the identifier,
//! two accessor functions and the per-field options:
//!
//! - **`#[bind(name = "KEY")]`** binds the field to `KEY` exactly as written.
//! - **`#[bind(skip)]`** leaves the field out entirely.
//! - Anything else binds to a key derived from the identifier.
//!
//! `Option`, `Vec`, set and map fields may be listed; they are skipped when
//! bindings are extracted. Records can also implement [`Record`] by hand with
//! [`Field::new`].
//!
//! # Key names
//!
//! [`derive_key`] turns an identifier into an upper-snake key. Snake-case
//! identifiers are uppercased; camel-case ones are split at case changes,
//! keeping acronyms together:
//!
//! | Identifier | Key |
//! |------------|-----|
//! | `ping_average` | `PING_AVERAGE` |
//! | `maxRetries` | `MAX_RETRIES` |
//! | `UserID` | `USER_ID` |
//! | `HTTPServer` | `HTTP_SERVER` |
//! | `URL` | `URL` |
//!
//! # Import
//!
//! [`Importer`] (or [`Binder::import_into`]) reads each bound key and parses
//! it as the field's kind. Unset and empty keys leave their field alone, so a
//! record can be pre-filled with defaults. Values that do not parse, or do not
//! fit a narrower integer, are reported as `tracing` warnings and also leave
//! the field alone.
//!
//! `i64` fields read either a base-10 integer or a duration literal (`90s`,
//! `1h30m`, `1500ms`), the latter as nanoseconds. `std::time::Duration` fields
//! read the same forms.
//!
//! # Export
//!
//! [`Exporter`] (or [`Binder::save`]) formats every bound field into a
//! [`Batch`], sorted by key. A key is left out when the stored value and the
//! field value are both zero for the field's kind, so saving a mostly-empty
//! record does not fill the store with `0` and `false`. [`Binder::save`]
//! commits the batch to the store in a single call.
//!
//! # Stores
//!
//! A store is anything implementing [`Source`] (reads) and, to be written,
//! [`Sink`] (batch commits). Three are included:
//!
//! - [`MapStore`](store::MapStore): in memory.
//! - [`EnvStore`](store::EnvStore): a snapshot of the process environment,
//!   optionally namespaced as `PREFIX__KEY`. Exported values can be passed
//!   to child processes.
//! - [`TomlStore`](store::TomlStore): a flat TOML settings file, edited in
//!   place with comments preserved.
//!
//! # Logging
//!
//! Warnings and debug events go through `tracing`. By default they reach the
//! current subscriber; pass a [`Reporter`] or a `tracing::Dispatch` to
//! [`Binder::dispatch`] to route them elsewhere. The crate never installs a
//! global subscriber.
//!
//! # Config subcommands
//!
//! [`Binder::handle`] runs a [`ConfigAction`] (`list`, `get`, `set`) against
//! a record type. With the `clap` feature (on by default), [`ConfigArgs`]
//! provides ready-made subcommands that convert into a `ConfigAction`.
//!
//! # Error handling
//!
//! Fallible operations return [`BindError`]. Malformed values in a store are
//! not errors; see [Import](#import).

pub mod duration;
pub mod error;
pub mod store;
pub mod types;

mod bind;
mod binder;
#[cfg(feature = "clap")]
mod cli;
mod export;
mod import;
mod kind;
mod naming;
mod ops;
mod parse;
mod record;
mod report;
mod zero;

#[cfg(test)]
mod fixtures;

pub use bind::{Binding, BindingSet, extract};
pub use binder::Binder;
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use error::BindError;
pub use export::Exporter;
pub use import::Importer;
pub use kind::{FieldMut, FieldRef, Kind, Slot};
pub use naming::derive_key;
pub use ops::{ConfigResult, validate_value};
pub use parse::ValueError;
pub use record::{Field, Getter, Record, Setter};
pub use report::Reporter;
pub use store::{Batch, Sink, Source};
pub use types::{ConfigAction, SettingsPath};
pub use zero::{is_zero_string, is_zero_typed};
