//! Record declarations: the field table a binder works from.
//!
//! A [`Record`] lists its fields once, in declaration order, as [`Field`]
//! entries. Each entry holds the field's identifier, an optional key override,
//! an optional ignore marker and a pair of accessor functions. The binder never
//! inspects the struct any other way.
//!
//! Most records use the [`record!`](crate::record!) macro:
//!
//! ```
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Host {
//!     id: String,
//!     hostname: String,
//!     port: u16,
//!     ping_interval: Duration,
//! }
//!
//! varbind::record!(Host {
//!     #[bind(skip)]
//!     id,
//!     #[bind(name = "HOST")]
//!     hostname,
//!     port,
//!     ping_interval,
//! });
//! ```

use crate::kind::{FieldMut, FieldRef};

/// Shared-reference accessor for one field.
pub type Getter<R> = for<'a> fn(&'a R) -> FieldRef<'a>;

/// Mutable accessor for one field.
pub type Setter<R> = for<'a> fn(&'a mut R) -> FieldMut<'a>;

/// A typed configuration struct with a declared field table.
pub trait Record: Sized {
    /// All fields, in declaration order.
    fn fields() -> Vec<Field<Self>>;

    /// Name used in error messages.
    fn record_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// One entry of a record's field table.
pub struct Field<R> {
    ident: &'static str,
    name: Option<&'static str>,
    ignored: bool,
    get: Getter<R>,
    set: Setter<R>,
}

impl<R> Field<R> {
    pub fn new(ident: &'static str, get: Getter<R>, set: Setter<R>) -> Self {
        Self {
            ident,
            name: None,
            ignored: false,
            get,
            set,
        }
    }

    /// Bind this field to `name` instead of the derived key.
    pub fn rename(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Leave this field out of every binding.
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn get<'a>(&self, record: &'a R) -> FieldRef<'a> {
        (self.get)(record)
    }

    pub fn get_mut<'a>(&self, record: &'a mut R) -> FieldMut<'a> {
        (self.set)(record)
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<R> {}

impl<R> std::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("ident", &self.ident)
            .field("name", &self.name)
            .field("ignored", &self.ignored)
            .finish()
    }
}

/// Implement [`Record`] for a struct by listing its fields.
///
/// Each field may carry `#[bind(name = "KEY")]` to set its key verbatim, or
/// `#[bind(skip)]` to leave it out. Field types must implement
/// [`Slot`](crate::Slot); `Option`, `Vec` and map fields are accepted and
/// skipped when bindings are extracted.
///
/// The macro must be invoked where the listed fields are visible.
#[macro_export]
macro_rules! record {
    (@options $field:expr) => {
        $field
    };
    (@options $field:expr; skip $($rest:tt)*) => {
        $crate::record!(@options $field.ignore() $($rest)*)
    };
    (@options $field:expr; name = $name:literal $($rest:tt)*) => {
        $crate::record!(@options $field.rename($name) $($rest)*)
    };
    ($ty:ty { $( $(#[bind($($opt:tt)*)])* $field:ident ),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> ::std::vec::Vec<$crate::Field<Self>> {
                ::std::vec![$(
                    $crate::record!(@options
                        $crate::Field::new(
                            ::core::stringify!($field),
                            {
                                fn get(r: &$ty) -> $crate::FieldRef<'_> {
                                    $crate::Slot::field_ref(&r.$field)
                                }
                                get
                            },
                            {
                                fn set(r: &mut $ty) -> $crate::FieldMut<'_> {
                                    $crate::Slot::field_mut(&mut r.$field)
                                }
                                set
                            },
                        )
                        $(; $($opt)*)*
                    )
                ),*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::fixtures::test::{Host, Mixed};
    use crate::kind::{FieldRef, Kind};
    use crate::record::Record;

    #[test]
    fn macro_lists_fields_in_declaration_order() {
        let idents: Vec<_> = Host::fields().iter().map(|f| f.ident()).collect();
        assert_eq!(
            idents,
            [
                "id",
                "hostname",
                "online",
                "port",
                "score",
                "free_space",
                "ping_interval",
                "ping_average",
            ]
        );
    }

    #[test]
    fn macro_applies_options() {
        let fields = Host::fields();
        assert!(fields[0].is_ignored());
        assert_eq!(fields[1].name(), Some("HOST"));
        assert_eq!(fields[2].name(), None);
        assert!(!fields[2].is_ignored());
    }

    #[test]
    fn accessors_read_and_write() {
        let mut host = Host::default();
        let port = Host::fields()[3];

        if let crate::FieldMut::U32(slot) = port.get_mut(&mut host) {
            *slot = 3000;
        }
        assert_eq!(host.port, 3000);
        assert_eq!(port.get(&host), FieldRef::U32(3000));
    }

    #[test]
    fn composite_fields_report_their_kind() {
        let mixed = Mixed::default();
        let kinds: Vec<Kind> = Mixed::fields()
            .iter()
            .map(|f| f.get(&mixed).kind())
            .collect();
        assert_eq!(
            kinds,
            [Kind::String, Kind::Sequence, Kind::Optional, Kind::Map, Kind::U8]
        );
    }

    #[test]
    fn record_name_defaults_to_type_name() {
        assert!(Host::record_name().ends_with("Host"));
    }
}
