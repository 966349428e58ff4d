//! Field discovery: turning a record's field table into store bindings.

use std::collections::HashSet;
use std::fmt;

use crate::error::BindError;
use crate::kind::Kind;
use crate::naming::derive_key;
use crate::record::{Field, Record};

/// Links one field of a record type to one store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    position: usize,
    key: String,
    kind: Kind,
    ident: &'static str,
}

impl Binding {
    /// Index of the field in the record's field table.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.ident, self.key, self.kind)
    }
}

/// The bindings of one record type, in declaration order, together with the
/// field table they index.
pub struct BindingSet<R> {
    fields: Vec<Field<R>>,
    bindings: Vec<Binding>,
}

impl<R: Record> BindingSet<R> {
    /// Bind an explicit field table instead of `R::fields()`.
    ///
    /// `record` is only read to learn each field's kind.
    pub fn from_fields(fields: Vec<Field<R>>, record: &R) -> Result<Self, BindError> {
        validate_fields(&fields)?;

        let mut bindings = Vec::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if field.is_ignored() {
                continue;
            }

            let kind = field.get(record).kind();
            if !kind.is_bindable() {
                tracing::debug!(field = field.ident(), %kind, "skipping unbindable field");
                continue;
            }

            let key = match field.name() {
                Some(name) => name.to_string(),
                None => derive_key(field.ident()),
            };

            bindings.push(Binding {
                position,
                key,
                kind,
                ident: field.ident(),
            });
        }

        Ok(Self { fields, bindings })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The binding for a store key.
    pub fn get(&self, key: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.key == key)
    }

    /// The field a binding points at.
    pub fn field(&self, binding: &Binding) -> Result<&Field<R>, BindError> {
        self.fields
            .get(binding.position)
            .ok_or_else(|| BindError::FieldIndexOutOfRange {
                record: R::record_name(),
                position: binding.position,
                count: self.fields.len(),
            })
    }

    #[cfg(test)]
    pub(crate) fn corrupt_position(&mut self, index: usize, position: usize) {
        self.bindings[index].position = position;
    }
}

impl<'a, R: Record> IntoIterator for &'a BindingSet<R> {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R> fmt::Debug for BindingSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.bindings).finish()
    }
}

/// Extract the bindings of `record`.
///
/// Ignored fields are dropped. A field with a name override binds to that
/// name verbatim; any other field binds to [`derive_key`] of its identifier.
/// Fields of a kind that cannot be bound (options, sequences, maps) are
/// skipped.
///
/// Fails with [`BindError::InvalidTarget`] if the field table is malformed: an
/// empty identifier or the same identifier declared twice.
pub fn extract<R: Record>(record: &R) -> Result<BindingSet<R>, BindError> {
    BindingSet::from_fields(R::fields(), record)
}

fn validate_fields<R: Record>(fields: &[Field<R>]) -> Result<(), BindError> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.ident().is_empty() {
            return Err(BindError::InvalidTarget {
                record: R::record_name(),
                reason: "field with an empty identifier".into(),
            });
        }
        if !seen.insert(field.ident()) {
            return Err(BindError::InvalidTarget {
                record: R::record_name(),
                reason: format!("field '{}' is declared twice", field.ident()),
            });
        }
    }
    Ok(())
}
