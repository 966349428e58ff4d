//! Serializing a record into a batch of store entries.

use crate::bind::{Binding, BindingSet};
use crate::error::BindError;
use crate::kind::FieldRef;
use crate::record::Record;
use crate::report::Reporter;
use crate::store::{Batch, Source};
use crate::zero::{is_zero_string, is_zero_typed};

/// Builds a batch of `key -> value` entries from a record.
///
/// Each bound field is formatted the way it is stored: `true`/`false`,
/// base-10 integers, the shortest float that reads back the same, strings
/// verbatim and durations as literals like `2m0s`. A key whose stored value
/// and field value are both zero for the field's kind is left out, so an
/// unset key is not filled with `0` or `false`.
///
/// A `Duration` longer than `i64::MAX` nanoseconds has no literal the
/// importer reads back, so exporting one fails with
/// [`BindError::InvalidValue`].
///
/// The store is only read. Committing the batch is the caller's job; see
/// [`Binder::save`](crate::Binder::save).
#[derive(Debug)]
pub struct Exporter<'s, S: ?Sized> {
    source: &'s S,
    reporter: Reporter,
}

impl<'s, S: Source + ?Sized> Exporter<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self {
            source,
            reporter: Reporter::default(),
        }
    }

    pub fn reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn export<R: Record>(&self, set: &BindingSet<R>, record: &R) -> Result<Batch, BindError> {
        self.reporter.in_scope(|| {
            let mut batch = Batch::new();
            for binding in set {
                if let Some(value) = self.export_binding(set, binding, record)? {
                    batch.insert(binding.key().to_string(), value);
                }
            }
            Ok(batch)
        })
    }

    fn export_binding<R: Record>(
        &self,
        set: &BindingSet<R>,
        binding: &Binding,
        record: &R,
    ) -> Result<Option<String>, BindError> {
        let field = set.field(binding)?;
        let incoming = field.get(record);

        if !incoming.kind().is_bindable() || incoming.kind() != binding.kind() {
            return Err(BindError::UnsupportedKind {
                key: binding.key().to_string(),
                kind: incoming.kind(),
            });
        }

        let current = self.source.get_string(binding.key(), None);
        if is_zero_string(&current, binding.kind()) && is_zero_typed(&incoming) {
            tracing::debug!(key = binding.key(), "stored and field values are both zero");
            return Ok(None);
        }

        if let FieldRef::Duration(d) = incoming
            && i64::try_from(d.as_nanos()).is_err()
        {
            return Err(BindError::InvalidValue {
                key: binding.key().to_string(),
                reason: format!("{incoming} exceeds the longest storable duration"),
            });
        }

        Ok(Some(incoming.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::bind::extract;
    use crate::fixtures::test::{AllKinds, Host, populated_all_kinds, populated_host};
    use crate::kind::{FieldMut, Kind};
    use crate::record::Field;
    use crate::report::capture::CapturingSubscriber;
    use crate::store::MapStore;

    #[test]
    fn export_host() {
        let store = MapStore::new();
        let host = populated_host();
        let set = extract(&host).unwrap();

        let batch = Exporter::new(&store).export(&set, &host).unwrap();

        let expected = Batch::from([
            ("HOST".into(), "test.example.com".into()),
            ("ONLINE".into(), "true".into()),
            ("PORT".into(), "3000".into()),
            ("SCORE".into(), "10000".into()),
            ("SPACE".into(), "9876543210".into()),
            ("PING".into(), "10s".into()),
            ("PING_AVERAGE".into(), "4.5".into()),
        ]);
        assert_eq!(batch, expected);
    }

    #[test]
    fn zero_fields_do_not_fill_empty_keys() {
        let store = MapStore::from_pairs([("ONLINE", "false"), ("PORT", "0"), ("PING", "0s")]);
        let host = Host::default();
        let set = extract(&host).unwrap();

        let batch = Exporter::new(&store).export(&set, &host).unwrap();

        assert!(batch.is_empty(), "{batch:?}");
    }

    #[test]
    fn zero_fields_overwrite_non_zero_keys() {
        let store = MapStore::from_pairs([("ONLINE", "true"), ("SCORE", "12"), ("HOST", "old")]);
        let host = Host::default();
        let set = extract(&host).unwrap();

        let batch = Exporter::new(&store).export(&set, &host).unwrap();

        let expected = Batch::from([
            ("HOST".into(), "".into()),
            ("ONLINE".into(), "false".into()),
            ("SCORE".into(), "0".into()),
        ]);
        assert_eq!(batch, expected);
    }

    #[test]
    fn unparsable_stored_value_counts_as_non_zero() {
        let subscriber = CapturingSubscriber::default();
        let reporter = Reporter::new(tracing::Dispatch::new(subscriber.clone()));
        let store = MapStore::from_pairs([("PORT", "eighty")]);
        let host = Host::default();
        let set = extract(&host).unwrap();

        let batch = Exporter::new(&store)
            .reporter(reporter)
            .export(&set, &host)
            .unwrap();

        assert_eq!(batch.get("PORT").map(String::as_str), Some("0"));
        assert_eq!(subscriber.messages(), ["couldn't convert stored value"]);
    }

    #[test]
    fn formats_every_kind() {
        let store = MapStore::new();
        let all = populated_all_kinds();
        let set = extract(&all).unwrap();

        let batch = Exporter::new(&store).export(&set, &all).unwrap();

        assert_eq!(batch.len(), 15);
        assert_eq!(batch["FLAG"], "true");
        assert_eq!(batch["TINY"], "-8");
        assert_eq!(batch["QWORD"], u64::MAX.to_string());
        assert_eq!(batch["RATIO"], "1.5");
        assert_eq!(batch["PRECISE"], "2.51");
        assert_eq!(batch["LABEL"], "word");
        assert_eq!(batch["TIMEOUT"], "1.5s");
    }

    fn flag_ref(r: &AllKinds) -> crate::FieldRef<'_> {
        crate::Slot::field_ref(&r.flag)
    }

    fn flag_mut(r: &mut AllKinds) -> crate::FieldMut<'_> {
        crate::Slot::field_mut(&mut r.flag)
    }

    fn timeout_ref(r: &AllKinds) -> crate::FieldRef<'_> {
        crate::Slot::field_ref(&r.timeout)
    }

    fn timeout_mut(r: &mut AllKinds) -> crate::FieldMut<'_> {
        crate::Slot::field_mut(&mut r.timeout)
    }

    #[test]
    fn batch_order_ignores_declaration_order() {
        let store = MapStore::new();
        let mut record = AllKinds::default();
        record.flag = true;
        record.timeout = Duration::from_secs(3);
        let set = extract(&record).unwrap();
        let forward = Exporter::new(&store).export(&set, &record).unwrap();

        // Same fields, declared in the opposite order.
        let fields = vec![
            Field::new("timeout", timeout_ref, timeout_mut),
            Field::new("flag", flag_ref, flag_mut),
        ];
        let reversed_set = crate::bind::BindingSet::from_fields(fields, &record).unwrap();
        let reversed = Exporter::new(&store).export(&reversed_set, &record).unwrap();

        assert_eq!(forward, reversed);
        let keys: Vec<&str> = reversed.keys().map(String::as_str).collect();
        assert_eq!(keys, ["FLAG", "TIMEOUT"]);
    }

    #[test]
    fn overlong_duration_is_refused() {
        let store = MapStore::new();
        let mut all = populated_all_kinds();
        all.timeout = Duration::from_secs(400 * 365 * 24 * 3600);
        let set = extract(&all).unwrap();

        let err = Exporter::new(&store).export(&set, &all).unwrap_err();
        assert!(matches!(err, BindError::InvalidValue { ref key, .. } if key == "TIMEOUT"));

        all.timeout = Duration::from_nanos(i64::MAX as u64);
        let batch = Exporter::new(&store).export(&set, &all).unwrap();
        assert_eq!(
            crate::parse::parse_nanos(&batch["TIMEOUT"]),
            Ok(i64::MAX)
        );
    }

    #[test]
    fn out_of_range_position_is_an_error() {
        let store = MapStore::new();
        let host = populated_host();
        let mut set = extract(&host).unwrap();
        set.corrupt_position(3, 42);

        let err = Exporter::new(&store).export(&set, &host).unwrap_err();
        assert!(matches!(
            err,
            BindError::FieldIndexOutOfRange {
                position: 42,
                count: 8,
                ..
            }
        ));
    }

    /// A field whose getter reports a different kind depending on the record.
    #[derive(Default)]
    struct Shifting {
        numeric: bool,
    }

    fn shifting_ref(r: &Shifting) -> FieldRef<'_> {
        if r.numeric {
            FieldRef::U8(1)
        } else {
            FieldRef::Str("one")
        }
    }

    fn shifting_mut(_: &mut Shifting) -> FieldMut<'_> {
        FieldMut::Opaque(Kind::U8)
    }

    impl Record for Shifting {
        fn fields() -> Vec<Field<Self>> {
            vec![Field::new("value", shifting_ref, shifting_mut)]
        }
    }

    #[test]
    fn kind_disagreeing_with_binding_is_unsupported() {
        let store = MapStore::new();
        let set = extract(&Shifting { numeric: true }).unwrap();
        assert_eq!(set.get("VALUE").map(Binding::kind), Some(Kind::U8));

        let err = Exporter::new(&store)
            .export(&set, &Shifting::default())
            .unwrap_err();
        assert!(matches!(
            err,
            BindError::UnsupportedKind {
                ref key,
                kind: Kind::String,
            } if key == "VALUE"
        ));
    }
}
