//! Populating a record from a store.

use std::fmt::Display;
use std::time::Duration;

use crate::bind::{Binding, BindingSet};
use crate::error::BindError;
use crate::kind::{FieldMut, Kind};
use crate::parse;
use crate::record::Record;
use crate::report::Reporter;
use crate::store::Source;

/// Reads store values into record fields.
///
/// Keys that are unset or empty leave their field alone. A value that does
/// not parse as the field's kind, or does not fit its width, is logged as a
/// warning and the field keeps its previous value.
///
/// `i64` fields accept either a base-10 integer or a duration literal, so a
/// nanosecond count can be written as `1500ms`. `Duration` fields accept the
/// same forms but must not be negative.
///
/// Values are read with [`Source::lookup`]; the typed getters are not called.
#[derive(Debug)]
pub struct Importer<'s, S: ?Sized> {
    source: &'s S,
    reporter: Reporter,
}

impl<'s, S: Source + ?Sized> Importer<'s, S> {
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

    pub fn import<R: Record>(&self, set: &BindingSet<R>, record: &mut R) -> Result<(), BindError> {
        self.reporter.in_scope(|| {
            for binding in set {
                self.import_binding(set, binding, record)?;
            }
            Ok(())
        })
    }

    fn import_binding<R: Record>(
        &self,
        set: &BindingSet<R>,
        binding: &Binding,
        record: &mut R,
    ) -> Result<(), BindError> {
        let field = set.field(binding)?;
        let raw = self.source.get_string(binding.key(), None);
        if raw.is_empty() {
            return Ok(());
        }

        match (binding.kind(), field.get_mut(record)) {
            (Kind::Bool, FieldMut::Bool(slot)) => assign(slot, parse::parse_bool(&raw), binding, &raw),
            (Kind::String, FieldMut::Str(slot)) => *slot = raw,
            (Kind::I64, FieldMut::I64(slot)) => assign(slot, parse::parse_nanos(&raw), binding, &raw),
            (Kind::Duration, FieldMut::Duration(slot)) => {
                if let Some(nanos) = convert::<u64, _, _>(parse::parse_nanos(&raw), binding, &raw) {
                    *slot = Duration::from_nanos(nanos);
                }
            }
            (Kind::I8, FieldMut::I8(slot)) => assign(slot, parse::parse_int(&raw), binding, &raw),
            (Kind::I16, FieldMut::I16(slot)) => assign(slot, parse::parse_int(&raw), binding, &raw),
            (Kind::I32, FieldMut::I32(slot)) => assign(slot, parse::parse_int(&raw), binding, &raw),
            (Kind::Isize, FieldMut::Isize(slot)) => assign(slot, parse::parse_int(&raw), binding, &raw),
            (Kind::U8, FieldMut::U8(slot)) => assign(slot, parse::parse_uint(&raw), binding, &raw),
            (Kind::U16, FieldMut::U16(slot)) => assign(slot, parse::parse_uint(&raw), binding, &raw),
            (Kind::U32, FieldMut::U32(slot)) => assign(slot, parse::parse_uint(&raw), binding, &raw),
            (Kind::U64, FieldMut::U64(slot)) => assign(slot, parse::parse_uint(&raw), binding, &raw),
            (Kind::Usize, FieldMut::Usize(slot)) => assign(slot, parse::parse_uint(&raw), binding, &raw),
            (Kind::F32, FieldMut::F32(slot)) => assign(slot, parse::parse_f32(&raw), binding, &raw),
            (Kind::F64, FieldMut::F64(slot)) => assign(slot, parse::parse_float(&raw), binding, &raw),
            (kind, _) => {
                return Err(BindError::UnsupportedKind {
                    key: binding.key().to_string(),
                    kind,
                });
            }
        }

        Ok(())
    }
}

fn assign<T, W, E>(slot: &mut T, parsed: Result<W, E>, binding: &Binding, raw: &str)
where
    T: TryFrom<W>,
    T::Error: Display,
    E: Display,
{
    if let Some(value) = convert(parsed, binding, raw) {
        *slot = value;
    }
}

/// Narrow a parsed value to the slot's width. Failures are reported and
/// yield `None`.
fn convert<T, W, E>(parsed: Result<W, E>, binding: &Binding, raw: &str) -> Option<T>
where
    T: TryFrom<W>,
    T::Error: Display,
    E: Display,
{
    match parsed {
        Ok(wide) => match T::try_from(wide) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    key = binding.key(),
                    kind = %binding.kind(),
                    value = raw,
                    error = %e,
                    "value out of range"
                );
                None
            }
        },
        Err(e) => {
            tracing::warn!(
                key = binding.key(),
                kind = %binding.kind(),
                value = raw,
                error = %e,
                "couldn't convert value"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::extract;
    use crate::fixtures::test::{AllKinds, Host, host_store, populated_all_kinds, populated_host};
    use crate::kind::FieldRef;
    use crate::record::Field;
    use crate::report::capture::CapturingSubscriber;
    use crate::store::MapStore;

    fn capture() -> (CapturingSubscriber, Reporter) {
        let subscriber = CapturingSubscriber::default();
        let reporter = Reporter::new(tracing::Dispatch::new(subscriber.clone()));
        (subscriber, reporter)
    }

    #[test]
    fn import_host_from_store() {
        let store = host_store();
        let mut host = Host::default();
        let set = extract(&host).unwrap();

        Importer::new(&store).import(&set, &mut host).unwrap();

        let expected = Host {
            id: String::new(),
            ..populated_host()
        };
        assert_eq!(host, expected);
    }

    #[test]
    fn empty_values_leave_fields_untouched() {
        let store = MapStore::from_pairs([("HOST", ""), ("PORT", "")]);
        let mut host = populated_host();
        let set = extract(&host).unwrap();

        Importer::new(&store).import(&set, &mut host).unwrap();

        assert_eq!(host, populated_host());
    }

    #[test]
    fn i64_reads_integers_and_durations() {
        let mut host = Host::default();
        let set = extract(&host).unwrap();

        let store = MapStore::from_pairs([("SPACE", "1500ms")]);
        Importer::new(&store).import(&set, &mut host).unwrap();
        assert_eq!(host.free_space, 1_500_000_000);

        let store = MapStore::from_pairs([("SPACE", "42")]);
        Importer::new(&store).import(&set, &mut host).unwrap();
        assert_eq!(host.free_space, 42);

        let store = MapStore::from_pairs([("SPACE", "-2h")]);
        Importer::new(&store).import(&set, &mut host).unwrap();
        assert_eq!(host.free_space, -7_200_000_000_000);
    }

    #[test]
    fn duration_reads_nanos_and_literals() {
        let mut host = Host::default();
        let set = extract(&host).unwrap();

        let store = MapStore::from_pairs([("PING", "1h30m")]);
        Importer::new(&store).import(&set, &mut host).unwrap();
        assert_eq!(host.ping_interval, Duration::from_secs(5400));

        let store = MapStore::from_pairs([("PING", "250")]);
        Importer::new(&store).import(&set, &mut host).unwrap();
        assert_eq!(host.ping_interval, Duration::from_nanos(250));

        let store = MapStore::from_pairs([("PING", "0")]);
        Importer::new(&store).import(&set, &mut host).unwrap();
        assert_eq!(host.ping_interval, Duration::ZERO);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let (subscriber, reporter) = capture();
        let mut host = populated_host();
        let set = extract(&host).unwrap();
        let store = MapStore::from_pairs([("PING", "-5s")]);

        Importer::new(&store)
            .reporter(reporter)
            .import(&set, &mut host)
            .unwrap();

        assert_eq!(host.ping_interval, Duration::from_secs(10));
        assert_eq!(subscriber.messages(), ["value out of range"]);
    }

    #[test]
    fn unparsable_values_keep_previous_value() {
        let (subscriber, reporter) = capture();
        let mut host = populated_host();
        let set = extract(&host).unwrap();
        let store = MapStore::from_pairs([
            ("ONLINE", "yes"),
            ("PORT", "eighty"),
            ("SPACE", "lots"),
            ("PING_AVERAGE", "fast"),
        ]);

        Importer::new(&store)
            .reporter(reporter)
            .import(&set, &mut host)
            .unwrap();

        assert_eq!(host, populated_host());
        assert_eq!(subscriber.messages().len(), 4);
        assert!(
            subscriber
                .messages()
                .iter()
                .all(|m| m == "couldn't convert value")
        );
    }

    #[test]
    fn narrowing_overflow_keeps_previous_value() {
        let (subscriber, reporter) = capture();
        let mut all = populated_all_kinds();
        let set = extract(&all).unwrap();
        let store = MapStore::from_pairs([("TINY", "300"), ("BYTE", "256"), ("WORD", "65535")]);

        Importer::new(&store)
            .reporter(reporter)
            .import(&set, &mut all)
            .unwrap();

        assert_eq!(all.tiny, -8);
        assert_eq!(all.byte, 8);
        assert_eq!(all.word, u16::MAX);
        assert_eq!(subscriber.messages(), ["value out of range", "value out of range"]);
    }

    #[test]
    fn ints_truncate_floats_and_unsigned_rejects_negatives() {
        let mut all = AllKinds::default();
        let set = extract(&all).unwrap();
        let store = MapStore::from_pairs([
            ("MEDIUM", "-4.7"),
            ("QWORD", "-1"),
            ("RATIO", "0.25"),
            ("FLAG", "T"),
        ]);

        Importer::new(&store).import(&set, &mut all).unwrap();

        assert_eq!(all.medium, -4);
        assert_eq!(all.qword, 0);
        assert_eq!(all.ratio, 0.25);
        assert!(all.flag);
    }

    #[test]
    fn out_of_range_position_is_an_error() {
        let store = host_store();
        let mut host = Host::default();
        let mut set = extract(&host).unwrap();
        set.corrupt_position(0, 1001);

        let err = Importer::new(&store).import(&set, &mut host).unwrap_err();
        assert!(matches!(
            err,
            BindError::FieldIndexOutOfRange { position: 1001, .. }
        ));
    }

    #[test]
    fn huge_floats_keep_previous_value() {
        let (subscriber, reporter) = capture();
        let mut all = populated_all_kinds();
        let set = extract(&all).unwrap();
        let store = MapStore::from_pairs([("QWORD", "1e30"), ("NATIVE", "1e30"), ("RATIO", "1e300")]);

        Importer::new(&store)
            .reporter(reporter)
            .import(&set, &mut all)
            .unwrap();

        assert_eq!(all, populated_all_kinds());
        assert_eq!(subscriber.messages().len(), 3);
    }

    /// A setter that hands back the wrong view for its getter's kind.
    #[derive(Default)]
    struct Mismatched {
        flag: bool,
    }

    fn mismatched_ref(r: &Mismatched) -> FieldRef<'_> {
        FieldRef::Bool(r.flag)
    }

    fn mismatched_mut(_: &mut Mismatched) -> FieldMut<'_> {
        FieldMut::Opaque(Kind::Bool)
    }

    impl Record for Mismatched {
        fn fields() -> Vec<Field<Self>> {
            vec![Field::new("flag", mismatched_ref, mismatched_mut)]
        }
    }

    #[test]
    fn slot_disagreeing_with_binding_is_unsupported() {
        let mut record = Mismatched::default();
        let set = extract(&record).unwrap();
        let store = MapStore::from_pairs([("FLAG", "true")]);

        let err = Importer::new(&store).import(&set, &mut record).unwrap_err();
        assert!(matches!(
            err,
            BindError::UnsupportedKind {
                ref key,
                kind: Kind::Bool,
            } if key == "FLAG"
        ));
        assert!(!record.flag);
    }

    /// Only `lookup` feeds the importer; typed getters are not consulted.
    struct FixedInts(MapStore);

    impl Source for FixedInts {
        fn lookup(&self, key: &str) -> Option<String> {
            self.0.lookup(key)
        }

        fn get_int(&self, _key: &str, _fallback: Option<i64>) -> i64 {
            99
        }
    }

    #[test]
    fn import_reads_through_lookup() {
        let store = FixedInts(MapStore::from_pairs([("SCORE", "12")]));
        assert_eq!(store.get_int("SCORE", None), 99);

        let mut host = Host::default();
        let set = extract(&host).unwrap();
        Importer::new(&store).import(&set, &mut host).unwrap();

        assert_eq!(host.score, 12);
    }
}
