use crate::bind::extract;
use crate::error::BindError;
use crate::export::Exporter;
use crate::import::Importer;
use crate::ops::{self, ConfigResult};
use crate::record::Record;
use crate::report::Reporter;
use crate::store::{Batch, Sink, Source};
use crate::types::ConfigAction;

/// Binds records to one store.
///
/// Owns the store, the [`Reporter`] that import and export log through, and
/// the export flag used when committing.
///
/// ```
/// use varbind::Binder;
/// use varbind::store::{MapStore, Source};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// varbind::record!(Server { host, port });
///
/// let mut binder = Binder::new(MapStore::from_pairs([("PORT", "8080")]));
///
/// let mut server = Server::default();
/// binder.import_into(&mut server).unwrap();
/// assert_eq!(server.port, 8080);
///
/// server.host = "example.com".into();
/// binder.save(&server).unwrap();
/// assert_eq!(binder.store().get_string("HOST", None), "example.com");
/// ```
#[derive(Debug)]
pub struct Binder<S> {
    store: S,
    reporter: Reporter,
    export: bool,
}

impl<S> Binder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            reporter: Reporter::default(),
            export: false,
        }
    }

    /// Set the reporter used for import and export warnings.
    pub fn reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Route import and export events to `dispatch` instead of the ambient
    /// subscriber.
    pub fn dispatch(self, dispatch: tracing::Dispatch) -> Self {
        self.reporter(Reporter::new(dispatch))
    }

    /// Set the export flag passed to the store by [`save`](Self::save)
    /// (default: `false`).
    pub fn export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: Source> Binder<S> {
    /// Populate `record` from the store.
    pub fn import_into<R: Record>(&self, record: &mut R) -> Result<(), BindError> {
        let set = extract(record)?;
        Importer::new(&self.store)
            .reporter(self.reporter.clone())
            .import(&set, record)
    }

    /// The batch [`save`](Self::save) would commit, without committing it.
    pub fn export_from<R: Record>(&self, record: &R) -> Result<Batch, BindError> {
        let set = extract(record)?;
        Exporter::new(&self.store)
            .reporter(self.reporter.clone())
            .export(&set, record)
    }

    /// Load a fresh record from the store.
    pub fn load<R: Record + Default>(&self) -> Result<R, BindError> {
        let mut record = R::default();
        self.import_into(&mut record)?;
        Ok(record)
    }
}

impl<S: Source + Sink> Binder<S> {
    /// Export `record` and commit the batch to the store in one call.
    ///
    /// Returns the committed batch. An empty batch is still committed.
    pub fn save<R: Record>(&mut self, record: &R) -> Result<Batch, BindError> {
        let batch = self.export_from(record)?;
        self.store.commit(&batch, self.export)?;
        tracing::debug!(keys = batch.len(), export = self.export, "saved record");
        Ok(batch)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print<R: Record + Default>(
        &mut self,
        action: &ConfigAction,
    ) -> Result<(), BindError> {
        let result = self.handle::<R>(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (list / get / set) against records of type `R`.
    pub fn handle<R: Record + Default>(
        &mut self,
        action: &ConfigAction,
    ) -> Result<ConfigResult, BindError> {
        match action {
            ConfigAction::List => {
                let record: R = self.load()?;
                let set = extract(&record)?;
                ops::list_values(&set, &record)
            }
            ConfigAction::Get { key } => {
                let record: R = self.load()?;
                let set = extract(&record)?;
                ops::get_value(&set, &record, key)
            }
            ConfigAction::Set { key, value, export } => {
                let set = extract(&R::default())?;
                let binding = set
                    .get(key)
                    .ok_or_else(|| BindError::KeyNotFound(key.clone()))?;
                ops::validate_value(binding, value)?;

                let batch = Batch::from([(key.clone(), value.clone())]);
                self.store.commit(&batch, *export)?;

                Ok(ConfigResult::ValueSet {
                    key: key.clone(),
                    value: value.clone(),
                    exported: *export,
                })
            }
        }
    }
}
