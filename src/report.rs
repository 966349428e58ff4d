//! Injectable logging for import and export.
//!
//! Values read from a store are not trusted: a malformed number or duration is
//! reported as a `tracing` warning and the affected field is left alone. A
//! [`Reporter`] decides where those events go. The default sends them to
//! whatever subscriber is current; [`Reporter::new`] routes them to a specific
//! [`Dispatch`] for the duration of each import or export call.

use tracing::Dispatch;

#[derive(Clone, Default)]
pub struct Reporter {
    dispatch: Option<Dispatch>,
}

impl Reporter {
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Report to the ambient subscriber.
    pub fn ambient() -> Self {
        Self::default()
    }

    /// Run `f` with this reporter's dispatcher installed.
    pub(crate) fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("injected", &self.dispatch.is_some())
            .finish()
    }
}

impl From<Dispatch> for Reporter {
    fn from(dispatch: Dispatch) -> Self {
        Self::new(dispatch)
    }
}
