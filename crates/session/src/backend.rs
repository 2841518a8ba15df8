//! Backend selection.
//!
//! The direct-buffer strategy writes persisted storage behind the host's
//! back. That is only safe while persisted storage is authoritative, i.e.
//! outside edit mode. The decision is made fresh on every call.

use meshedit_ipc::{Backend, Mode, Strategy};

use crate::error::EditError;

/// Pick the strategy for `backend` given the host's current mode.
pub fn select_strategy(backend: Backend, mode: Mode, object: &str) -> Result<Strategy, EditError> {
    match (backend, mode) {
        (Backend::Auto, Mode::Object) | (Backend::DirectBuffer, Mode::Object) => {
            Ok(Strategy::DirectBuffer)
        }
        (Backend::Auto, Mode::Edit) | (Backend::Topological, _) => Ok(Strategy::Topological),
        (Backend::DirectBuffer, Mode::Edit) => Err(EditError::UnsafeBackend {
            object: object.to_string(),
        }),
    }
}
