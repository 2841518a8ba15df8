//! Transactional mesh editing for meshedit
//!
//! Edits a mesh inside a stateful modeling host without leaving the host's
//! mode or selection changed behind the caller's back:
//! - [`SelectionGuard`] - snapshots the active object and selection, restores them on exit
//! - [`ModeGuard`] - forces a mode with an object active, restores mode then selection
//! - [`GeometrySession`] - live or detached editable mesh with guaranteed write-back
//! - [`select_strategy`] - direct-buffer vs topological backend policy
//! - [`move_geometry`] - the public move operation
//! - [`MeshEditor`] - config-aware facade that runs scripted requests
//!
//! All host access goes through a [`Host`](meshedit_host::Host) handle that
//! the outermost guard borrows mutably for its whole scope. Restore failures
//! never replace a caller's result; they are reported through
//! [`Host::report_suppressed`](meshedit_host::Host::report_suppressed).

pub mod backend;
pub mod direct;
pub mod editor;
pub mod error;
pub mod mode;
pub mod ops;
mod restore;
pub mod selection;
pub mod session;

pub use backend::select_strategy;
pub use direct::move_direct;
pub use editor::MeshEditor;
pub use error::EditError;
pub use mode::ModeGuard;
pub use ops::{MoveReport, move_geometry, move_with_session};
pub use selection::{SelectionGuard, StateSnapshot};
pub use session::GeometrySession;

pub use meshedit_config::EditConfig;
pub use meshedit_ipc::{Backend, Mode, MoveCommand, Space, Strategy};
