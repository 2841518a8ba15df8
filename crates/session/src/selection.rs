//! Selection snapshots and the guard that restores them.

use meshedit_host::{Host, RestoreStage, SelectOptions, select_object_by_name};
use tracing::debug;

use crate::error::EditError;
use crate::restore;

/// Active object and selected objects at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateSnapshot {
    active: Option<String>,
    selected: Vec<String>,
}

impl StateSnapshot {
    /// Capture the host's current active object and selection
    pub fn capture<H: Host + ?Sized>(host: &H) -> Self {
        Self {
            active: host.active_object().map(str::to_string),
            selected: host.selected_objects(),
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Selected objects in selection order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }
}

/// Scoped selection change.
///
/// Captures a [`StateSnapshot`] on entry. On exit (explicit or on drop) it
/// clears the selection, re-selects every snapshot object that still exists
/// and restores the active object. Objects deleted in the meantime are
/// skipped. Exit never fails; individual restore failures are suppressed and
/// reported through [`Host::report_suppressed`].
pub struct SelectionGuard<'h, H: Host + ?Sized> {
    host: &'h mut H,
    snapshot: StateSnapshot,
    restore: bool,
}

impl<'h, H: Host + ?Sized> SelectionGuard<'h, H> {
    pub fn enter(host: &'h mut H) -> Self {
        Self::with_restore(host, true)
    }

    /// Enter, optionally leaving the selection as-is on exit
    pub fn with_restore(host: &'h mut H, restore: bool) -> Self {
        let snapshot = StateSnapshot::capture(&*host);
        debug!(
            "Selection guard entered: active={:?}, {} selected",
            snapshot.active,
            snapshot.selected.len()
        );
        Self {
            host,
            snapshot,
            restore,
        }
    }

    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    pub fn host(&self) -> &H {
        self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// Make `name` the only selected object and the active object.
    ///
    /// Failures here are reported; the guard still restores on exit.
    pub fn make_active(&mut self, name: &str) -> Result<(), EditError> {
        select_object_by_name(&mut *self.host, name, SelectOptions::default())
            .map_err(EditError::lookup)
    }

    pub fn exit(self) {}

    fn restore(&mut self) {
        let host = &mut *self.host;

        for name in host.selected_objects() {
            restore::attempt(host, RestoreStage::Deselect, Some(&name), |h| {
                h.select_object(&name, false)
            });
        }

        for name in &self.snapshot.selected {
            if !host.contains_object(name) {
                debug!("Skipping reselect of '{}', it no longer exists", name);
                continue;
            }
            restore::attempt(host, RestoreStage::Reselect, Some(name), |h| {
                h.select_object(name, true)
            });
        }

        match self.snapshot.active.as_deref() {
            Some(name) if host.contains_object(name) => {
                restore::attempt(host, RestoreStage::ActiveObject, Some(name), |h| {
                    h.set_active_object(Some(name))
                });
            }
            Some(name) => debug!("Skipping active object '{}', it no longer exists", name),
            None if host.active_object().is_some() => {
                restore::attempt(host, RestoreStage::ActiveObject, None, |h| {
                    h.set_active_object(None)
                });
            }
            None => {}
        }
    }
}

impl<H: Host + ?Sized> Drop for SelectionGuard<'_, H> {
    fn drop(&mut self) {
        if self.restore {
            self.restore();
        }
    }
}
