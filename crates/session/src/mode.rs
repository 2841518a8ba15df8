//! Scoped host mode changes.

use meshedit_host::{Host, HostError, RestoreStage};
use meshedit_ipc::Mode;
use tracing::debug;

use crate::error::EditError;
use crate::restore;
use crate::selection::SelectionGuard;

/// Forces the host into a mode with an object active, and undoes both on exit.
///
/// Entry order is: record mode, snapshot selection, make the object active,
/// switch mode. Exit runs in reverse: mode first, then selection. The mode is
/// only requested when the host is not already in it, so a guard targeting
/// the current mode never asks the host to switch.
pub struct ModeGuard<'h, H: Host + ?Sized> {
    // Dropped after `Drop::drop` restored the mode
    selection: SelectionGuard<'h, H>,
    object: String,
    previous: Mode,
    target: Mode,
}

impl<'h, H: Host + ?Sized> ModeGuard<'h, H> {
    /// Enter `target` mode with `object` active.
    ///
    /// Any kind of object can be made active for object mode; edit mode
    /// needs an editable kind.
    pub fn enter(host: &'h mut H, object: &str, target: Mode) -> Result<Self, EditError> {
        let Some(obj) = host.object(object) else {
            return Err(EditError::invalid_object(object, "object not found"));
        };
        if target == Mode::Edit && !obj.kind.is_editable() {
            return Err(EditError::invalid_object(
                object,
                format!("{:?} objects have no edit mode", obj.kind),
            ));
        }

        let previous = host.mode();
        let mut guard = Self {
            selection: SelectionGuard::enter(host),
            object: object.to_string(),
            previous,
            target,
        };
        guard.selection.make_active(object)?;

        if previous != target {
            debug!("Switching '{}' from {} to {} mode", object, previous, target);
            let host = guard.selection.host_mut();
            host.request_mode(target)?;
            let actual = host.mode();
            if actual != target {
                return Err(EditError::ModeNotReached {
                    requested: target,
                    actual,
                });
            }
        }
        Ok(guard)
    }

    /// [`ModeGuard::enter`] with the mode given as a token such as `"edit"`.
    ///
    /// An unknown token fails before the host is touched.
    pub fn enter_named(host: &'h mut H, object: &str, mode: &str) -> Result<Self, EditError> {
        let target: Mode = mode.parse()?;
        Self::enter(host, object, target)
    }

    pub fn edit(host: &'h mut H, object: &str) -> Result<Self, EditError> {
        Self::enter(host, object, Mode::Edit)
    }

    pub fn object(host: &'h mut H, object: &str) -> Result<Self, EditError> {
        Self::enter(host, object, Mode::Object)
    }

    /// Mode the host was in at entry
    pub fn previous(&self) -> Mode {
        self.previous
    }

    pub fn target(&self) -> Mode {
        self.target
    }

    pub fn object_name(&self) -> &str {
        &self.object
    }

    pub fn host(&self) -> &H {
        self.selection.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.selection.host_mut()
    }

    /// Restore mode and selection now
    pub fn exit(self) {}
}

impl<H: Host + ?Sized> Drop for ModeGuard<'_, H> {
    fn drop(&mut self) {
        let previous = self.previous;
        let host = self.selection.host_mut();
        if host.mode() == previous {
            return;
        }
        debug!("Restoring {} mode after '{}'", previous, self.object);
        restore::attempt(host, RestoreStage::Mode, Some(&self.object), |h| {
            h.request_mode(previous)?;
            let actual = h.mode();
            if actual != previous {
                return Err(HostError::ModeChangeIgnored {
                    requested: previous,
                    actual,
                });
            }
            Ok(())
        });
    }
}
