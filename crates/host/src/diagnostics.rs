//! Restoration failures that are observed but never raised.
//!
//! Guards restore host state on every exit path. When a restore step fails,
//! the failure must not replace the caller's own result, so it is wrapped in
//! a [`SuppressedError`] and handed to [`Host::report_suppressed`] instead.
//!
//! [`Host::report_suppressed`]: crate::Host::report_suppressed

use std::fmt;

use crate::error::HostError;

/// Restore step a suppressed failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestoreStage {
    /// Clearing the selection before re-selecting the snapshot
    Deselect,
    /// Re-selecting a previously selected object
    Reselect,
    /// Restoring the active object
    ActiveObject,
    /// Switching back to the previous mode
    Mode,
    /// Copying detached geometry back to persisted storage
    WriteBack,
    /// Signalling a live edit buffer update
    EditUpdate,
}

impl fmt::Display for RestoreStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RestoreStage::Deselect => "deselect",
            RestoreStage::Reselect => "reselect",
            RestoreStage::ActiveObject => "active object",
            RestoreStage::Mode => "mode",
            RestoreStage::WriteBack => "write-back",
            RestoreStage::EditUpdate => "edit update",
        })
    }
}

/// A restore failure that was swallowed.
#[derive(Debug)]
pub struct SuppressedError {
    pub stage: RestoreStage,
    pub object: Option<String>,
    pub error: HostError,
}

impl SuppressedError {
    pub fn new(stage: RestoreStage, object: Option<&str>, error: HostError) -> Self {
        Self {
            stage,
            object: object.map(str::to_string),
            error,
        }
    }
}

impl fmt::Display for SuppressedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Some(name) => write!(f, "{} of '{}' failed: {}", self.stage, name, self.error),
            None => write!(f, "{} failed: {}", self.stage, self.error),
        }
    }
}
