//! Attempt-and-discard for restore steps.
//!
//! A restore step runs, and if it fails the failure becomes a
//! [`SuppressedError`]: logged, handed to the host's diagnostic channel and
//! otherwise dropped. The caller's own result is never replaced.

use meshedit_host::{Host, HostError, RestoreStage, SuppressedError};
use tracing::warn;

/// Run a restore step, suppressing its failure. Returns whether it succeeded.
pub(crate) fn attempt<H, F>(host: &mut H, stage: RestoreStage, object: Option<&str>, step: F) -> bool
where
    H: Host + ?Sized,
    F: FnOnce(&mut H) -> Result<(), HostError>,
{
    let result = step(host);
    discard(host, stage, object, result)
}

/// Suppress the failure of a step that already ran.
pub(crate) fn discard<H: Host + ?Sized>(
    host: &mut H,
    stage: RestoreStage,
    object: Option<&str>,
    result: Result<(), HostError>,
) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => {
            let suppressed = SuppressedError::new(stage, object, error);
            warn!("Suppressed restore failure: {}", suppressed);
            host.report_suppressed(suppressed);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshedit_host::MemoryHost;

    #[test]
    fn test_failure_is_reported_not_raised() {
        let mut host = MemoryHost::new();
        let ok = attempt(&mut host, RestoreStage::Reselect, Some("Gone"), |h| {
            h.select_object("Gone", true)
        });
        assert!(!ok);

        let suppressed = host.suppressed();
        assert_eq!(suppressed.len(), 1);
        assert_eq!(suppressed[0].stage, RestoreStage::Reselect);
        assert_eq!(suppressed[0].object.as_deref(), Some("Gone"));
        assert!(matches!(suppressed[0].error, HostError::ObjectNotFound(_)));
    }

    #[test]
    fn test_success_reports_nothing() {
        let mut host = MemoryHost::new();
        assert!(attempt(&mut host, RestoreStage::ActiveObject, None, |h| {
            h.set_active_object(None)
        }));
        assert!(host.suppressed().is_empty());
    }
}
