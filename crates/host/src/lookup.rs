//! Name-based object lookup and selection.
//!
//! Unlike guard restoration, selection requested here is reported: a missing
//! or unselectable target is an error for the caller.

use tracing::debug;

use crate::error::HostError;
use crate::object::HostObject;
use crate::Host;

/// Options for [`select_object_by_name`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOptions {
    /// Make the object the active object
    pub make_active: bool,
    /// Deselect every other object first
    pub deselect_others: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            make_active: true,
            deselect_others: true,
        }
    }
}

/// Resolve an object by name
pub fn find_object<'h, H: Host + ?Sized>(host: &'h H, name: &str) -> Result<&'h HostObject, HostError> {
    host.object(name)
        .ok_or_else(|| HostError::ObjectNotFound(name.to_string()))
}

/// Select an object by name.
///
/// Deselecting other objects is best-effort; selecting and activating the
/// target are not.
pub fn select_object_by_name<H: Host + ?Sized>(
    host: &mut H,
    name: &str,
    options: SelectOptions,
) -> Result<(), HostError> {
    find_object(host, name)?;

    if options.deselect_others {
        for other in host.selected_objects() {
            if other == name {
                continue;
            }
            if let Err(e) = host.select_object(&other, false) {
                debug!("Could not deselect '{}': {}", other, e);
            }
        }
    }

    host.select_object(name, true)?;

    if options.make_active {
        host.set_active_object(Some(name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryHost;
    use meshedit_geometry::primitives;

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new();
        host.add_mesh(HostObject::mesh("Cube"), primitives::cube(2.0));
        host.add_mesh(HostObject::mesh("Plane"), primitives::plane(1.0));
        host
    }

    #[test]
    fn test_select_replaces_selection() {
        let mut host = host();
        host.select_object("Plane", true).unwrap();

        select_object_by_name(&mut host, "Cube", SelectOptions::default()).unwrap();
        assert_eq!(host.selected_objects(), vec!["Cube".to_string()]);
        assert_eq!(host.active_object(), Some("Cube"));
    }

    #[test]
    fn test_select_keep_others_without_activating() {
        let mut host = host();
        host.select_object("Plane", true).unwrap();

        let options = SelectOptions {
            make_active: false,
            deselect_others: false,
        };
        select_object_by_name(&mut host, "Cube", options).unwrap();
        assert_eq!(
            host.selected_objects(),
            vec!["Plane".to_string(), "Cube".to_string()]
        );
        assert_eq!(host.active_object(), None);
    }

    #[test]
    fn test_select_missing_object_is_reported() {
        let mut host = host();
        let err = select_object_by_name(&mut host, "Suzanne", SelectOptions::default()).unwrap_err();
        assert!(matches!(err, HostError::ObjectNotFound(name) if name == "Suzanne"));
    }

    #[test]
    fn test_select_unselectable_object_is_reported() {
        let mut host = host();
        host.object_mut("Plane").unwrap().selectable = false;
        let err = select_object_by_name(&mut host, "Plane", SelectOptions::default()).unwrap_err();
        assert!(matches!(err, HostError::NotSelectable(_)));
    }
}
