//! Provides [`Object`], the handle for any directory object.
//!
//! ADSI objects of LDAP:  <https://learn.microsoft.com/windows/win32/adsi/adsi-objects-of-ldap>
//! ADSI objects of WinNT: <https://learn.microsoft.com/windows/win32/adsi/adsi-objects-of-winnt>

use crate::api::IAds;
use crate::handle::Handle;

/// Provides access to a directory object through its `IADs` interface.
///
/// Use [`to_container`](Object::to_container),
/// [`to_computer`](Object::to_computer) or [`to_group`](Object::to_group) to
/// reach the richer interfaces the object may also implement.
pub struct Object {
    handle: Handle<dyn IAds>,
}

impl Object {
    /// Wraps an `IADs` implementation in a new handle that owns it.
    pub fn new(iface: Box<dyn IAds>) -> Self {
        Self {
            handle: Handle::new(iface),
        }
    }

    ads_object_methods!();
}

impl_handle_debug!(Object);
