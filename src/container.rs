//! Provides [`Container`], the handle for directory objects that hold other
//! objects.

use crate::api::IAdsContainer;
use crate::handle::Handle;
use crate::object::Object;
use crate::Result;

/// Provides access to a directory container through `IADsContainer`.
///
/// Obtained from [`Object::to_container`] or any other facade's
/// `to_container`.
pub struct Container {
    handle: Handle<dyn IAdsContainer>,
}

impl Container {
    pub(crate) fn from_handle(handle: Handle<dyn IAdsContainer>) -> Self {
        Self { handle }
    }

    /// Wraps an `IADsContainer` implementation in a new handle that owns it.
    pub fn new(iface: Box<dyn IAdsContainer>) -> Self {
        Self::from_handle(Handle::new(iface))
    }

    ads_object_methods!();

    /// Lists the direct children of the container.
    ///
    /// Each child gets its own handle; the caller owns and closes them.
    pub fn children(&self) -> Result<Vec<Object>> {
        self.handle.with(|iface| {
            let children = iface.children()?;
            log::debug!("container enumerated {} children", children.len());
            Ok(children.into_iter().map(Object::new).collect())
        })
    }

    /// Binds the child with the given schema class and relative name, such as
    /// `("user", "CN=Jane Doe")`.
    pub fn get_object(&self, class: &str, relative_name: &str) -> Result<Object> {
        self.handle
            .with(|iface| Ok(Object::new(iface.get_object(class, relative_name)?)))
    }
}

impl_handle_debug!(Container);
