//! Provides [`Group`], the handle for security and distribution groups.

use crate::api::IAdsGroup;
use crate::handle::Handle;
use crate::object::Object;
use crate::Result;

/// Provides access to a group object through `IADsGroup`.
pub struct Group {
    handle: Handle<dyn IAdsGroup>,
}

impl Group {
    pub(crate) fn from_handle(handle: Handle<dyn IAdsGroup>) -> Self {
        Self { handle }
    }

    /// Wraps an `IADsGroup` implementation in a new handle that owns it.
    pub fn new(iface: Box<dyn IAdsGroup>) -> Self {
        Self::from_handle(Handle::new(iface))
    }

    ads_object_methods!();

    /// Retrieves the description of the group.
    pub fn description(&self) -> Result<String> {
        self.handle.with(|iface| Ok(iface.description()?))
    }

    /// Lists the direct members of the group, each in its own handle.
    pub fn members(&self) -> Result<Vec<Object>> {
        self.handle
            .with(|iface| Ok(iface.members()?.into_iter().map(Object::new).collect()))
    }

    /// Reports whether the object at `path` is a direct member.
    pub fn is_member(&self, path: &str) -> Result<bool> {
        self.handle.with(|iface| Ok(iface.is_member(path)?))
    }

    /// Adds the object at `path` to the group.
    pub fn add(&self, path: &str) -> Result<()> {
        self.handle.with(|iface| {
            iface.add(path)?;
            log::debug!("added {path} to group");
            Ok(())
        })
    }

    /// Removes the object at `path` from the group.
    pub fn remove(&self, path: &str) -> Result<()> {
        self.handle.with(|iface| {
            iface.remove(path)?;
            log::debug!("removed {path} from group");
            Ok(())
        })
    }
}

impl_handle_debug!(Group);
