//! Implements the handle that owns one ADSI interface.
//!
//! A [`Handle`] is either open, holding the interface and a runtime lease,
//! or closed, holding nothing. Every operation takes the handle's lock,
//! checks the state and only then reaches the platform through
//! [`com::run`](crate::com::run). A closed handle answers with
//! [`Error::Closed`] without touching the platform.

use std::sync::{Mutex, PoisonError};

use crate::api::{IAds, IAdsComputer, IAdsContainer, IAdsGroup, Release};
use crate::com::{self, runtime, runtime::Lease, MutexExt};
use crate::error::{Error, Result};
use crate::guid::Guid;

struct Open<T: ?Sized + Release> {
    iface: Box<T>,
    lease: Lease,
}

impl<T: ?Sized + Release> Open<T> {
    fn release(self) -> Result<()> {
        let Open { iface, lease } = self;
        log::trace!("releasing directory interface");
        let released = com::release(iface);
        drop(lease);
        released
    }
}

/// Owns one interface and serializes access to it.
pub(crate) struct Handle<T: ?Sized + Release> {
    state: Mutex<Option<Open<T>>>,
}

impl<T: ?Sized + Release> Handle<T> {
    pub(crate) fn new(iface: Box<T>) -> Self {
        Self {
            state: Mutex::new(Some(Open {
                iface,
                lease: runtime::global().acquire(),
            })),
        }
    }

    /// Calls `f` with the interface, inside the execution shim.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> Result<R>) -> Result<R> {
        let state = self.state.lock_or_fail()?;
        let open = state.as_ref().ok_or(Error::Closed)?;
        com::run(|| f(&*open.iface))
    }

    /// Releases the interface. Closing twice is a no-op.
    ///
    /// The handle is closed once this returns, even when the release itself
    /// reports an error.
    pub(crate) fn close(&self) -> Result<()> {
        let mut state = self.state.lock_or_fail()?;
        match state.take() {
            Some(open) => open.release(),
            None => Ok(()),
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        // A poisoned handle can never be used again, so report it as closed.
        self.state
            .lock()
            .map(|state| state.is_none())
            .unwrap_or(true)
    }
}

impl<T: ?Sized + Release> Drop for Handle<T> {
    fn drop(&mut self) {
        // A poisoned handle still owns its interface.
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(open) = state.take() {
            if let Err(err) = open.release() {
                log::warn!("failed to release directory interface on drop: {err}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// IADs operations, shared by every facade
// ---------------------------------------------------------------------------

impl<T: ?Sized + IAds> Handle<T> {
    pub(crate) fn name(&self) -> Result<String> {
        self.with(|iface| Ok(iface.name()?))
    }

    pub(crate) fn class(&self) -> Result<String> {
        self.with(|iface| Ok(iface.class()?))
    }

    pub(crate) fn guid(&self) -> Result<Guid> {
        self.with(|iface| {
            let text = iface.guid()?;
            text.parse().map_err(|_| Error::InvalidGuid(text))
        })
    }

    pub(crate) fn path(&self) -> Result<String> {
        self.with(|iface| Ok(iface.ads_path()?))
    }

    pub(crate) fn parent(&self) -> Result<String> {
        self.with(|iface| Ok(iface.parent()?))
    }

    pub(crate) fn schema(&self) -> Result<String> {
        self.with(|iface| Ok(iface.schema()?))
    }

    pub(crate) fn query_container(&self) -> Result<Handle<dyn IAdsContainer>> {
        self.with(|iface| Ok(Handle::new(iface.query_container()?)))
    }

    pub(crate) fn query_computer(&self) -> Result<Handle<dyn IAdsComputer>> {
        self.with(|iface| Ok(Handle::new(iface.query_computer()?)))
    }

    pub(crate) fn query_group(&self) -> Result<Handle<dyn IAdsGroup>> {
        self.with(|iface| Ok(Handle::new(iface.query_group()?)))
    }
}
