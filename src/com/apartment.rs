//! Joins the calling thread to the COM multithreaded apartment.

use crate::api::PlatformResult;
#[cfg(windows)]
use crate::error::PlatformError;

/// Membership of the current thread in the multithreaded apartment.
///
/// Dropping it leaves the apartment again.
pub(crate) struct Apartment {
    #[cfg(windows)]
    _joined: (),
}

#[cfg(windows)]
impl Apartment {
    pub(crate) fn enter() -> PlatformResult<Self> {
        use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
        use windows::Win32::System::Com::{CoInitializeEx, COINIT_MULTITHREADED};

        match unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }.ok() {
            Ok(()) => Ok(Self { _joined: () }),
            // Interfaces made here would be bound to that STA.
            Err(e) if e.code() == RPC_E_CHANGED_MODE => {
                log::debug!("thread belongs to a single-threaded apartment");
                Err(PlatformError::new(
                    e.code().0,
                    "thread belongs to a single-threaded apartment; directory handles need the MTA",
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(windows)]
impl Drop for Apartment {
    fn drop(&mut self) {
        unsafe { windows::Win32::System::Com::CoUninitialize() };
    }
}

#[cfg(not(windows))]
impl Apartment {
    pub(crate) fn enter() -> PlatformResult<Self> {
        Ok(Self {})
    }
}
