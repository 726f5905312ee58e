//! Provides the COM plumbing every handle relies on.
//!
//! - [`run`] - The execution shim: runs a platform call inside the MTA
//! - [`runtime`] - Process-wide, reference-counted COM initialization
//! - [`helpers::MutexExt`] - Panic-free mutex locking
//!
//! # Examples
//! ```
//! let answer = adsi::com::run(|| Ok(42)).expect("run should succeed");
//! assert_eq!(answer, 42);
//! ```

mod apartment;
pub mod helpers;
pub mod runtime;

use std::cell::RefCell;
use std::thread;

use apartment::Apartment;
pub use helpers::MutexExt;

use crate::api::{PlatformResult, Release};
use crate::error::{hresult, PlatformError, Result};

thread_local! {
    static APARTMENT: RefCell<Option<Apartment>> = const { RefCell::new(None) };
}

/// Runs `f` after making sure the calling thread is in the multithreaded
/// apartment.
///
/// The thread joins the apartment on its first call and leaves it when the
/// thread exits. If joining fails, `f` is not run and the platform error is
/// returned. A thread that already belongs to a single-threaded apartment
/// cannot join and gets `RPC_E_CHANGED_MODE`.
///
/// # Examples
/// ```
/// use adsi::Error;
///
/// let result: adsi::Result<()> = adsi::com::run(|| Err(Error::Closed));
/// assert!(matches!(result, Err(Error::Closed)));
/// ```
pub fn run<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let _scoped = enter()?;
    f()
}

/// Puts the calling thread in the MTA.
///
/// Returns a guard only while the thread is exiting and its thread-local
/// slot is gone; the caller keeps it for the duration of one call.
pub(crate) fn enter() -> PlatformResult<Option<Apartment>> {
    let joined = APARTMENT.try_with(|slot| -> PlatformResult<()> {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(Apartment::enter()?);
        }
        Ok(())
    });
    match joined {
        Ok(result) => result.map(|()| None),
        Err(_) => {
            log::trace!("thread is exiting; joining the apartment for one call");
            Apartment::enter().map(Some)
        }
    }
}

/// Releases `iface` from inside the MTA.
///
/// On a thread stuck in a single-threaded apartment the release is handed
/// to a short-lived worker that can join the MTA.
pub(crate) fn release<T: ?Sized + Release>(iface: Box<T>) -> Result<()> {
    match enter() {
        Ok(_scoped) => Ok(iface.release()?),
        Err(err) if err.code() == hresult::RPC_E_CHANGED_MODE => {
            log::debug!("releasing directory interface from an MTA worker");
            thread::scope(|scope| {
                scope
                    .spawn(move || run(move || Ok(iface.release()?)))
                    .join()
                    .unwrap_or_else(|_| {
                        Err(PlatformError::new(hresult::E_FAIL, "interface release panicked").into())
                    })
            })
        }
        Err(err) => {
            drop(iface);
            Err(err.into())
        }
    }
}
