//! Provides panic-free lock helpers for handle state.
//!
//! # Examples
//! ```
//! use std::sync::Mutex;
//!
//! use adsi::com::helpers::MutexExt;
//!
//! let mutex = Mutex::new(1u32);
//! let guard = mutex.lock_or_fail().expect("lock should succeed");
//! assert_eq!(*guard, 1);
//! ```

use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};

/// Provides `Mutex` access that reports poisoning as [`Error::Poisoned`].
///
/// A caller that panics inside a platform call leaves the handle lock
/// poisoned. Later callers get an error instead of a second panic.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
///
/// use adsi::com::helpers::MutexExt;
///
/// let mutex = Mutex::new("value");
/// let guard = mutex.lock_or_fail().expect("lock should succeed");
/// assert_eq!(*guard, "value");
/// ```
pub trait MutexExt<T> {
    /// Locks the mutex, returning [`Error::Poisoned`] instead of panicking.
    fn lock_or_fail(&self) -> Result<MutexGuard<'_, T>>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_or_fail(&self) -> Result<MutexGuard<'_, T>> {
        self.lock().map_err(|_| Error::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_mutex_ext_success() {
        let mutex = Mutex::new(42);
        let guard = mutex.lock_or_fail();
        assert!(guard.is_ok());
        assert_eq!(*guard.unwrap(), 42);
    }

    #[test]
    fn test_mutex_ext_poisoned() {
        let mutex = Arc::new(Mutex::new(0));
        let poisoner = Arc::clone(&mutex);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(mutex.lock_or_fail(), Err(Error::Poisoned)));
    }
}
