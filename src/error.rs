//! Provides the error taxonomy shared by every handle in the crate.
//!
//! Three kinds of failure matter to callers:
//! - [`Error::Closed`] is raised locally when a handle is used after `close`.
//! - [`Error::InvalidGuid`] is raised when the directory returns GUID text
//!   that does not parse.
//! - [`Error::Platform`] carries the COM failure unchanged, HRESULT included.
//!
//! # Examples
//! ```
//! use adsi::error::{hresult, Error, PlatformError};
//!
//! let err = Error::from(PlatformError::from_code(hresult::E_NOINTERFACE));
//! assert_eq!(err.hresult(), Some(hresult::E_NOINTERFACE));
//! assert!(Error::Closed.hresult().is_none());
//! ```

use thiserror::Error;

/// Well-known HRESULT values returned by COM and the ADSI providers.
pub mod hresult {
    /// Not implemented.
    pub const E_NOTIMPL: i32 = 0x8000_4001_u32 as i32;
    /// The object does not support the requested interface.
    pub const E_NOINTERFACE: i32 = 0x8000_4002_u32 as i32;
    /// Invalid pointer.
    pub const E_POINTER: i32 = 0x8000_4003_u32 as i32;
    /// Unspecified failure.
    pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;
    /// General access denied error.
    pub const E_ACCESSDENIED: i32 = 0x8007_0005_u32 as i32;
    /// One or more arguments are invalid.
    pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
    /// The ADSI property cannot be found in the cache.
    pub const E_ADS_PROPERTY_NOT_FOUND: i32 = 0x8000_500D_u32 as i32;
    /// An invalid directory pathname was passed.
    pub const E_ADS_BAD_PATHNAME: i32 = 0x8000_5000_u32 as i32;
    /// The directory object does not exist.
    pub const E_ADS_NO_SUCH_OBJECT: i32 = 0x8007_2030_u32 as i32;
    /// The thread already belongs to a single-threaded apartment.
    pub const RPC_E_CHANGED_MODE: i32 = 0x8001_0106_u32 as i32;
    /// CoInitialize has not been called.
    pub const CO_E_NOTINITIALIZED: i32 = 0x8004_01F0_u32 as i32;
}

/// Alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents every failure a handle operation can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The handle was closed before the operation was attempted.
    #[error("directory object handle is closed")]
    Closed,
    /// The platform returned a GUID string that is not a valid identifier.
    #[error("directory object returned an invalid GUID: {0:?}")]
    InvalidGuid(String),
    /// A COM call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
    /// A caller panicked while holding the handle lock.
    #[error("directory object handle lock is poisoned")]
    Poisoned,
    /// The configuration document is not valid JSON for [`crate::Config`].
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the HRESULT of a platform failure.
    ///
    /// # Examples
    /// ```
    /// use adsi::error::{hresult, Error, PlatformError};
    ///
    /// let err: Error = PlatformError::from_code(hresult::E_FAIL).into();
    /// assert_eq!(err.hresult(), Some(hresult::E_FAIL));
    /// ```
    pub fn hresult(&self) -> Option<i32> {
        match self {
            Error::Platform(err) => Some(err.code()),
            _ => None,
        }
    }

    /// Reports whether this is the closed-handle error.
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::Closed)
    }
}

/// Represents a failed COM call, keeping the HRESULT the platform reported.
///
/// # Examples
/// ```
/// use adsi::error::{hresult, PlatformError};
///
/// let err = PlatformError::new(hresult::E_ACCESSDENIED, "Access is denied.");
/// assert_eq!(err.code(), hresult::E_ACCESSDENIED);
/// assert_eq!(err.to_string(), "Access is denied. (HRESULT 0x80070005)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (HRESULT {code:#010x})")]
pub struct PlatformError {
    code: i32,
    message: String,
}

impl PlatformError {
    /// Creates an error from an HRESULT and the system message for it.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates an error from a bare HRESULT, using a generic message.
    pub fn from_code(code: i32) -> Self {
        let message = match code {
            hresult::E_NOTIMPL => "Not implemented",
            hresult::E_NOINTERFACE => "No such interface supported",
            hresult::E_POINTER => "Invalid pointer",
            hresult::E_FAIL => "Unspecified error",
            hresult::E_ACCESSDENIED => "Access is denied",
            hresult::E_INVALIDARG => "The parameter is incorrect",
            hresult::E_ADS_PROPERTY_NOT_FOUND => "The directory property cannot be found in the cache",
            hresult::E_ADS_BAD_PATHNAME => "An invalid directory pathname was passed",
            hresult::E_ADS_NO_SUCH_OBJECT => "There is no such object on the server",
            hresult::CO_E_NOTINITIALIZED => "CoInitialize has not been called",
            _ => "COM call failed",
        };
        Self::new(code, message)
    }

    /// Returns the HRESULT.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Returns the message reported alongside the HRESULT.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        Self::new(err.code().0, err.message())
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for Error {
    fn from(err: windows::core::Error) -> Self {
        Error::Platform(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_error_keeps_code() {
        let err = PlatformError::from_code(hresult::E_NOINTERFACE);
        assert_eq!(err.code(), hresult::E_NOINTERFACE);
        assert_eq!(err.message(), "No such interface supported");
    }

    #[test]
    fn test_platform_error_display_is_unsigned_hex() {
        let err = PlatformError::from_code(hresult::E_ADS_NO_SUCH_OBJECT);
        assert!(err.to_string().ends_with("(HRESULT 0x80072030)"));
    }

    #[test]
    fn test_unknown_code_gets_generic_message() {
        let err = PlatformError::from_code(0x8007_0035_u32 as i32);
        assert_eq!(err.message(), "COM call failed");
    }

    #[test]
    fn test_error_hresult_only_for_platform() {
        assert_eq!(Error::InvalidGuid("x".into()).hresult(), None);
        assert_eq!(Error::Poisoned.hresult(), None);
        let err = Error::from(PlatformError::from_code(hresult::E_FAIL));
        assert_eq!(err.hresult(), Some(hresult::E_FAIL));
    }
}
