//! Provides [`Client`], the entry point that binds directory paths.
//!
//! A client wraps a namespace object's `IADsOpenDSObject` interface. The
//! namespace object is created locally or on a remote host through
//! [`api::create_remote_object`].
//!
//! # Examples
//! ```no_run
//! use adsi::Client;
//!
//! let client = Client::ldap()?;
//! let root = client.open("LDAP://RootDSE")?;
//! println!("{}", root.path()?);
//! root.close()?;
//! client.close()?;
//! # Ok::<(), adsi::Error>(())
//! ```

use std::fmt;

use crate::api::{self, AuthFlags, IAdsOpenDsObject, CLSID_LDAP_NAMESPACE};
use crate::config::Config;
use crate::guid::Guid;
use crate::handle::Handle;
use crate::object::Object;
use crate::Result;

/// Explicit credentials used to bind a path.
///
/// # Examples
/// ```
/// use adsi::Credentials;
///
/// let creds = Credentials::new("EXAMPLE\\reader", "hunter2");
/// assert_eq!(creds.username(), "EXAMPLE\\reader");
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from a user name and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the user name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Binds directory paths through a namespace object.
pub struct Client {
    handle: Handle<dyn IAdsOpenDsObject>,
}

impl Client {
    /// Creates the namespace object `clsid` on `server`, or locally when
    /// `server` is `None` or empty.
    ///
    /// # Errors
    /// Returns the platform error if the class cannot be activated.
    pub fn connect(server: Option<&str>, clsid: &Guid) -> Result<Self> {
        let iface = crate::com::run(|| Ok(api::create_remote_object(server, clsid)?))?;
        log::debug!("created namespace object {clsid} on {}", server.unwrap_or("localhost"));
        Ok(Self::from_interface(iface))
    }

    /// Creates the local LDAP namespace object.
    pub fn ldap() -> Result<Self> {
        Self::connect(None, &CLSID_LDAP_NAMESPACE)
    }

    /// Creates the namespace object described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::connect(config.server.as_deref(), &config.clsid)
    }

    /// Wraps an `IADsOpenDSObject` implementation in a new handle.
    pub fn from_interface(iface: Box<dyn IAdsOpenDsObject>) -> Self {
        Self {
            handle: Handle::new(iface),
        }
    }

    /// Binds `path` as the calling security context with secure
    /// authentication.
    pub fn open(&self, path: &str) -> Result<Object> {
        self.bind(path, None, AuthFlags::SECURE)
    }

    /// Binds `path` with explicit credentials and bind options.
    pub fn open_as(&self, path: &str, credentials: &Credentials, flags: AuthFlags) -> Result<Object> {
        self.bind(path, Some(credentials), flags)
    }

    /// Binds `path` the way `config` asks: its credentials if it has any,
    /// otherwise the calling security context.
    pub fn open_with(&self, path: &str, config: &Config) -> Result<Object> {
        self.bind(path, config.credentials().as_ref(), config.auth_flags())
    }

    fn bind(&self, path: &str, credentials: Option<&Credentials>, flags: AuthFlags) -> Result<Object> {
        self.handle.with(|iface| {
            let object = iface.open_ds_object(
                path,
                credentials.map(Credentials::username),
                credentials.map(Credentials::password),
                flags,
            )?;
            log::debug!("bound {path} with {flags:?}");
            Ok(Object::new(object))
        })
    }

    ads_handle_lifecycle!();
}

impl_handle_debug!(Client);
