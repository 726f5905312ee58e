//! Provides [`Config`], connection settings read from JSON.
//!
//! # Examples
//! ```
//! use adsi::{AuthFlags, Config};
//!
//! let config = Config::from_json(r#"{
//!     "server": "dc01.example.com",
//!     "path": "LDAP://dc01.example.com/DC=example,DC=com",
//!     "auth": ["secure", "sealing"]
//! }"#)?;
//! assert_eq!(config.auth_flags(), AuthFlags::SECURE | AuthFlags::USE_SEALING);
//! assert!(config.credentials().is_none());
//! # Ok::<(), adsi::Error>(())
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::{AuthFlag, AuthFlags, CLSID_LDAP_NAMESPACE};
use crate::client::Credentials;
use crate::guid::Guid;
use crate::Result;

/// Connection settings for a [`Client`](crate::Client).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Host to create the namespace object on; local when absent.
    pub server: Option<String>,
    /// Class identifier of the namespace object.
    pub clsid: Guid,
    /// Default ADsPath to bind.
    pub path: Option<String>,
    /// User to bind as; the calling security context when absent.
    pub username: Option<String>,
    /// Password for `username`.
    pub password: Option<String>,
    /// Bind options.
    pub auth: Vec<AuthFlag>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            clsid: CLSID_LDAP_NAMESPACE,
            path: None,
            username: None,
            password: None,
            auth: vec![AuthFlag::Secure],
        }
    }
}

impl Config {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Combines the configured bind options.
    pub fn auth_flags(&self) -> AuthFlags {
        self.auth.iter().copied().collect()
    }

    /// Returns explicit credentials when a user name is configured. A missing
    /// password is treated as empty.
    pub fn credentials(&self) -> Option<Credentials> {
        self.username.as_ref().map(|username| {
            Credentials::new(username.clone(), self.password.clone().unwrap_or_default())
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("clsid", &self.clsid)
            .field("path", &self.path)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("auth", &self.auth)
            .finish()
    }
}
