//! Provides safe handles for Active Directory Service Interfaces (ADSI) COM
//! objects.
//!
//! Each handle owns exactly one ADSI interface. Access is serialized by a
//! lock, every platform call runs inside the COM multithreaded apartment, and
//! the interface is released exactly once, on [`Object::close`] or when the
//! handle is dropped. Using a handle after closing it fails with
//! [`Error::Closed`] without reaching the platform.
//!
//! Handles are obtained by binding a path through a [`Client`], then narrowed
//! with runtime casts:
//!
//! ```no_run
//! use adsi::Client;
//!
//! let client = Client::ldap()?;
//! let domain = client.open("LDAP://DC=example,DC=com")?;
//! let container = domain.to_container()?;
//! for child in container.children()? {
//!     println!("{} ({})", child.name()?, child.class()?);
//! }
//! # Ok::<(), adsi::Error>(())
//! ```
//!
//! The platform layer is expressed as traits in [`api`], implemented over the
//! `windows` crate on Windows. Any other implementation (a test double, for
//! instance) can be wrapped with [`Object::new`] and friends.
//!
//! # Examples
//! ```
//! let guid: adsi::Guid = "{228D9A82-C302-11CF-9AA4-00AA004A5691}".parse().unwrap();
//! assert_eq!(guid, adsi::api::CLSID_LDAP_NAMESPACE);
//! ```

// Facade macros - must be declared first for macro availability
#[macro_use]
mod macros;

pub mod api;
pub mod com;
pub mod config;
pub mod error;
pub mod guid;

mod client;
mod computer;
mod container;
mod group;
mod handle;
mod object;

pub use api::{AuthFlag, AuthFlags};
pub use client::{Client, Credentials};
pub use computer::Computer;
pub use config::Config;
pub use container::Container;
pub use error::{Error, PlatformError, Result};
pub use group::Group;
pub use guid::Guid;
pub use object::Object;
