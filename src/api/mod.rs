//! Declares the ADSI interfaces this crate binds to.
//!
//! Each COM interface is represented by a trait. The handles in this crate
//! only ever talk to these traits, never to raw interface pointers, so the
//! platform layer can be swapped out. On Windows [`win32`] implements them
//! over the `windows` crate bindings; tests implement them with mocks.
//!
//! Dropping a boxed implementation must release the underlying interface
//! reference exactly once.
//!
//! # Examples
//! ```
//! use adsi::api::{IID_IADS, IID_IADS_CONTAINER};
//!
//! assert_ne!(IID_IADS, IID_IADS_CONTAINER);
//! assert_eq!(IID_IADS.to_string(), "{FD8256D0-FD15-11CE-ABC4-02608C9E7553}");
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::guid::Guid;

#[cfg(windows)]
pub mod win32;

/// Result of a call into the platform layer.
pub type PlatformResult<T> = Result<T, PlatformError>;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Interface identifier of `IADs`.
pub const IID_IADS: Guid = Guid::from_u128(0xfd8256d0_fd15_11ce_abc4_02608c9e7553);
/// Interface identifier of `IADsContainer`.
pub const IID_IADS_CONTAINER: Guid = Guid::from_u128(0x001677d0_fd16_11ce_abc4_02608c9e7553);
/// Interface identifier of `IADsComputer`.
pub const IID_IADS_COMPUTER: Guid = Guid::from_u128(0xefe3cc70_1d9f_11cf_b1f3_02608c9e7553);
/// Interface identifier of `IADsGroup`.
pub const IID_IADS_GROUP: Guid = Guid::from_u128(0x27636b00_410f_11cf_b1ff_02608c9e7553);
/// Interface identifier of `IADsMembers`.
pub const IID_IADS_MEMBERS: Guid = Guid::from_u128(0x451a0030_72ec_11cf_b03b_00aa006e0975);
/// Interface identifier of `IADsOpenDSObject`.
pub const IID_IADS_OPEN_DS_OBJECT: Guid = Guid::from_u128(0xddf2891e_0f9c_11d0_8ad4_00c04fd8d503);

/// Class identifier of the LDAP namespace object.
pub const CLSID_LDAP_NAMESPACE: Guid = Guid::from_u128(0x228d9a82_c302_11cf_9aa4_00aa004a5691);

// ---------------------------------------------------------------------------
// Interfaces
// ---------------------------------------------------------------------------

/// Base of every interface trait: giving back the interface reference.
pub trait Release: Send {
    /// Releases the reference. Dropping the box releases it too, but without
    /// a way to report failure.
    fn release(self: Box<Self>) -> PlatformResult<()> {
        Ok(())
    }
}

/// The `IADs` interface: identity and location of a directory object, plus
/// the capability queries used for casting.
pub trait IAds: Release {
    /// `IADs::get_Name`.
    fn name(&self) -> PlatformResult<String>;
    /// `IADs::get_Class`.
    fn class(&self) -> PlatformResult<String>;
    /// `IADs::get_GUID`, in the provider's text form.
    fn guid(&self) -> PlatformResult<String>;
    /// `IADs::get_ADsPath`.
    fn ads_path(&self) -> PlatformResult<String>;
    /// `IADs::get_Parent`.
    fn parent(&self) -> PlatformResult<String>;
    /// `IADs::get_Schema`.
    fn schema(&self) -> PlatformResult<String>;

    /// `QueryInterface(IID_IADsContainer)`.
    fn query_container(&self) -> PlatformResult<Box<dyn IAdsContainer>>;
    /// `QueryInterface(IID_IADsComputer)`.
    fn query_computer(&self) -> PlatformResult<Box<dyn IAdsComputer>>;
    /// `QueryInterface(IID_IADsGroup)`.
    fn query_group(&self) -> PlatformResult<Box<dyn IAdsGroup>>;
}

/// The `IADsContainer` interface.
pub trait IAdsContainer: IAds {
    /// Enumerates the direct children through `_NewEnum`.
    fn children(&self) -> PlatformResult<Vec<Box<dyn IAds>>>;
    /// `IADsContainer::GetObject`.
    fn get_object(&self, class: &str, relative_name: &str) -> PlatformResult<Box<dyn IAds>>;
}

/// String properties exposed by `IADsComputer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputerProperty {
    ComputerId,
    Site,
    Description,
    Location,
    PrimaryUser,
    Owner,
    Division,
    Department,
    Role,
    OperatingSystem,
    OperatingSystemVersion,
    Model,
    Processor,
    ProcessorCount,
    MemorySize,
    StorageCapacity,
}

/// The `IADsComputer` interface.
pub trait IAdsComputer: IAds {
    /// Reads one of the computer's string properties.
    fn property(&self, property: ComputerProperty) -> PlatformResult<String>;
}

/// The `IADsGroup` interface.
pub trait IAdsGroup: IAds {
    /// `IADsGroup::get_Description`.
    fn description(&self) -> PlatformResult<String>;
    /// Enumerates `IADsGroup::Members`.
    fn members(&self) -> PlatformResult<Vec<Box<dyn IAds>>>;
    /// `IADsGroup::IsMember`.
    fn is_member(&self, path: &str) -> PlatformResult<bool>;
    /// `IADsGroup::Add`.
    fn add(&self, path: &str) -> PlatformResult<()>;
    /// `IADsGroup::Remove`.
    fn remove(&self, path: &str) -> PlatformResult<()>;
}

/// The `IADsOpenDSObject` interface.
pub trait IAdsOpenDsObject: Release {
    /// `IADsOpenDSObject::OpenDSObject`. `None` credentials bind as the
    /// calling security context.
    fn open_ds_object(
        &self,
        path: &str,
        username: Option<&str>,
        password: Option<&str>,
        flags: AuthFlags,
    ) -> PlatformResult<Box<dyn IAds>>;
}

// ---------------------------------------------------------------------------
// Authentication flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Bind options mirroring `ADS_AUTHENTICATION_ENUM`.
    ///
    /// # Examples
    /// ```
    /// use adsi::AuthFlags;
    ///
    /// let flags = AuthFlags::SECURE | AuthFlags::USE_SEALING;
    /// assert!(flags.contains(AuthFlags::SECURE));
    /// assert!(!flags.contains(AuthFlags::FAST_BIND));
    /// assert_eq!(flags.bits(), 0x81);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AuthFlags: u32 {
        /// Request secure authentication.
        const SECURE = 0x1;
        /// Encrypt the channel.
        const USE_ENCRYPTION = 0x2;
        /// Allow a read-only server.
        const READONLY_SERVER = 0x4;
        /// Prompt for credentials (unsupported by most providers).
        const PROMPT_CREDENTIALS = 0x8;
        /// Bind anonymously.
        const NO_AUTHENTICATION = 0x10;
        /// Skip the schema lookup on bind.
        const FAST_BIND = 0x20;
        /// Sign traffic.
        const USE_SIGNING = 0x40;
        /// Seal traffic.
        const USE_SEALING = 0x80;
        /// Allow delegation of the security context.
        const USE_DELEGATION = 0x100;
        /// The path names a specific server.
        const SERVER_BIND = 0x200;
    }
}

impl AuthFlags {
    /// No options.
    pub const NONE: AuthFlags = AuthFlags::empty();
    /// Same bit as [`AuthFlags::USE_ENCRYPTION`].
    pub const USE_SSL: AuthFlags = AuthFlags::USE_ENCRYPTION;
}

/// A single named bind option, as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFlag {
    Secure,
    #[serde(alias = "ssl")]
    Encryption,
    ReadonlyServer,
    PromptCredentials,
    NoAuthentication,
    FastBind,
    Signing,
    Sealing,
    Delegation,
    ServerBind,
}

impl From<AuthFlag> for AuthFlags {
    fn from(flag: AuthFlag) -> Self {
        match flag {
            AuthFlag::Secure => AuthFlags::SECURE,
            AuthFlag::Encryption => AuthFlags::USE_ENCRYPTION,
            AuthFlag::ReadonlyServer => AuthFlags::READONLY_SERVER,
            AuthFlag::PromptCredentials => AuthFlags::PROMPT_CREDENTIALS,
            AuthFlag::NoAuthentication => AuthFlags::NO_AUTHENTICATION,
            AuthFlag::FastBind => AuthFlags::FAST_BIND,
            AuthFlag::Signing => AuthFlags::USE_SIGNING,
            AuthFlag::Sealing => AuthFlags::USE_SEALING,
            AuthFlag::Delegation => AuthFlags::USE_DELEGATION,
            AuthFlag::ServerBind => AuthFlags::SERVER_BIND,
        }
    }
}

impl FromIterator<AuthFlag> for AuthFlags {
    fn from_iter<I: IntoIterator<Item = AuthFlag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(AuthFlags::NONE, |acc, flag| acc | AuthFlags::from(flag))
    }
}

// ---------------------------------------------------------------------------
// Object creation
// ---------------------------------------------------------------------------

/// Creates the `IADsOpenDSObject` namespace object for `clsid`.
///
/// With no server, or an empty one, the class is activated locally;
/// otherwise it is activated on the named host.
#[cfg(windows)]
pub fn create_remote_object(
    server: Option<&str>,
    clsid: &Guid,
) -> PlatformResult<Box<dyn IAdsOpenDsObject>> {
    win32::create_remote_object(server, clsid)
}

/// Creates the `IADsOpenDSObject` namespace object for `clsid`.
///
/// ADSI only exists on Windows; elsewhere this always fails with
/// `E_NOTIMPL`.
#[cfg(not(windows))]
pub fn create_remote_object(
    server: Option<&str>,
    clsid: &Guid,
) -> PlatformResult<Box<dyn IAdsOpenDsObject>> {
    log::debug!("cannot create {clsid} on {server:?}: ADSI requires Windows");
    Err(PlatformError::new(
        crate::error::hresult::E_NOTIMPL,
        "Active Directory Service Interfaces are only available on Windows",
    ))
}
