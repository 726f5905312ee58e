//! Provides [`Guid`], the structured 128-bit identifier used for COM class and
//! interface identifiers and for directory object GUIDs.
//!
//! ADSI hands object GUIDs back as text. [`Guid::from_str`] accepts the three
//! textual forms providers produce, case-insensitively:
//!
//! ```text
//! XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX
//! XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX
//! {XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}
//! ```
//!
//! # Examples
//! ```
//! use adsi::Guid;
//!
//! let guid: Guid = "228d9a82-c302-11cf-9aa4-00aa004a5691".parse().unwrap();
//! assert_eq!(guid, adsi::api::CLSID_LDAP_NAMESPACE);
//! assert_eq!(guid.to_string(), "{228D9A82-C302-11CF-9AA4-00AA004A5691}");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Represents a globally unique identifier with the Windows field layout.
///
/// # Examples
/// ```
/// use adsi::Guid;
///
/// let guid = Guid::from_u128(0x00000000_0000_0000_c000_000000000046);
/// assert_eq!(guid.data4, [0xc0, 0, 0, 0, 0, 0, 0, 0x46]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Guid {
    /// First 32 bits.
    pub data1: u32,
    /// Next 16 bits.
    pub data2: u16,
    /// Next 16 bits.
    pub data3: u16,
    /// Final 64 bits, in textual order.
    pub data4: [u8; 8],
}

/// The text could not be parsed as a [`Guid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed GUID: {0:?}")]
pub struct ParseGuidError(String);

impl Guid {
    /// The all-zero GUID.
    pub const NIL: Guid = Guid::from_u128(0);

    /// Builds a GUID from its big-endian 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self {
            data1: (value >> 96) as u32,
            data2: (value >> 80 & 0xffff) as u16,
            data3: (value >> 64 & 0xffff) as u16,
            data4: (value as u64).to_be_bytes(),
        }
    }

    /// Returns the big-endian 128-bit value.
    ///
    /// # Examples
    /// ```
    /// use adsi::Guid;
    ///
    /// let value = 0xfd8256d0_fd15_11ce_abc4_02608c9e7553;
    /// assert_eq!(Guid::from_u128(value).to_u128(), value);
    /// ```
    pub const fn to_u128(&self) -> u128 {
        (self.data1 as u128) << 96
            | (self.data2 as u128) << 80
            | (self.data3 as u128) << 64
            | u64::from_be_bytes(self.data4) as u128
    }

    /// Reports whether every bit is zero.
    pub const fn is_nil(&self) -> bool {
        self.to_u128() == 0
    }
}

impl FromStr for Guid {
    type Err = ParseGuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Providers never hand out the URN form.
        if s.len() > 38 {
            return Err(ParseGuidError(s.to_owned()));
        }
        Uuid::try_parse(s)
            .map(Guid::from)
            .map_err(|_| ParseGuidError(s.to_owned()))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", Uuid::from(*self).braced())
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        let (data1, data2, data3, data4) = uuid.as_fields();
        Self {
            data1,
            data2,
            data3,
            data4: *data4,
        }
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Self {
        Uuid::from_fields(guid.data1, guid.data2, guid.data3, &guid.data4)
    }
}

#[cfg(windows)]
impl From<windows::core::GUID> for Guid {
    fn from(guid: windows::core::GUID) -> Self {
        Guid::from_u128(guid.to_u128())
    }
}

#[cfg(windows)]
impl From<Guid> for windows::core::GUID {
    fn from(guid: Guid) -> Self {
        windows::core::GUID::from_u128(guid.to_u128())
    }
}
