//! Serde adapters for the "unset" integer conventions.
//!
//! Models keep optional integers as `Option<T>`. Terraform-style state files
//! spell "unset" as `0`, or as `-1` for fields where `0` is a meaningful
//! value. These adapters translate at the serialization boundary only:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! #[serde(default)]
//! struct Screen {
//!     #[serde(with = "junos_resources::codec::sentinel::minus_one")]
//!     ipv6_extension_header_limit: Option<u32>,
//! }
//!
//! let unset: Screen = serde_json::from_str(r#"{"ipv6_extension_header_limit": -1}"#).unwrap();
//! assert_eq!(unset.ipv6_extension_header_limit, None);
//! let zero: Screen = serde_json::from_str(r#"{"ipv6_extension_header_limit": 0}"#).unwrap();
//! assert_eq!(zero.ipv6_extension_header_limit, Some(0));
//! assert_eq!(serde_json::to_string(&Screen::default()).unwrap(), r#"{"ipv6_extension_header_limit":-1}"#);
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

fn to_option<'de, D, T>(deserializer: D, unset: i64) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if value == unset => Ok(None),
        Some(value) => T::try_from(value)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("integer {} out of range", value))),
    }
}

/// `None` ⇄ `-1`.
pub mod minus_one {
    use super::*;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Copy + Into<i64>,
    {
        serializer.serialize_i64(value.map_or(-1, Into::into))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        to_option(deserializer, -1)
    }
}

/// `None` ⇄ `0`.
pub mod zero {
    use super::*;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Copy + Into<i64>,
    {
        serializer.serialize_i64(value.map_or(0, Into::into))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        to_option(deserializer, 0)
    }
}
