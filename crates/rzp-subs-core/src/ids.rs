//! Identifier types for rzp-subs.
//!
//! Store-side identifiers (orders, products) are numeric post ids. Gateway-side
//! identifiers (plans, subscriptions, customers) are opaque strings such as
//! `plan_00000000000001`.
//!
//! # Macro-based ID Types
//!
//! The `store_id_type!` and `gateway_id_type!` macros keep parsing, display and
//! serde behaviour identical across identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Define a numeric store identifier.
///
/// Generates a `Copy` newtype over `u64` with:
/// - `FromStr`, `Display`, `Debug`
/// - transparent serde (serialized as a JSON number)
/// - `From<u64>`
/// - `to_be_bytes` for ordered storage keys
macro_rules! store_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create a new identifier from its raw value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the raw value.
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// Big-endian bytes of the identifier (8 bytes).
            #[must_use]
            pub const fn to_be_bytes(&self) -> [u8; 8] {
                self.0.to_be_bytes()
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidNumber(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

/// Define a gateway identifier wrapping a non-empty string.
macro_rules! gateway_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(IdError::Empty(stringify!($name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

store_id_type!(OrderId, "A store order identifier.");
store_id_type!(ProductId, "A store product identifier.\n\nPlan metadata is kept per product.");

gateway_id_type!(PlanId, "A gateway plan identifier (`plan_...`).");
gateway_id_type!(SubscriptionId, "A gateway subscription identifier (`sub_...`).");
gateway_id_type!(CustomerId, "A gateway customer identifier (`cust_...`).");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a non-negative integer.
    #[error("invalid numeric identifier: {0:?}")]
    InvalidNumber(String),

    /// The input is empty.
    #[error("empty {0}")]
    Empty(&'static str),
}
