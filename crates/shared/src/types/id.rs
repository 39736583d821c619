//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `GroupId` where a `UserId` is expected.
//! The host system keys every record by an integer, so each ID wraps an `i64`.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw integer key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the inner integer key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user (a ledger participant).");
typed_id!(GroupId, "Unique identifier for an expense-sharing group.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(SettlementId, "Unique identifier for a settlement.");
