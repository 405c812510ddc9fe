//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UserId` where a
//! `CalculationId` is expected. Identifiers are database-assigned sequential
//! integers, matching the storage schema.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around `i32` database keys.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Creates an ID from a raw database key.
            #[must_use]
            pub const fn from_raw(id: i32) -> Self {
                Self(id)
            }

            /// Returns the inner database key.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(AssetId, "Unique identifier for an asset record.");
typed_id!(IncomeId, "Unique identifier for an income record.");
typed_id!(ExpenseId, "Unique identifier for an expense record.");
typed_id!(CurrencyId, "Unique identifier for a currency entity.");
typed_id!(MadhabId, "Unique identifier for a madhab (school of jurisprudence).");
typed_id!(
    CalculationId,
    "Unique identifier for a persisted zakath calculation snapshot."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_id_roundtrip() {
        let id = UserId::from_raw(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn test_typed_id_display() {
        assert_eq!(CalculationId::from_raw(7).to_string(), "7");
    }

    #[test]
    fn test_typed_id_serde_transparent() {
        let id = MadhabId::from_raw(1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1");
        let back: MadhabId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
