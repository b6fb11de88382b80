//! Identifier newtypes
//!
//! Every record kind gets its own identifier type so an objective id can never
//! be passed where a key result id is expected. Identifiers are assigned by
//! the relational store (row ids) and grow monotonically, so ordering by id is
//! ordering by creation.

use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw row id
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            /// Accepts both the bare number and the prefixed display form
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed.strip_prefix($prefix).unwrap_or(trimmed);
                digits
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", stringify!($name), s, e))
            }
        }
    };
}

row_id!(
    /// Identifier of an objective
    ObjectiveId,
    "O-"
);

row_id!(
    /// Identifier of a key result
    KeyResultId,
    "KR-"
);

row_id!(
    /// Identifier of a relation row (objective or key-result relation)
    RelationId,
    "R-"
);

row_id!(
    /// Reference to the person responsible for an objective
    OwnerId,
    "U-"
);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: display form always parses back to the same id
        #[test]
        fn test_display_roundtrip(value: i64) {
            let id = ObjectiveId::new(value);
            prop_assert_eq!(id.to_string().parse::<ObjectiveId>(), Ok(id));
        }

        /// Property: id ordering matches raw value ordering
        #[test]
        fn test_ordering_property(a: i64, b: i64) {
            prop_assert_eq!(RelationId::new(a) < RelationId::new(b), a < b);
        }
    }
}
