//! Opaque identifiers for catalogue records.
//!
//! Identifiers are UUIDs generated by the domain when a record is created.
//! Parsing accepts only the canonical hyphenated form so that a path segment
//! such as `abc` is rejected rather than silently coerced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error returned when an identifier string is not a canonical UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a canonical UUID")]
pub struct IdParseError;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID, typically one read back from storage.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let parsed = Uuid::try_parse(raw).map_err(|_| IdParseError)?;
                if parsed.hyphenated().to_string() != raw.to_ascii_lowercase() {
                    return Err(IdParseError);
                }
                Ok(Self(parsed))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

uuid_identifier! {
    /// Identifier of a teacher record.
    TeacherId
}

uuid_identifier! {
    /// Identifier of a course record.
    CourseId
}
