//! Type-safe ID generation and management
//!
//! This module provides a generic, type-safe ID system with consistent prefixes
//! and UUID-based uniqueness guarantees. The derived `Ord` doubles as the total
//! order the match committer uses to canonicalize intent pairs.

use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe ID with a consistent prefix and UUID
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    /// The unique identifier
    uuid: Uuid,
    /// Phantom data to make each ID type unique
    _phantom: PhantomData<T>,
}

impl<T: IdType> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", T::PREFIX, self.uuid)
    }
}

/// Trait for types that can be used as ID markers
pub trait IdType: Send + Sync + 'static {
    /// The prefix for this ID type (e.g., "swap" for swap intents)
    const PREFIX: &'static str;
}

/// Errors that can occur when working with IDs
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum IdError {
    #[error("Invalid ID format: expected prefix '{expected}', got '{actual}'")]
    #[diagnostic(help("Ensure the ID starts with the correct prefix followed by an underscore"))]
    InvalidPrefix { expected: String, actual: String },

    #[error("Invalid UUID: {0}")]
    #[diagnostic(help("The UUID portion of the ID must be a valid UUID v4 format"))]
    InvalidUuid(#[from] uuid::Error),

    #[error("Invalid ID format: {0}")]
    #[diagnostic(help(
        "IDs must be in the format 'prefix_uuid' where prefix matches the expected type"
    ))]
    InvalidFormat(String),
}

impl<T: IdType> Id<T> {
    /// Create a new ID with a generated UUID
    pub fn generate() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            _phantom: PhantomData,
        }
    }

    /// Create an ID from a specific UUID (useful for tests or migrations)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _phantom: PhantomData,
        }
    }

    /// Parse an ID from a string
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let parts: Vec<&str> = s.splitn(2, '_').collect();
        if parts.len() != 2 {
            return Err(IdError::InvalidFormat(
                "ID must be in format 'prefix_uuid'".to_string(),
            ));
        }

        let [prefix, uuid_str] = [parts[0], parts[1]];

        if prefix != T::PREFIX {
            return Err(IdError::InvalidPrefix {
                expected: T::PREFIX.to_string(),
                actual: prefix.to_string(),
            });
        }

        let uuid = Uuid::parse_str(uuid_str)?;

        Ok(Self {
            uuid,
            _phantom: PhantomData,
        })
    }

    /// Get the UUID part
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Get the prefix for this ID type
    pub fn prefix(&self) -> &'static str {
        T::PREFIX
    }

    /// Create a nil/empty ID (all zeros)
    pub fn nil() -> Self {
        Self {
            uuid: Uuid::nil(),
            _phantom: PhantomData,
        }
    }

    /// Check if this is a nil/empty ID
    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<T: IdType> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", T::PREFIX, self.uuid)
    }
}

impl<T: IdType> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: IdType> From<Id<T>> for String {
    fn from(id: Id<T>) -> Self {
        id.to_string()
    }
}

impl<T: IdType> AsRef<Uuid> for Id<T> {
    fn as_ref(&self) -> &Uuid {
        &self.uuid
    }
}

impl<T: IdType> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}_{}", T::PREFIX, self.uuid()))
    }
}

impl<'de, T: IdType> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let visitor: Id<T> = Id::nil();
        deserializer.deserialize_str(visitor)
    }
}

impl<'de, T: IdType> Visitor<'de> for Id<T> {
    type Value = Id<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "A string with the format 'prefix_UUID'")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let parts: Vec<&str> = s.splitn(2, '_').collect();
        if parts.len() != 2 {
            return Err(de::Error::custom(
                "ID must be in format 'prefix_uuid'".to_string(),
            ));
        }

        let [prefix, uuid_str] = [parts[0], parts[1]];

        if prefix != T::PREFIX {
            return Err(de::Error::custom(format!(
                "ID prefix must match type ({}), but was {}",
                T::PREFIX,
                prefix
            )));
        }

        let uuid = Uuid::parse_str(uuid_str).map_err(|e| {
            de::Error::custom(format!(
                "Second component of id must be a valid UUIDv4, but got error {}",
                e
            ))
        })?;

        Ok(Self {
            uuid,
            _phantom: PhantomData,
        })
    }
}

impl<T: IdType> JsonSchema for Id<T> {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Owned(format!("{}Id", T::PREFIX))
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        // Serializes as a plain string
        String::json_schema(generator)
    }
}

/// Macro to define new ID types with minimal boilerplate
#[macro_export]
macro_rules! define_id_type {
    ($type_name:ident, $prefix:expr) => {
        /// Marker type for the ID
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
        pub struct $type_name;

        impl $crate::id::IdType for $type_name {
            const PREFIX: &'static str = $prefix;
        }
    };
}

define_id_type!(SwapIdType, "swap");
define_id_type!(UserIdType, "user");

/// Type alias for swap-intent IDs
pub type SwapId = Id<SwapIdType>;

/// Type alias for user IDs
pub type UserId = Id<UserIdType>;
