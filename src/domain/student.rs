//! Student domain type.
//!
//! A student record as exchanged with the page script and stored in the
//! `alumnos` table. Field names on the wire keep the names the page uses.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Maximum length of a student's name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// A student record.
///
/// Every field tolerates being absent or `null` on decode: the page sends
/// `{"matricula": "...", "nombre": null, "edad": null}` for read and delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    /// Student identifier (matricula).
    #[serde(rename = "matricula", default, deserialize_with = "null_as_default")]
    pub identifier: String,
    /// Full name, at most 20 characters.
    #[serde(rename = "nombre", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Age in years. Missing or null ages are 0.
    #[serde(rename = "edad", default, deserialize_with = "null_as_default")]
    pub age: i16,
}

impl Student {
    /// Create a new student record.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, age: i16) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            age,
        }
    }

    /// Bracketed `[identifier,name,age]` form the page script parses.
    pub fn bracketed(&self) -> String {
        format!("[{},{},{}]", self.identifier, self.name, self.age)
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.identifier, self.name, self.age)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
