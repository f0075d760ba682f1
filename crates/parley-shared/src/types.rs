use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Canonical identifier of a backend record.
///
/// The backend emits the identifier either as `id` or, for older
/// documents, as `_id`. Records embed this type with `#[serde(flatten)]`
/// so both spellings collapse into one field on the way in, and only `id`
/// is written on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawIds", into = "RawIds")]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for EntityId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Wire shape of the two identifier fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl TryFrom<RawIds> for EntityId {
    type Error = ModelError;

    fn try_from(raw: RawIds) -> Result<Self, Self::Error> {
        resolve_id(raw.id, raw.legacy_id).map(EntityId)
    }
}

impl From<EntityId> for RawIds {
    fn from(id: EntityId) -> Self {
        Self {
            id: Some(id.0),
            legacy_id: None,
        }
    }
}

/// Pick the identifier out of the primary and legacy fields.
///
/// A non-empty primary wins, then a non-empty legacy id. Both empty is an
/// error.
pub fn resolve_id(primary: Option<String>, legacy: Option<String>) -> Result<String, ModelError> {
    match (primary, legacy) {
        (Some(id), _) if !id.is_empty() => Ok(id),
        (_, Some(id)) if !id.is_empty() => Ok(id),
        _ => Err(ModelError::MissingId),
    }
}
