// ── Core identity type ──
//
// EntityKey unifies numeric primary keys (brands, units, roles, taxes)
// and natural string keys (settings) behind a single interface, so the
// generic controllers never care which a resource uses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier for any managed entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityKey {
    /// Backend-assigned integer identifier.
    Id(i64),
    /// Natural key (the settings collection keys on `key`).
    Key(String),
}

impl EntityKey {
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            Self::Id(_) => None,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Key(k) => write!(f, "{k}"),
        }
    }
}

impl From<i64> for EntityKey {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<String> for EntityKey {
    fn from(k: String) -> Self {
        Self::Key(k)
    }
}

impl From<&str> for EntityKey {
    fn from(k: &str) -> Self {
        Self::Key(k.to_owned())
    }
}
