// ── Resource configuration ──
//
// Every managed collection is a parametrization of the same pattern:
// a base path, a field shape, and a filter strategy. The descriptor is
// the whole per-entity configuration; the stores and controllers are
// generic over it.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::draft::FormDraft;
use crate::error::CoreError;
use crate::filter::{FilterCriteria, value_contains};
use crate::model::EntityKey;

// ── Field specification ──────────────────────────────────────────────

/// Kind of an editable field, driving pre-network validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; required fields must be non-empty after trimming.
    Text,
    /// Percentage: a number in `[0, 100]`. Numeric strings are accepted
    /// since form inputs arrive as text.
    Percent,
}

/// One editable field of a resource.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

// ── Filter strategy ──────────────────────────────────────────────────

/// How a collection is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStrategy {
    /// `POST {base}/filter` with the criteria as the JSON body; the
    /// backend does the matching.
    ServerPost,
    /// `GET {base}` and match locally (case-insensitive substring).
    ClientSide,
}

// ── Descriptor ───────────────────────────────────────────────────────

/// Per-entity configuration consumed by the generic pattern.
#[derive(Debug)]
pub struct ResourceDescriptor {
    /// Singular noun used in notifications ("brand", "tax").
    pub name: &'static str,
    /// Collection base path, e.g. `/product-brands`.
    pub base_path: &'static str,
    /// Editable fields, in form order.
    pub fields: &'static [FieldSpec],
    pub filter: FilterStrategy,
}

impl ResourceDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a draft against the field specs. Runs synchronously
    /// before any network call; a failure never reaches the client.
    pub fn validate(&self, draft: &FormDraft) -> Result<(), CoreError> {
        for spec in self.fields {
            let value = draft.get(spec.name);

            let present = match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            };

            if !present {
                if spec.required {
                    return Err(CoreError::Validation {
                        field: spec.name.to_owned(),
                        message: "is required".to_owned(),
                    });
                }
                continue;
            }

            if spec.kind == FieldKind::Percent {
                let in_range = draft
                    .number(spec.name)
                    .is_some_and(|n| (0.0..=100.0).contains(&n));
                if !in_range {
                    return Err(CoreError::Validation {
                        field: spec.name.to_owned(),
                        message: "must be a number between 0 and 100".to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}

// ── Resource trait ───────────────────────────────────────────────────

/// A managed entity type: one record of a reference collection.
///
/// The default `matches` and `to_draft` implementations derive from the
/// descriptor and the serde representation, so concrete resources only
/// supply their descriptor and key.
pub trait Resource:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The per-entity configuration record.
    fn descriptor() -> &'static ResourceDescriptor;

    /// Unique key of this record.
    fn key(&self) -> EntityKey;

    /// Client-side filter predicate: every criterion must match its
    /// field as a case-insensitive substring. Only consulted by the
    /// [`FilterStrategy::ClientSide`] strategy.
    fn matches(&self, criteria: &FilterCriteria) -> bool {
        if criteria.is_empty() {
            return true;
        }
        let Ok(Value::Object(map)) = serde_json::to_value(self) else {
            return false;
        };
        criteria.iter().all(|(field, needle)| {
            map.get(field).is_some_and(|v| value_contains(v, needle))
        })
    }

    /// Seed a form draft from this record's current editable fields
    /// (edit mode).
    fn to_draft(&self) -> FormDraft {
        let mut draft = FormDraft::new();
        if let Ok(Value::Object(map)) = serde_json::to_value(self) {
            for spec in Self::descriptor().fields {
                if let Some(value) = map.get(spec.name) {
                    draft.set(spec.name, value.clone());
                }
            }
        }
        draft
    }
}
