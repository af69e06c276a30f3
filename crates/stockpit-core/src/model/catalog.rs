// ── Managed reference collections ──
//
// Each entity is a thin parametrization of the generic pattern: a serde
// shape, a key, and a static descriptor. Brands, units, and roles are
// filtered server-side; taxes and settings are fetched whole and
// filtered client-side.

use serde::{Deserialize, Serialize};

use super::key::EntityKey;
use crate::resource::{FieldKind, FieldSpec, FilterStrategy, Resource, ResourceDescriptor};

// ── Brand ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

static BRAND: ResourceDescriptor = ResourceDescriptor {
    name: "brand",
    base_path: "/product-brands",
    fields: &[FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        required: true,
    }],
    filter: FilterStrategy::ServerPost,
};

impl Resource for Brand {
    fn descriptor() -> &'static ResourceDescriptor {
        &BRAND
    }

    fn key(&self) -> EntityKey {
        EntityKey::Id(self.id)
    }
}

// ── Unit ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

static UNIT: ResourceDescriptor = ResourceDescriptor {
    name: "unit",
    base_path: "/units",
    fields: &[FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        required: true,
    }],
    filter: FilterStrategy::ServerPost,
};

impl Resource for Unit {
    fn descriptor() -> &'static ResourceDescriptor {
        &UNIT
    }

    fn key(&self) -> EntityKey {
        EntityKey::Id(self.id)
    }
}

// ── Role ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

static ROLE: ResourceDescriptor = ResourceDescriptor {
    name: "role",
    base_path: "/roles",
    fields: &[FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        required: true,
    }],
    filter: FilterStrategy::ServerPost,
};

impl Resource for Role {
    fn descriptor() -> &'static ResourceDescriptor {
        &ROLE
    }

    fn key(&self) -> EntityKey {
        EntityKey::Id(self.id)
    }
}

// ── Tax ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    pub id: i64,
    pub name: String,
    pub rate: f64,
}

static TAX: ResourceDescriptor = ResourceDescriptor {
    name: "tax",
    base_path: "/taxes",
    fields: &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "rate",
            kind: FieldKind::Percent,
            required: true,
        },
    ],
    filter: FilterStrategy::ClientSide,
};

impl Resource for Tax {
    fn descriptor() -> &'static ResourceDescriptor {
        &TAX
    }

    fn key(&self) -> EntityKey {
        EntityKey::Id(self.id)
    }
}

// ── Setting ──────────────────────────────────────────────────────────

/// Settings key on a natural string key instead of a numeric id, and
/// additionally support bulk replacement (`PUT /settings` with an array
/// of records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

static SETTING: ResourceDescriptor = ResourceDescriptor {
    name: "setting",
    base_path: "/settings",
    fields: &[
        FieldSpec {
            name: "key",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "value",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "description",
            kind: FieldKind::Text,
            required: false,
        },
    ],
    filter: FilterStrategy::ClientSide,
};

impl Resource for Setting {
    fn descriptor() -> &'static ResourceDescriptor {
        &SETTING
    }

    fn key(&self) -> EntityKey {
        EntityKey::Key(self.key.clone())
    }
}
