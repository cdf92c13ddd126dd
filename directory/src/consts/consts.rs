use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EntityId(pub String);

/// REST collections may hand out numeric ids, those are kept in their decimal form
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match RawEntityId::deserialize(deserializer)? {
            RawEntityId::Text(id) => id,
            RawEntityId::Signed(id) => id.to_string(),
            RawEntityId::Unsigned(id) => id.to_string(),
        };

        Ok(EntityId(id))
    }
}

impl EntityId {
    pub fn new() -> EntityId {
        EntityId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Values

/// Path of the person collection on the remote REST store
pub const PERSONS_RESOURCE: &str = "persons";
