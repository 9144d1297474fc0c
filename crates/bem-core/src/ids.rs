use core::fmt;
use uuid::Uuid;

/// Stable identifier of a surface entity inside the entity store.
///
/// Generated ids are the last group of a v4 uuid, which keeps names such as
/// `PVgenerator0 3f2a9c1d7e44` readable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().to_string();
        let tail = uuid.rsplit('-').next().unwrap_or(&uuid).to_string();
        Self(tail)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Stable identity of one pass site (one configured engine instance).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag attached to one store write: the component id followed by a fresh
/// random uuid, so repeated passes from the same site never collide.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TransactionId(String);

impl TransactionId {
    pub fn fresh(component: ComponentId) -> Self {
        Self(format!("{}{}", component, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_entity_id_is_uuid_tail() {
        let id = EntityId::generate();
        assert_eq!(id.as_str().len(), 12);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn transactions_share_component_prefix_but_differ() {
        let component = ComponentId::new();
        let a = TransactionId::fresh(component);
        let b = TransactionId::fresh(component);
        let prefix = component.to_string();
        assert!(a.as_str().starts_with(&prefix));
        assert!(b.as_str().starts_with(&prefix));
        assert_ne!(a, b);
    }
}
