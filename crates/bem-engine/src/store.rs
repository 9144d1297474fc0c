//! Collaborator interfaces injected into the engine.

use std::collections::BTreeSet;
use std::sync::Arc;

use bem_core::{EntityId, TransactionId};
use bem_model::{Inverter, Surface};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{what} not found: {handle}")]
    NotFound { what: &'static str, handle: String },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

/// Owner of surfaces between passes.
///
/// `fetch` hands out copies in the requested order; changes only reach the
/// store through `write`.
pub trait EntityStore {
    fn fetch(&self, handles: &[EntityId]) -> StoreResult<Vec<Surface>>;

    fn write(
        &mut self,
        surfaces: Vec<Surface>,
        transaction: &TransactionId,
    ) -> StoreResult<Vec<Surface>>;
}

/// Read-only access to shared resources.
pub trait ResourceStore {
    fn inverter(&self, handle: &str) -> StoreResult<Arc<Inverter>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Construction,
    Material,
}

impl DefinitionKind {
    pub fn library_name(self) -> &'static str {
        match self {
            DefinitionKind::Construction => "construction",
            DefinitionKind::Material => "material",
        }
    }
}

/// Outcome of an upsert; `name` is the canonical name parsed from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub added: bool,
    pub name: String,
}

/// Named construction and material definitions.
pub trait DefinitionLibrary {
    fn exists(&self, kind: DefinitionKind, name: &str) -> bool;

    /// Name a full definition would be registered under, or `None` when it
    /// does not parse. Leaves the library unchanged.
    fn canonical_name(&self, kind: DefinitionKind, definition: &str) -> Option<String>;

    fn register(&mut self, kind: DefinitionKind, definition: &str, overwrite: bool)
    -> Registration;

    fn material_names(&self) -> BTreeSet<String>;
}
