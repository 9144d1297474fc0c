//! bem-hive: in-memory entity store, resource store and definition library.

pub mod library;
pub mod resources;
pub mod store;

pub use library::MemoryLibrary;
pub use resources::MemoryResources;
pub use store::{MemoryStore, TransactionRecord};

use bem_core::EntityId;
use bem_engine::{DefinitionKind, DefinitionLibrary, Engine};
use bem_model::Scene;

pub type HiveResult<T> = Result<T, HiveError>;

#[derive(thiserror::Error, Debug)]
pub enum HiveError {
    #[error("Duplicate {what}: {id}")]
    Duplicate { what: &'static str, id: String },

    #[error("Could not register {kind} definition: {definition}")]
    Registration { kind: &'static str, definition: String },
}

/// The three collaborators a pass needs, kept side by side so an engine can
/// borrow them at once.
#[derive(Debug, Clone)]
pub struct Hive {
    pub store: MemoryStore,
    pub resources: MemoryResources,
    pub library: MemoryLibrary,
}

impl Hive {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            resources: MemoryResources::new(),
            library: MemoryLibrary::with_defaults(),
        }
    }

    /// Seeds a hive from a scene. Faces without an id or name get generated ones.
    pub fn from_scene(scene: Scene) -> HiveResult<Self> {
        let mut hive = Self::new();

        for def in scene.surfaces {
            let surface = def.into_surface(EntityId::generate(), generated_name());
            hive.store.insert(surface)?;
        }
        for inverter in scene.inverters {
            hive.resources.insert(inverter)?;
        }
        for definition in &scene.constructions {
            register(&mut hive.library, DefinitionKind::Construction, definition)?;
        }
        for definition in &scene.materials {
            register(&mut hive.library, DefinitionKind::Material, definition)?;
        }

        tracing::debug!(
            surfaces = hive.store.len(),
            inverters = hive.resources.len(),
            "seeded hive from scene"
        );
        Ok(hive)
    }

    pub fn engine(&mut self) -> Engine<'_> {
        Engine::new(&mut self.store, &self.resources, &mut self.library)
    }
}

impl Default for Hive {
    fn default() -> Self {
        Self::new()
    }
}

fn register(
    library: &mut MemoryLibrary,
    kind: DefinitionKind,
    definition: &str,
) -> HiveResult<()> {
    let registration = library.register(kind, definition, true);
    if !registration.added {
        return Err(HiveError::Registration {
            kind: kind.library_name(),
            definition: definition.to_string(),
        });
    }
    Ok(())
}

/// Random surface name: the first four groups of a v4 uuid, joined.
fn generated_name() -> String {
    let uuid = uuid::Uuid::new_v4().to_string();
    let groups: Vec<&str> = uuid.split('-').collect();
    groups[..groups.len() - 1].concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_drop_the_last_group() {
        let name = generated_name();
        assert_eq!(name.len(), 20);
        assert!(!name.contains('-'));
    }
}
