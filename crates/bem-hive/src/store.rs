//! Entity store API.

use std::collections::HashMap;

use bem_core::{EntityId, TransactionId};
use bem_engine::{EntityStore, StoreError, StoreResult};
use bem_model::Surface;
use serde::{Deserialize, Serialize};

use crate::{HiveError, HiveResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction: TransactionId,
    pub surface_ids: Vec<EntityId>,
    pub timestamp: String,
}

/// Surfaces in insertion order plus a log of every write.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    surfaces: Vec<Surface>,
    index: HashMap<EntityId, usize>,
    transactions: Vec<TransactionRecord>,
    online: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            index: HashMap::new(),
            transactions: Vec::new(),
            online: true,
        }
    }

    pub fn insert(&mut self, surface: Surface) -> HiveResult<EntityId> {
        if self.index.contains_key(&surface.id) {
            return Err(HiveError::Duplicate {
                what: "surface",
                id: surface.id.to_string(),
            });
        }
        let id = surface.id.clone();
        self.index.insert(id.clone(), self.surfaces.len());
        self.surfaces.push(surface);
        Ok(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&Surface> {
        self.index.get(id).map(|&i| &self.surfaces[i])
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.surfaces.iter().map(|s| s.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    /// Simulates losing the backing store; fetch and write fail while offline.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.online {
            Ok(())
        } else {
            Err(StoreError::Unavailable {
                message: "entity store is offline".to_string(),
            })
        }
    }
}

impl EntityStore for MemoryStore {
    fn fetch(&self, handles: &[EntityId]) -> StoreResult<Vec<Surface>> {
        self.ensure_online()?;
        handles
            .iter()
            .map(|id| {
                self.get(id).cloned().ok_or_else(|| StoreError::NotFound {
                    what: "surface",
                    handle: id.to_string(),
                })
            })
            .collect()
    }

    fn write(
        &mut self,
        surfaces: Vec<Surface>,
        transaction: &TransactionId,
    ) -> StoreResult<Vec<Surface>> {
        self.ensure_online()?;

        let mut surface_ids = Vec::with_capacity(surfaces.len());
        for surface in &surfaces {
            surface_ids.push(surface.id.clone());
            match self.index.get(&surface.id) {
                Some(&i) => self.surfaces[i] = surface.clone(),
                None => {
                    self.index.insert(surface.id.clone(), self.surfaces.len());
                    self.surfaces.push(surface.clone());
                }
            }
        }

        tracing::debug!(%transaction, count = surface_ids.len(), "surfaces written");
        self.transactions.push(TransactionRecord {
            transaction: transaction.clone(),
            surface_ids,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
        Ok(surfaces)
    }
}
