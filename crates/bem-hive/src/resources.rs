//! Shared resources (inverters) by handle.

use std::collections::HashMap;
use std::sync::Arc;

use bem_engine::{ResourceStore, StoreError, StoreResult};
use bem_model::Inverter;

use crate::{HiveError, HiveResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    inverters: HashMap<String, Arc<Inverter>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, inverter: Inverter) -> HiveResult<Arc<Inverter>> {
        if self.inverters.contains_key(&inverter.handle) {
            return Err(HiveError::Duplicate {
                what: "inverter",
                id: inverter.handle,
            });
        }
        let shared = Arc::new(inverter);
        self.inverters
            .insert(shared.handle.clone(), Arc::clone(&shared));
        Ok(shared)
    }

    pub fn len(&self) -> usize {
        self.inverters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inverters.is_empty()
    }
}

impl ResourceStore for MemoryResources {
    fn inverter(&self, handle: &str) -> StoreResult<Arc<Inverter>> {
        self.inverters
            .get(handle)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                what: "inverter",
                handle: handle.to_string(),
            })
    }
}
