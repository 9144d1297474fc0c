//! Hands mutated surfaces back to the store.

use bem_core::{ComponentId, TransactionId};
use bem_model::Surface;

use crate::error::EngineResult;
use crate::store::EntityStore;

/// Writes `surfaces` under a fresh transaction id and returns what the store
/// reports back together with that id.
pub fn commit(
    store: &mut dyn EntityStore,
    component: ComponentId,
    surfaces: Vec<Surface>,
) -> EngineResult<(Vec<Surface>, TransactionId)> {
    let transaction = TransactionId::fresh(component);
    tracing::debug!(%transaction, count = surfaces.len(), "writing surfaces");
    let written = store.write(surfaces, &transaction)?;
    Ok((written, transaction))
}
