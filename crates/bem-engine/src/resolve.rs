//! Canonical surface list for a pass.

use bem_core::EntityId;
use bem_model::Surface;

use crate::error::{EngineError, EngineResult};
use crate::store::EntityStore;

/// Checks the handle list without touching the store.
pub fn require_handles(handles: &[Option<EntityId>]) -> EngineResult<Vec<EntityId>> {
    match handles.first() {
        None | Some(None) => {
            return Err(EngineError::missing(
                "at least one surface must be connected",
            ));
        }
        Some(Some(_)) => {}
    }

    handles
        .iter()
        .enumerate()
        .map(|(i, handle)| {
            handle
                .clone()
                .ok_or_else(|| EngineError::missing(format!("surface handle at position {i}")))
        })
        .collect()
}

/// Fetches the live surfaces in the order the handles were given.
pub fn resolve_surfaces(
    store: &dyn EntityStore,
    handles: &[Option<EntityId>],
) -> EngineResult<Vec<Surface>> {
    let ids = require_handles(handles)?;
    let surfaces = store.fetch(&ids)?;

    if surfaces.len() != ids.len() {
        return Err(EngineError::Internal {
            what: format!(
                "store returned {} surfaces for {} handles",
                surfaces.len(),
                ids.len()
            ),
        });
    }
    if let Some((want, got)) = ids
        .iter()
        .zip(&surfaces)
        .find(|(want, got)| **want != got.id)
    {
        return Err(EngineError::Internal {
            what: format!("store returned surface {} for handle {}", got.id, want),
        });
    }

    tracing::debug!(count = surfaces.len(), "resolved surfaces");
    Ok(surfaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_leading_null_is_missing() {
        assert!(matches!(
            require_handles(&[]),
            Err(EngineError::MissingInput { .. })
        ));
        assert!(matches!(
            require_handles(&[None, Some("a".into())]),
            Err(EngineError::MissingInput { .. })
        ));
    }

    #[test]
    fn interior_null_is_missing() {
        let err = require_handles(&[Some("a".into()), None]).unwrap_err();
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn order_is_preserved() {
        let ids = require_handles(&[Some("b".into()), Some("a".into())]).unwrap();
        assert_eq!(ids, vec![EntityId::new("b"), EntityId::new("a")]);
    }
}
