//! Pass entry points with injected collaborators.

use bem_core::{ComponentId, TransactionId};
use bem_model::{PvRequest, Surface, SurfaceRequest};

use crate::error::EngineResult;
use crate::notice::{self, NoticeSink};
use crate::store::{DefinitionLibrary, EntityStore, ResourceStore};
use crate::{pv, surfaces};

/// Result of a completed pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    pub surfaces: Vec<Surface>,
    pub transaction: TransactionId,
}

/// One configured pass site.
///
/// The collaborators are borrowed for the engine's lifetime; nothing is looked
/// up from global state.
pub struct Engine<'a> {
    component: ComponentId,
    pub(crate) store: &'a mut dyn EntityStore,
    pub(crate) resources: &'a dyn ResourceStore,
    pub(crate) library: &'a mut dyn DefinitionLibrary,
}

impl<'a> Engine<'a> {
    pub fn new(
        store: &'a mut dyn EntityStore,
        resources: &'a dyn ResourceStore,
        library: &'a mut dyn DefinitionLibrary,
    ) -> Self {
        Self {
            component: ComponentId::new(),
            store,
            resources,
            library,
        }
    }

    /// Keeps a caller-owned component id, e.g. one persisted with a project.
    pub fn with_component(mut self, component: ComponentId) -> Self {
        self.component = component;
        self
    }

    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// Mounts one PV generator on each requested surface.
    pub fn attach_pv_generators(
        &mut self,
        request: &PvRequest,
        sink: &mut dyn NoticeSink,
    ) -> EngineResult<PassOutcome> {
        let _span = tracing::debug_span!("attach_pv_generators", component = %self.component)
            .entered();
        let result = pv::run(self, request, sink);
        report_abort(result, sink)
    }

    /// Applies declared names, types, boundary conditions, constructions and
    /// materials to each requested surface.
    pub fn assign_surface_attributes(
        &mut self,
        request: &SurfaceRequest,
        sink: &mut dyn NoticeSink,
    ) -> EngineResult<PassOutcome> {
        let _span =
            tracing::debug_span!("assign_surface_attributes", component = %self.component)
                .entered();
        let result = surfaces::run(self, request, sink);
        report_abort(result, sink)
    }

    pub(crate) fn commit(&mut self, surfaces: Vec<Surface>) -> EngineResult<PassOutcome> {
        let (surfaces, transaction) =
            crate::write::commit(&mut *self.store, self.component, surfaces)?;
        Ok(PassOutcome {
            surfaces,
            transaction,
        })
    }
}

fn report_abort(
    result: EngineResult<PassOutcome>,
    sink: &mut dyn NoticeSink,
) -> EngineResult<PassOutcome> {
    if let Err(err) = &result {
        notice::error(sink, err.to_string());
    }
    result
}
