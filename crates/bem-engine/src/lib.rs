//! Attribute broadcasting, validation and consistency engine for surfaces.
//!
//! A pass runs strictly in order:
//! - resolve: fetch the canonical surface list from the entity store
//! - broadcast: reconcile every channel against the surface count
//! - validate: range and enumeration checks, before any mutation
//! - consistency: cross-field rules and library references
//! - build: reset and populate per-surface state
//! - write: hand the surfaces back under a fresh transaction id

pub mod broadcast;
pub mod build;
pub mod consistency;
pub mod engine;
pub mod error;
pub mod fields;
pub mod notice;
pub mod resolve;
pub mod store;
pub mod validate;
pub mod write;

mod pv;
mod surfaces;

pub use broadcast::{ChannelSpec, Fill, Scalar, broadcast, broadcast_required};
pub use consistency::{ACCEPTABLE_TYPE_PAIRS, AIR_WALL_CONSTRUCTION};
pub use engine::{Engine, PassOutcome};
pub use error::{EngineError, EngineResult};
pub use fields::{PvFieldSet, SurfaceFieldSet, SurfacePlan};
pub use notice::{Discard, Notice, NoticeSink, Severity};
pub use store::{
    DefinitionKind, DefinitionLibrary, EntityStore, Registration, ResourceStore, StoreError,
    StoreResult,
};
