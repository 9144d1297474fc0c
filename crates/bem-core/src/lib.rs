//! bem-core: shared foundation for the surface attribute engine.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + fraction/finite checks)
//! - ids (entity, component and transaction identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
