//! cstr-core: shared foundation for the CSTR workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for derived quantities)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::CoreError;
pub use numeric::*;
pub use units::*;
