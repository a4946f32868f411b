#![deny(missing_docs)]
#![doc = "Core error types, physical constants and provenance records shared by the height-height correlation crates."]

pub mod constants;
pub mod errors;
pub mod provenance;

pub use constants::{BOLTZMANN, STANDARD_GRAVITY};
pub use errors::{ErrorInfo, HhcfError};
pub use provenance::{RunProvenance, SchemaVersion};
