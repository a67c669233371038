//! Import/export of a complex as plain serializable data.
//!
//! The snapshot surface carries no incidence records or raw ids, only the
//! vertex format, the dense attribute array, and boundary tuples.
//! Reconstruction replays the public mutation API, so an imported complex is
//! isomorphic to the source up to id relabeling.

pub mod snapshot;

pub use snapshot::ComplexSnapshot;
