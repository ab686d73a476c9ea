//! bioscan-core
//!
//! Pure domain types for the metabolic-health screening wizard: the
//! assessment record, measurement fields, condition selections, remote API
//! wire models, and the clinical display rules used by the result stages.
//! No I/O and no async runtime.

pub mod clinical;
pub mod error;
pub mod models;
