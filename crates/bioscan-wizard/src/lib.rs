//! bioscan-wizard
//!
//! The assessment wizard: an explicit step model, the step registry that
//! describes what each step shows, a pure reducer over wizard actions, the
//! store that owns the state, and the async pieces around it (the timed
//! analysis sequence, collaborator ports and the session driver).

pub mod analyzing;
pub mod error;
pub mod flow;
pub mod ports;
pub mod registry;
pub mod session;
pub mod step;
pub mod store;
