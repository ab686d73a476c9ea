//! bioscan-client
//!
//! Blocking client for the BioScan screening API: login and token refresh,
//! account and profile lookups, screening creation, biomarker upload and
//! analysis runs. The HTTP layer sits behind [`transport::Transport`] so the
//! request logic can be exercised without a network.

pub mod client;
pub mod error;
pub mod flows;
pub mod transport;
