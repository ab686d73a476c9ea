//! bioscan-host library root.
//!
//! Re-exports internal modules so that examples and integration tests
//! can exercise them directly (config, the remote analysis port, report
//! output and the scripted walkthrough) without going through `main`.

pub mod config;
pub mod output;
pub mod remote;
pub mod walkthrough;
