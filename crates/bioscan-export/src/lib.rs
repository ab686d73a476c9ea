//! bioscan-export
//!
//! Medical report generation: a report context built from the assessment
//! and analysis, rendered through Tera to Markdown, then packed as DOCX and
//! handed to a share sheet.

pub mod docx;
pub mod error;
pub mod render;
pub mod report;
pub mod share;
pub mod styles;
