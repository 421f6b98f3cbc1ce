//! docfill-export
//!
//! The PDF export orchestrator: locate a record, copy the template under a
//! unique working name, substitute placeholders, export the PDF under a
//! unique final name, then the optional link-back and cleanup steps.

pub mod error;
pub mod naming;
pub mod pipeline;
