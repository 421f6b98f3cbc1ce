//! docfill-core
//!
//! Pure domain logic: filename hygiene, placeholder mapping, the record
//! model, and per-invocation configuration. No service dependencies —
//! this is the shared vocabulary of the docfill pipeline.

pub mod error;
pub mod filename;
pub mod invocation;
pub mod placeholders;
pub mod record;
