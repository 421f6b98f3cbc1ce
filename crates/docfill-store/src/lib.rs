//! docfill-store
//!
//! Black-box file and document services behind trait seams: the minimal
//! copy / replace / save / export / write / list / trash surface the
//! export pipeline needs, with an in-memory backend for tests and a
//! local-filesystem backend for running without the managed platform.

pub mod document;
pub mod error;
pub mod file;
pub mod fs;
pub mod memory;
mod pdf;
