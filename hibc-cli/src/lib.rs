//! Library entry for hibc-cli used by integration tests and embedding.

pub mod commands;

pub use commands::*;
