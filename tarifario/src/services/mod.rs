//! Services
//!
//! Operations over [`AppState`](crate::core::AppState): each one loads what it
//! needs from storage, runs the pure engine and writes back.

pub mod access;
pub mod backup;
pub mod delivery;
pub mod official_quote;
pub mod quick_quote;

pub use backup::ImportSummary;
pub use delivery::{FileSink, ImportRequest, StdoutSink, TextSink};
