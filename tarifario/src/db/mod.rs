//! Database Module
//!
//! Key-value storage backends and the repositories built on them

pub mod repository;
pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, Storage};
