//! Data models
//!
//! Shared by the pricing engine, the repositories and the backup document.
//! Every entity serializes in camelCase; ids are snowflake strings.

pub mod category;
pub mod configuration;
pub mod promotion;
pub mod quick_quote;
pub mod quote;
pub mod shift;
pub mod stay;

// Re-exports
pub use category::*;
pub use configuration::*;
pub use promotion::*;
pub use quick_quote::*;
pub use quote::*;
pub use shift::*;
pub use stay::*;
