//! Text and document renderers
//!
//! - `quick`: single-category WhatsApp quote
//! - `comparison`: several categories side by side
//! - `official`: structured official quote with template blocks
//! - `price_table`: season price table grouped by unit sets
//! - `charging`: EV charging receipt
//! - `shifts`: night shift rotation

pub mod builder;
pub mod charging;
pub mod comparison;
pub mod official;
pub mod placeholders;
pub mod price_table;
pub mod promo;
pub mod quick;
pub mod shifts;

pub use builder::{SEPARATOR, TextBuilder};
pub use charging::render_charging_message;
pub use comparison::render_comparison;
pub use official::{OfficialQuoteDocument, render_official_quote};
pub use placeholders::{Placeholders, substitute};
pub use price_table::{PriceTable, build_price_table};
pub use promo::render_promotion_block;
pub use quick::{QuickQuoteInput, render_quick_quote};
pub use shifts::{Rotation, ShiftDay, build_rotation, render_rotation_text};
