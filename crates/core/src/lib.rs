//! Modifier and ability deck rules. Keep this crate free of IO and platform
//! concerns.

pub mod action;
pub mod cards;
pub mod config;
pub mod content;
pub mod deck;
pub mod events;
pub mod registry;
pub mod rng;
pub mod table;

pub use action::*;
pub use cards::*;
pub use config::*;
pub use content::*;
pub use deck::*;
pub use events::*;
pub use registry::*;
pub use rng::*;
pub use table::*;
