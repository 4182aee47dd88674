//! Ability-set catalogues and session config loading.

pub mod catalog;
pub mod load;

pub use catalog::*;
pub use load::*;
