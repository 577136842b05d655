//! # Sluice Utils
//!
//! Shared value types, NBT helpers and logging setup used by the other sluice crates.

pub mod direction;
pub mod logger;
pub mod nbt;
pub mod types;

pub use direction::Direction;
pub use types::{Identifier, IdentifierError};
