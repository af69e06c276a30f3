//! Domain model: entity keys and the built-in reference collections.

pub mod catalog;
pub mod key;

pub use catalog::{Brand, Role, Setting, Tax, Unit};
pub use key::EntityKey;
