//! Domain types for the student registry.
//!
//! This module contains the student entity and identifier normalization.

mod identifier;
mod student;

pub use identifier::*;
pub use student::*;
