//! Storage layer for the student registry.
//!
//! Provides database access via SQLx with SQLite.

mod models;
mod repository;

pub use repository::StudentRepository;
