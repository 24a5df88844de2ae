//! HTTP layer for the student registry.
//!
//! Provides the listing page, the CRUD endpoints and static asset serving.

mod guard;
pub mod handlers;
mod page;
mod routes;
mod types;

pub use routes::build_router;
