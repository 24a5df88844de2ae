//! Method guard for the CRUD endpoints.
//!
//! Each CRUD endpoint answers exactly one HTTP method. Any other method sends
//! the browser back to the listing page instead of producing an error, so a
//! user who types an endpoint URL into the address bar lands on `/`.

use axum::http::Method;

/// Path wrong-method requests are redirected to.
pub const REDIRECT_TARGET: &str = "/";

/// Outcome of checking a request's method against an endpoint's method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodGuard {
    /// The method matches; the handler may decode the body.
    Proceed,
    /// The method does not match; respond with a redirect and stop.
    RedirectTo(&'static str),
}

/// Check `actual` against the single method an endpoint accepts.
pub fn check_method(actual: &Method, expected: &Method) -> MethodGuard {
    if actual == expected {
        MethodGuard::Proceed
    } else {
        MethodGuard::RedirectTo(REDIRECT_TARGET)
    }
}
