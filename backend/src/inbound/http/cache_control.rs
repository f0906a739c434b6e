//! Shared cache-control policies for HTTP handlers.

/// Rendered views reflect live upstream data and are never reused.
pub const NO_STORE: &str = "no-store";

/// Build the cache-control header tuple for rendered views.
#[must_use]
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
