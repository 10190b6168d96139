//! Request extractors.

mod bound_json;

pub use bound_json::BoundJson;
