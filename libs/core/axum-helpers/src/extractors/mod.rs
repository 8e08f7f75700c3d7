//! Custom extractors for Axum handlers.

pub mod params;
pub mod validated_json;

pub use params::{ApiPath, ApiQuery};
pub use validated_json::ValidatedJson;
