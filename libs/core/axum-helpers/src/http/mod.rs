//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - JSON `Content-Type` guard for body-carrying requests
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_from_env, require_json_content_type, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(require_json_content_type))
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_layer_from_env()?);
//! ```

pub mod content_type;
pub mod cors;
pub mod security;

pub use content_type::require_json_content_type;
pub use cors::{
    CORS_ALLOWED_ORIGIN, CorsConfigError, cors_layer_from_env, create_cors_layer,
    create_permissive_cors_layer,
};
pub use security::security_headers;
