//! HTTP middleware stack for the proxy.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers
//! 5. Rate limiting (sign-in only, governor)
//!
//! Credential extractors live here too; they run per handler.

pub mod credential;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use credential::{AUTH_REQUIRED_MESSAGE, Credential, OptionalBearer, RequireBearer};
pub use rate_limit::signin_rate_limiter;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
