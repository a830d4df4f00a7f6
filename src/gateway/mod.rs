//! Boundary between callers and the local filesystem / PDF parser.
//!
//! Every operation is checked against its channel's rate window, its inputs
//! are validated, and failures come back as sanitized messages.

pub mod guards;
pub mod handlers;
pub mod rate_limiter;
pub mod sanitize;

pub use handlers::{Gateway, GatewayError, GatewayResult};
pub use rate_limiter::{Channel, RateLimiter};
