// Forge4Flow session-permission gate
//
// Request-gating middleware for axum servers backed by a Forge4Flow
// authorization service. A route declares the permissions it requires
// (optionally interleaved with other pre-handlers); the composed chain runs
// before the route handler, resolving the caller's identity from the
// session cookie and rejecting the request with 401/403 when the caller is
// unauthenticated or unauthorized.

pub mod chain;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod middleware;

pub use chain::{with_session_permission, ChainItem, Handler, SessionPermissionChain};
pub use client::{Auth4FlowApi, Forge4FlowClient, PermissionCheck, Subject};
pub use config::Auth4FlowConfig;
pub use context::{GateResponse, RequestContext};
pub use error::GateError;
pub use gate::{SessionPermissionGate, SESSION_COOKIE};
pub use middleware::{session_permission_middleware, AuthUser};
