use thiserror::Error;

/// Errors raised while building a session-permission chain.
///
/// These are configuration errors: they surface synchronously at route setup
/// time, before any request is served. Runtime failures (session
/// verification, permission checks) travel as `anyhow::Error` through the
/// handler chain instead.
#[derive(Error, Debug)]
pub enum GateError {
    /// A chain was built without a single permission identifier among its
    /// items, so there is nothing to enforce.
    #[error("Permission ID is missing.")]
    MissingPermissionId,
}
