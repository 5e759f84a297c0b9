//! Axum integration for session-permission chains.
//!
//! A chain is built once at router setup and attached with
//! `axum::middleware::from_fn`:
//!
//! ```ignore
//! let client: Arc<dyn Auth4FlowApi> =
//!     Arc::new(Forge4FlowClient::new(Auth4FlowConfig::from_env())?);
//! let chain = Arc::new(with_session_permission(client, [ChainItem::from("report:read")])?);
//!
//! let app = Router::new()
//!     .route("/reports", get(list_reports))
//!     .layer(middleware::from_fn(move |request: Request, next: Next| {
//!         let chain = chain.clone();
//!         async move { session_permission_middleware(chain, request, next).await }
//!     }));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header::COOKIE, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::chain::SessionPermissionChain;
use crate::context::{GateResponse, RequestContext};

/// Authenticated user information resolved by the chain.
///
/// Inserted into request extensions on pass-through so route handlers and
/// extractors can read the caller's identity.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
}

/// Run a session-permission chain as axum middleware.
///
/// Rejections from the chain become the response directly; on pass-through
/// the resolved identity is added to request extensions and the inner
/// service runs. A chain error (authorization service unreachable, invalid
/// token) is logged and surfaces as a plain 500.
pub async fn session_permission_middleware(
    chain: Arc<SessionPermissionChain>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut ctx = RequestContext::new(parse_cookies(request.headers()));

    if let Err(error) = chain.run(&mut ctx).await {
        tracing::error!(error = %error, "Session permission chain failed");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if let Some(user_id) = ctx.user_id.clone() {
        request.extensions_mut().insert(AuthUser { user_id });
    }

    match ctx.into_response() {
        Some(rejection) => rejection.into_response(),
        None => next.run(request).await,
    }
}

impl IntoResponse for GateResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Collect the request's cookies into a name/value map
fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for header in headers.get_all(COOKIE) {
        let Ok(header) = header.to_str() else {
            continue;
        };
        for pair in header.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                cookies.insert(name.to_string(), value.to_string());
            }
        }
    }
    cookies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "__forge4FlowSessionToken=abc; theme=dark".parse().unwrap(),
        );

        let cookies = parse_cookies(&headers);
        assert_eq!(
            cookies.get("__forge4FlowSessionToken").map(String::as_str),
            Some("abc")
        );
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn no_cookie_header_yields_empty_map() {
        let cookies = parse_cookies(&HeaderMap::new());
        assert!(cookies.is_empty());
    }
}
