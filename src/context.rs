use std::collections::HashMap;

use axum::http::StatusCode;
use serde_json::{json, Value};

/// Per-request state threaded through a handler chain.
///
/// Created once per incoming request from the request's cookies, mutated by
/// each handler in order, and discarded after the response is sent. The
/// response slot doubles as the termination signal: once a handler writes a
/// response, no later handler runs.
#[derive(Debug, Default)]
pub struct RequestContext {
    /// Identity resolved from the session token, if any handler has done so.
    /// Later gates in the same chain reuse this instead of re-verifying.
    pub user_id: Option<String>,
    cookies: HashMap<String, String>,
    response: Option<GateResponse>,
}

impl RequestContext {
    pub fn new(cookies: HashMap<String, String>) -> Self {
        Self {
            user_id: None,
            cookies,
            response: None,
        }
    }

    /// Look up a cookie by name
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Terminate the request with the given response. The first write wins;
    /// the chain stops before a second handler gets the chance anyway.
    pub fn respond(&mut self, response: GateResponse) {
        if self.response.is_none() {
            self.response = Some(response);
        }
    }

    /// Whether a handler has already terminated the request
    pub fn is_terminated(&self) -> bool {
        self.response.is_some()
    }

    /// Consume the context, yielding the early response if one was written
    pub fn into_response(self) -> Option<GateResponse> {
        self.response
    }
}

/// A rejection response produced by a gate
#[derive(Debug, Clone, PartialEq)]
pub struct GateResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl GateResponse {
    /// 401 response for requests without a session cookie
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: json!({ "message": "Invalid auth cookie." }),
        }
    }

    /// 403 response for identities that lack the required permission
    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            body: json!({ "success": false, "message": "access denied" }),
        }
    }
}
