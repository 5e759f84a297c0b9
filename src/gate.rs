use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::chain::Handler;
use crate::client::{Auth4FlowApi, PermissionCheck, Subject};
use crate::context::{GateResponse, RequestContext};

/// Name of the cookie carrying the Forge4Flow session token
pub const SESSION_COOKIE: &str = "__forge4FlowSessionToken";

/// Single-request authorization check for one permission.
///
/// Reads the session cookie, resolves the caller's identity (at most once
/// per request, reusing what an earlier gate in the chain resolved), and
/// asks the authorization service whether that identity holds the
/// configured permission. Missing cookie ends the request with 401, a
/// denied check with 403; an authorized caller passes through untouched.
pub struct SessionPermissionGate {
    permission_id: String,
    client: Arc<dyn Auth4FlowApi>,
}

impl SessionPermissionGate {
    pub fn new(permission_id: impl Into<String>, client: Arc<dyn Auth4FlowApi>) -> Self {
        Self {
            permission_id: permission_id.into(),
            client,
        }
    }
}

#[async_trait]
impl Handler for SessionPermissionGate {
    async fn handle(&self, ctx: &mut RequestContext) -> Result<()> {
        let token = match ctx.cookie(SESSION_COOKIE).filter(|t| !t.is_empty()) {
            Some(token) => token.to_string(),
            None => {
                debug!("No session cookie present");
                ctx.respond(GateResponse::unauthorized());
                return Ok(());
            }
        };

        // An identity set by an earlier gate in this chain is trusted as-is;
        // it is not re-validated against the current token.
        let user_id = match &ctx.user_id {
            Some(user_id) => user_id.clone(),
            None => {
                let user_id = self.client.verify_session(&token).await?;
                ctx.user_id = Some(user_id.clone());
                user_id
            }
        };

        let check = PermissionCheck {
            permission_id: self.permission_id.clone(),
            subject: Subject::user(&user_id),
        };

        if !self.client.has_permission(&check).await? {
            debug!(
                user_id = %user_id,
                permission_id = %self.permission_id,
                "Permission denied"
            );
            ctx.respond(GateResponse::forbidden());
        }

        Ok(())
    }
}
