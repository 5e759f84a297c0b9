use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::client::Auth4FlowApi;
use crate::context::RequestContext;
use crate::error::GateError;
use crate::gate::SessionPermissionGate;

/// One step in a request-handling chain.
///
/// A handler terminates the request by writing to the context's response
/// slot; otherwise control passes to the next step. Errors abort the chain
/// and surface through the hosting framework's error path.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut RequestContext) -> Result<()>;
}

/// An item supplied to [`with_session_permission`]: either a pre-built
/// handler or a permission identifier to build a gate from.
pub enum ChainItem {
    Handler(Arc<dyn Handler>),
    Permission(String),
}

impl From<&str> for ChainItem {
    fn from(permission_id: &str) -> Self {
        ChainItem::Permission(permission_id.to_string())
    }
}

impl From<String> for ChainItem {
    fn from(permission_id: String) -> Self {
        ChainItem::Permission(permission_id)
    }
}

impl From<Arc<dyn Handler>> for ChainItem {
    fn from(handler: Arc<dyn Handler>) -> Self {
        ChainItem::Handler(handler)
    }
}

impl<H: Handler + 'static> From<Arc<H>> for ChainItem {
    fn from(handler: Arc<H>) -> Self {
        ChainItem::Handler(handler)
    }
}

/// A composed pre-handler: the chain's steps in declared order.
///
/// Built once per route and reused for every request routed through it.
pub struct SessionPermissionChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl SessionPermissionChain {
    /// Run the chain against one request, stopping at the first handler
    /// that terminates the request.
    pub async fn run(&self, ctx: &mut RequestContext) -> Result<()> {
        for handler in &self.handlers {
            handler.handle(ctx).await?;
            if ctx.is_terminated() {
                break;
            }
        }
        Ok(())
    }
}

/// Compose an ordered list of permission identifiers and pre-handlers into
/// one chain.
///
/// Each permission identifier becomes a [`SessionPermissionGate`] bound to
/// the shared client; pre-built handlers are appended unchanged. Order is
/// preserved exactly as declared. Fails if no permission identifier was
/// supplied, so a route can never be registered without an enforced
/// permission. Building performs no I/O; the gates contact the
/// authorization service lazily, per request.
pub fn with_session_permission<I>(
    client: Arc<dyn Auth4FlowApi>,
    items: I,
) -> Result<SessionPermissionChain, GateError>
where
    I: IntoIterator<Item = ChainItem>,
{
    let mut handlers: Vec<Arc<dyn Handler>> = Vec::new();
    let mut permission_id: Option<String> = None;

    for item in items {
        match item {
            ChainItem::Permission(id) => {
                handlers.push(Arc::new(SessionPermissionGate::new(
                    id.clone(),
                    client.clone(),
                )));
                permission_id = Some(id);
            }
            ChainItem::Handler(handler) => handlers.push(handler),
        }
    }

    if permission_id.is_none() {
        return Err(GateError::MissingPermissionId);
    }

    Ok(SessionPermissionChain { handlers })
}
