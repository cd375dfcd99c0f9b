//! Service directory for the associated environment

use crate::core::context::RequestContext;
use crate::core::error::Result;
use crate::core::models::Service;
use crate::core::transport::{self, Transport};

/// All services in the associated environment
pub fn list(transport: &dyn Transport, ctx: &RequestContext) -> Result<Vec<Service>> {
    let env = ctx.require_association()?;
    let services: Option<Vec<Service>> = transport::get(
        transport,
        ctx,
        &format!("/environments/{}/services", env.environment_id),
    )?;
    Ok(services.unwrap_or_default())
}

/// Find a service by its label; `None` if no service carries it
pub fn retrieve_by_label(
    transport: &dyn Transport,
    ctx: &RequestContext,
    label: &str,
) -> Result<Option<Service>> {
    Ok(list(transport, ctx)?.into_iter().find(|s| s.label == label))
}
