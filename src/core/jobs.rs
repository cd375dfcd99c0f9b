//! Job directory

use crate::core::context::RequestContext;
use crate::core::error::Result;
use crate::core::models::Job;
use crate::core::transport::{self, Transport};

/// Jobs of `job_type` for a service, one page at a time
pub fn retrieve_by_type(
    transport: &dyn Transport,
    ctx: &RequestContext,
    service_id: &str,
    job_type: &str,
    page: u32,
    page_size: u32,
) -> Result<Vec<Job>> {
    let env = ctx.require_association()?;
    let path = format!(
        "/environments/{}/services/{}/jobs?type={}&page={}&pageSize={}",
        env.environment_id, service_id, job_type, page, page_size
    );
    let jobs: Option<Vec<Job>> = transport::get(transport, ctx, &path)?;
    Ok(jobs.unwrap_or_default())
}
