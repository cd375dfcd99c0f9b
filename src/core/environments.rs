//! Environments visible to the signed-in user

use crate::core::context::RequestContext;
use crate::core::error::{Error, Result};
use crate::core::models::Environment;
use crate::core::transport::{self, Transport};

pub fn list(transport: &dyn Transport, ctx: &RequestContext) -> Result<Vec<Environment>> {
    let envs: Option<Vec<Environment>> = transport::get(transport, ctx, "/environments")?;
    Ok(envs.unwrap_or_default())
}

/// Find exactly one environment called `name`
pub fn find_by_name(
    transport: &dyn Transport,
    ctx: &RequestContext,
    name: &str,
) -> Result<Environment> {
    let mut matches: Vec<Environment> = list(transport, ctx)?
        .into_iter()
        .filter(|e| e.name == name)
        .collect();

    match matches.len() {
        0 => Err(Error::NotFound(format!(
            "No environment named \"{}\" was found. Check the spelling, or ask an \
             organization admin for access.",
            name
        ))),
        1 => Ok(matches.remove(0)),
        n => Err(Error::Validation(format!(
            "{} environments are named \"{}\"; rename one of them before associating",
            n, name
        ))),
    }
}
