//! `paas logout` - End the current session

use console::style;
use miette::Result;

use crate::cli::helpers::Invocation;
use crate::cli::GlobalOpts;
use crate::core::auth;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let mut inv = Invocation::load(global)?;
    auth::signout(&inv.transport, &inv.ctx, &mut inv.settings)?;
    println!("{} Logged out", style("✓").green());
    Ok(())
}
