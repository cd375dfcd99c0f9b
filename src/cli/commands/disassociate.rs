//! `paas disassociate` - Forget an environment alias
//!
//! Only the local breadcrumb is removed. Git remotes pointing at the
//! environment are left alone.

use console::style;
use miette::Result;
use tracing::debug;

use crate::cli::helpers::load_settings;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct DisassociateArgs {
    /// Alias of the environment to disassociate
    #[arg(value_name = "ALIAS")]
    pub alias: String,
}

pub fn run(args: DisassociateArgs, global: &GlobalOpts) -> Result<()> {
    let mut settings = load_settings(global)?;

    if settings.delete_breadcrumb(&args.alias) {
        settings.save()?;
    } else {
        debug!(alias = %args.alias, "no breadcrumb to remove");
    }

    println!(
        "{} Your existing git remote *has not* been removed.\n",
        style("WARNING:").yellow().bold()
    );
    println!("Association cleared.");
    Ok(())
}
