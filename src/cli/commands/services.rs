//! `paas services` command - Services of the associated environment

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{print_json, wants_json, Invocation};
use crate::cli::table::Table;
use crate::cli::GlobalOpts;
use crate::core::services;

#[derive(Subcommand, Debug)]
pub enum ServicesCommands {
    /// List services with their labels and worker scale
    List,
}

pub fn run(cmd: ServicesCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ServicesCommands::List => run_list(global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let inv = Invocation::signed_in(global)?;
    let env = inv.ctx.require_association()?;

    let mut found = services::list(&inv.transport, &inv.ctx)?;
    found.sort_by(|a, b| a.label.cmp(&b.label));

    if wants_json(global) {
        return print_json(&found);
    }
    if found.is_empty() {
        println!("No services found in {}", env.name);
        return Ok(());
    }

    let mut table = Table::new(&["LABEL", "NAME", "WORKER SCALE"]);
    for svc in &found {
        table.push_row([
            svc.label.clone(),
            svc.name.clone(),
            svc.worker_scale.to_string(),
        ]);
    }
    println!("{}", table.render(global.format));
    Ok(())
}
