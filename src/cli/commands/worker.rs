//! `paas worker` command - Background worker status

use clap::Subcommand;
use console::style;
use miette::Result;
use serde_json::json;

use crate::cli::helpers::{print_json, wants_json, Invocation};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::workers::{self, WorkerListing};

#[derive(Subcommand, Debug)]
pub enum WorkerCommands {
    /// List worker targets with their scale and running jobs
    #[command(long_about = "Lists every worker target of a service with its declared scale \
        and the number of currently running worker jobs. Targets that have jobs but are \
        no longer declared are shown with a scale of 0.")]
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Label of the service (see `paas services list`)
    #[arg(value_name = "SERVICE_LABEL")]
    pub service_label: String,
}

pub fn run(cmd: WorkerCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        WorkerCommands::List(args) => run_list(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let inv = Invocation::signed_in(global)?;
    inv.ctx.require_association()?;

    let listing = workers::list(&inv.transport, &inv.ctx, &args.service_label)?;

    if wants_json(global) {
        return print_json(&listing_json(&listing));
    }

    print!("{}", render_listing(&listing, global));
    Ok(())
}

fn listing_json(listing: &WorkerListing) -> serde_json::Value {
    let service = listing.service();
    let targets = match listing {
        WorkerListing::NoWorkers { .. } => json!({}),
        WorkerListing::Summary { summary, .. } => json!(summary),
    };
    json!({
        "service": service.label,
        "worker_scale": service.worker_scale,
        "total": listing.total(),
        "targets": targets,
    })
}

/// Table plus utilization line, as printed to stdout
fn render_listing(listing: &WorkerListing, global: &GlobalOpts) -> String {
    let service = listing.service();
    let mut out = String::new();

    match listing {
        WorkerListing::NoWorkers { .. } => {
            out.push_str(&format!("No running workers found for {}\n", service.label));
        }
        WorkerListing::Summary { summary, .. } => {
            let mut table = Table::new(&["TARGET", "SCALE", "RUNNING JOBS"]);
            for (target, count) in summary.iter() {
                table.push_row([
                    target.to_string(),
                    count.scale.to_string(),
                    count.running.to_string(),
                ]);
            }
            out.push_str(&table.render(global.format));
            out.push('\n');
        }
    }

    // TSV output stays pure rows for piping
    if !global.quiet && global.format != OutputFormat::Tsv {
        out.push_str(&format!(
            "\nYou are using {} out of your available {} workers for {}\n",
            style(listing.total()).bold(),
            service.worker_scale,
            service.label
        ));
    }
    out
}
