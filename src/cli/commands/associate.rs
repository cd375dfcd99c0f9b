//! `paas associate` / `paas associated` - Environment breadcrumbs

use console::style;
use miette::Result;

use crate::cli::helpers::{load_settings, print_json, wants_json, Invocation};
use crate::cli::table::Table;
use crate::cli::GlobalOpts;
use crate::core::{environments, AssociatedEnv};

#[derive(clap::Args, Debug)]
pub struct AssociateArgs {
    /// Name of the environment as shown in the dashboard
    #[arg(value_name = "ENV_NAME")]
    pub env_name: String,

    /// Local alias used with --env
    #[arg(value_name = "ALIAS")]
    pub alias: String,

    /// Make this the default environment
    #[arg(long, short = 'd')]
    pub default: bool,
}

#[derive(clap::Args, Debug)]
pub struct AssociatedArgs {}

pub fn run(args: AssociateArgs, global: &GlobalOpts) -> Result<()> {
    let mut inv = Invocation::signed_in(global)?;

    let env = environments::find_by_name(&inv.transport, &inv.ctx, &args.env_name)?;
    let replaced = inv
        .settings
        .environments
        .get(&args.alias)
        .map(|existing| existing.environment_id != env.id)
        .unwrap_or(false);

    inv.settings
        .add_breadcrumb(&args.alias, AssociatedEnv::from(&env), args.default);
    inv.settings.save()?;

    if replaced {
        println!(
            "{} Alias {} now points at {}",
            style("!").yellow(),
            style(&args.alias).cyan(),
            env.name
        );
    }
    println!(
        "{} Associated {} as {}",
        style("✓").green(),
        style(&env.name).bold(),
        style(&args.alias).cyan()
    );
    Ok(())
}

pub fn run_associated(_args: AssociatedArgs, global: &GlobalOpts) -> Result<()> {
    let settings = load_settings(global)?;

    if wants_json(global) {
        return print_json(&settings.environments);
    }
    if settings.environments.is_empty() {
        println!("No environments have been associated. Run \"paas associate\" to add one.");
        return Ok(());
    }

    let mut table = Table::new(&["ALIAS", "ENVIRONMENT", "ENVIRONMENT ID", "POD", "DEFAULT"]);
    for (alias, env) in &settings.environments {
        let is_default = settings.default_env.as_deref() == Some(alias.as_str());
        table.push_row([
            alias.clone(),
            env.name.clone(),
            env.environment_id.clone(),
            env.pod.clone().unwrap_or_else(|| "-".to_string()),
            if is_default { "*" } else { "" }.to_string(),
        ]);
    }
    println!("{}", table.render(global.format));
    Ok(())
}
