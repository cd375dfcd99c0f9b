//! `paas config` command - Settings management
//!
//! Provides commands to view and modify the settings file.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::load_settings;
use crate::cli::GlobalOpts;
use crate::core::context::RequestContext;
use crate::core::settings::SETTINGS_KEYS;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current settings values
    Show(ShowArgs),

    /// Set a settings value
    Set(SetArgs),

    /// Unset (remove) a settings value
    Unset(UnsetArgs),

    /// Show the path to the settings file
    Path,

    /// List all available settings keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Settings key (e.g., host, pod)
    pub key: String,

    /// Value to set
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Settings key to remove
    pub key: String,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let settings = load_settings(global)?;

    if let Some(key) = &args.key {
        return match settings.get_value(key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Settings file").bold().underlined());
    println!();
    for (key, _) in SETTINGS_KEYS {
        print_value(key, settings.get_value(key).as_deref());
    }
    print_value(
        "session",
        settings.session_token.as_ref().map(|_| "(signed in)"),
    );
    print_value(
        "environments",
        Some(format!("{} associated", settings.environments.len()).as_str()),
    );

    // Effective values include env var and flag overrides
    let ctx = RequestContext::resolve(&settings, &global.overrides());
    println!();
    println!("{}", style("Effective").bold().underlined());
    println!();
    print_value("url", Some(ctx.url("").as_str()));
    print_value("pod", ctx.pod.as_deref());
    print_value("timeout", Some(format!("{}s", ctx.timeout.as_secs()).as_str()));

    println!();
    println!("{}", style("Sources (in priority order):").dim());
    println!("  1. Flags (--host, --api-version, --env)");
    println!("  2. Environment variables (PAAS_HOST, PAAS_API_VERSION, PAAS_ENV, PAAS_SESSION_TOKEN)");
    println!("  3. Settings file ({})", settings.path().display());
    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let mut settings = load_settings(global)?;
    settings.set_value(&args.key, &args.value)?;
    settings.save()?;

    println!(
        "{} Set {} {} {}",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(settings.get_value(&args.key).unwrap_or_default()).yellow(),
    );
    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    let mut settings = load_settings(global)?;
    if !settings.unset_value(&args.key)? {
        return Err(miette::miette!("Key '{}' not found in settings", args.key));
    }
    settings.save()?;

    println!("{} Removed {}", style("✓").green(), style(&args.key).cyan());
    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let settings = load_settings(global)?;
    println!("{}", settings.path().display());
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available settings keys:").bold());
    println!();

    for (key, description) in SETTINGS_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'paas config set <key> <value>' to set a value.").dim()
    );
    Ok(())
}

fn print_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}
