use clap::Parser;
use miette::Result;
use paas::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    // PAAS_LOG wins over -v
    let default_filter = if global.verbose { "paas=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PAAS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Invites(cmd) => paas::cli::commands::invites::run(cmd, &global),
        Commands::Worker(cmd) => paas::cli::commands::worker::run(cmd, &global),
        Commands::Services(cmd) => paas::cli::commands::services::run(cmd, &global),
        Commands::Associate(args) => paas::cli::commands::associate::run(args, &global),
        Commands::Associated(args) => {
            paas::cli::commands::associate::run_associated(args, &global)
        }
        Commands::Disassociate(args) => paas::cli::commands::disassociate::run(args, &global),
        Commands::Logout => paas::cli::commands::logout::run(&global),
        Commands::Config(cmd) => paas::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => paas::cli::commands::completions::run(args),
    }
}
