use clap::Parser;
use survnet_cli::cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn run(command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Cuts { command } => commands::cuts::handle(command),
        Commands::Analyze {
            study,
            out,
            threads,
            release,
        } => commands::analyze::handle(study, out, threads, *release),
        Commands::Path {
            study,
            edges,
            start,
        } => commands::path::handle(study, edges, *start),
        Commands::Inspect { study } => commands::inspect::handle(study),
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {err}");
    }

    let Some(command) = &cli.command else {
        eprintln!("No command given; run with --help for usage.");
        std::process::exit(2);
    };

    if let Err(err) = run(command) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
