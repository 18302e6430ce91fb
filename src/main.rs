use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use pwm::cli::{commands, output, Cli};
use pwm::config::Settings;

fn main() {
    // RUST_LOG=pwm=debug for verbose output. Keys and passwords are never logged.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pwm=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> pwm::errors::Result<()> {
    let settings = match std::env::current_dir() {
        Ok(cwd) => Settings::load(&cwd)?,
        Err(_) => Settings::default(),
    };

    if let Some(ref keyword) = cli.search {
        return commands::search::execute(cli, &settings, keyword);
    }

    if let Some(id) = cli.remove {
        return commands::remove::execute(cli, &settings, id);
    }

    match (cli.domain.as_deref(), cli.account.as_deref()) {
        (Some(domain), Some(account)) if !domain.is_empty() && !account.is_empty() => {
            commands::generate::execute(cli, &settings, domain, account)
        }
        _ => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
