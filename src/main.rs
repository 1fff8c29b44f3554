// Entrypoint for the `hbd` command.
// - Keeps `main` small: set up logging, parse the command line and hand
//   off to `commands::run`.
// - Any error is printed with its causes and exits with status 1.

use clap::Parser;
use hbd_cli::cli::Cli;
use hbd_cli::commands;
use hbd_cli::error::{ClientError, CredentialsError, UsageError};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v
    let default_level = if cli.verbose { "warn,hbd=debug,hbd_cli=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = commands::run(&cli) {
        log::debug!("{:?}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn print_error(err: &anyhow::Error) {
    eprintln!("Error: {:#}", err);

    if let Some(CredentialsError::NotFound(_)) = err.downcast_ref::<CredentialsError>() {
        eprintln!();
        eprintln!("Hint: no saved token for this host. Are you sure you've logged in?");
    } else if let Some(client_err) = err.downcast_ref::<ClientError>() {
        match client_err {
            ClientError::Transport { .. } => {
                eprintln!();
                eprintln!("Hint: check --host, --port and --ssl (or HBD_HOST, HBD_PORT, HBD_SSL).");
            }
            ClientError::MissingToken => {
                eprintln!();
                eprintln!("Hint: run 'hbd auth login' first or set HBD_TOKEN.");
            }
            _ => {}
        }
    } else if err.downcast_ref::<UsageError>().is_some() {
        eprintln!();
        eprintln!("Hint: see 'hbd --help'.");
    }
}
