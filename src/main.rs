use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod cli;
mod config;
mod dns;
mod models;
mod reconcile;
mod ui;

use app::App;
use cli::Invocation;
use config::ColorChoice;
use ui::{color_enabled, Printer};

#[tokio::main]
async fn main() -> ExitCode {
    // Panic reports only; regular errors are printed as one line below
    color_eyre::install().ok();

    let (cli, command) = match cli::parse_args(std::env::args_os()) {
        Invocation::Run(cli, command) => (cli, command),
        Invocation::Usage(text) => {
            println!("{}", text.trim_end());
            return ExitCode::SUCCESS;
        }
        Invocation::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
    };

    init_tracing(cli.verbose);

    let app = match App::new(&cli, &command) {
        Ok(app) => app,
        Err(e) => {
            let printer = Printer::new(color_enabled(cli.color_choice().unwrap_or(ColorChoice::Auto)));
            return exit_with(Err(failure(&printer, &e)));
        }
    };

    let result = app.run(command, &mut io::stdout()).await;
    exit_with(result.map_err(|e| failure(&app.printer, &e)))
}

/// The error line for stdout and the process status for a failed run
fn failure(printer: &Printer, error: &anyhow::Error) -> (String, u8) {
    tracing::debug!(error = ?error, "Command failed");
    (printer.error(&format!("{:#}", error)), 1)
}

fn exit_with(result: Result<(), (String, u8)>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err((line, status)) => {
            println!("{}", line);
            ExitCode::from(status)
        }
    }
}

/// Logs go to stderr so stdout carries only results. `CFDNS_LOG` takes an
/// `EnvFilter` directive and overrides `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,cfdns=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CFDNS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_prints_full_error_chain() {
        let printer = Printer::new(false);
        let error = anyhow::anyhow!("connection refused").context("Failed to create HTTP client");

        let (line, status) = failure(&printer, &error);

        assert_eq!(line, "Error: Failed to create HTTP client: connection refused");
        assert_eq!(status, 1);
    }

    #[test]
    fn test_credential_error_line() {
        let printer = Printer::new(false);
        let error = anyhow::Error::new(config::credentials::CredentialError::NotFound);

        let (line, status) = failure(&printer, &error);

        assert_eq!(line, "Error: Login data not found, please log in first.");
        assert_eq!(status, 1);
    }
}
