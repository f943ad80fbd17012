use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::{
    default_settings_path, load_settings, CredentialStore, Credentials, Settings,
};
use crate::dns::create_provider;
use crate::reconcile::{Outcome, Reconciler};
use crate::ui::{color_enabled, Printer};

/// One invocation of the program, with every setting resolved
pub struct App {
    pub settings: Settings,
    pub printer: Printer,
    rc_path: Option<PathBuf>,
}

impl App {
    /// Resolve settings with precedence: command line, environment, settings
    /// file, built-in defaults.
    ///
    /// `login` and `logout` never read the settings, so a broken settings file
    /// only fails commands that talk to the API.
    pub fn new(cli: &Cli, command: &Commands) -> Result<Self> {
        let mut settings = match cli.config.clone().or_else(default_settings_path) {
            Some(path) => match load_settings(&path) {
                Ok(settings) => settings,
                Err(e) if !command.uses_api() => {
                    warn!(error = %format!("{:#}", e), "Ignoring settings file");
                    Settings::default()
                }
                Err(e) => return Err(e),
            },
            None => Settings::default(),
        };

        if let Some(api_url) = &cli.api_url {
            settings.api_url = api_url.clone();
        }
        if let Some(choice) = cli.color_choice() {
            settings.color = choice;
        }

        let rc_path = cli.rc_file.clone().or_else(CredentialStore::default_path);
        debug!(api_url = %settings.api_url, "Resolved settings");

        Ok(Self {
            printer: Printer::new(color_enabled(settings.color)),
            rc_path,
            settings,
        })
    }

    /// The login file, which needs either `--rc-file` or a home directory
    fn store(&self) -> Result<CredentialStore> {
        let store = self
            .rc_path
            .clone()
            .map(CredentialStore::new)
            .context("Could not determine the home directory")?;
        debug!(rc_file = %store.path().display(), "Using login file");
        Ok(store)
    }

    /// Execute a command, writing its result lines to `out`
    pub async fn run(&self, command: Commands, out: &mut impl Write) -> Result<()> {
        match command {
            Commands::Login { identity, secret } => {
                self.store()?.save(&Credentials::new(&identity, &secret))?;
                writeln!(out, "Login data saved")?;
            }

            Commands::Logout => match self.store().map(|store| store.clear()) {
                Ok(Ok(true)) => writeln!(out, "Login data deleted")?,
                Ok(Ok(false)) => writeln!(out, "No login data found")?,
                Ok(Err(e)) => {
                    warn!(error = %e, "Failed to delete login data");
                    writeln!(out, "Could not delete login data: {}", e)?;
                }
                Err(e) => {
                    warn!(error = %format!("{:#}", e), "No login file location");
                    writeln!(out, "No login data found")?;
                }
            },

            Commands::Get {
                name,
                record_type,
                json,
            } => {
                let credentials = self.store()?.load()?;
                let provider = create_provider(&credentials, &self.settings.api_url)
                    .context("Failed to create HTTP client")?;
                let outcome = Reconciler::new(provider.as_ref())
                    .get(&name, &record_type)
                    .await?;

                match &outcome {
                    Outcome::Found(record) if json => {
                        writeln!(out, "{}", self.printer.record_json(record)?)?
                    }
                    Outcome::Found(_) => writeln!(out, "{}", self.printer.outcome(&outcome))?,
                    _ => debug!(%name, %record_type, "No matching record"),
                }
            }

            Commands::Set {
                name,
                record_type,
                content,
                ttl,
            } => {
                let ttl = ttl.unwrap_or(self.settings.default_ttl);
                let credentials = self.store()?.load()?;
                let provider = create_provider(&credentials, &self.settings.api_url)
                    .context("Failed to create HTTP client")?;
                let outcome = Reconciler::new(provider.as_ref())
                    .set(&name, &record_type, &content, ttl)
                    .await?;
                debug!(changed = outcome.is_mutation(), "Set finished");

                writeln!(out, "{}", self.printer.outcome(&outcome))?;
            }

            Commands::Delete { name, record_type } => {
                let credentials = self.store()?.load()?;
                let provider = create_provider(&credentials, &self.settings.api_url)
                    .context("Failed to create HTTP client")?;
                let outcome = Reconciler::new(provider.as_ref())
                    .delete(&name, &record_type)
                    .await?;
                debug!(changed = outcome.is_mutation(), "Delete finished");

                writeln!(out, "{}", self.printer.outcome(&outcome))?;
            }
        }

        Ok(())
    }
}
