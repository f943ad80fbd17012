use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::ColorChoice;
use crate::models::DnsRecordType;

#[derive(Parser, Debug)]
#[command(name = "cfdns")]
#[command(about = "Create, update, read and delete Cloudflare DNS records", long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Examples:
  $ cfdns login user@example.com 4c689aa3462a44a121c1f199c1081240b9be4
  $ cfdns set example.com a 1.2.3.4 120
  $ cfdns get example.com a
  $ cfdns del example.com a")]
pub struct Cli {
    /// Print the version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Force colored output
    #[arg(short = 'c', long, global = true, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(short = 'n', long, global = true)]
    pub no_color: bool,

    /// Log requests and decisions to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Login file to use instead of ~/.cfdnsrc
    #[arg(long, env = "CFDNS_RC_FILE", global = true, value_name = "PATH")]
    pub rc_file: Option<PathBuf>,

    /// Settings file to use instead of the platform config directory
    #[arg(long, env = "CFDNS_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Cloudflare API base URL
    #[arg(long, env = "CFDNS_API_URL", global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Log in to the API
    Login {
        /// Account e-mail
        #[arg(value_name = "EMAIL")]
        identity: String,

        /// Global API key
        #[arg(value_name = "KEY")]
        secret: String,
    },

    /// Log out from the API
    Logout,

    /// Retrieve a DNS record
    Get {
        /// Record name (e.g., www.example.com)
        name: String,

        /// Record type (A, AAAA, CNAME, TXT, MX, ...)
        #[arg(value_name = "TYPE")]
        record_type: DnsRecordType,

        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create or update a DNS record
    #[command(visible_alias = "update", alias = "add")]
    Set {
        /// Record name (e.g., www.example.com)
        name: String,

        /// Record type (A, AAAA, CNAME, TXT, MX, ...)
        #[arg(value_name = "TYPE")]
        record_type: DnsRecordType,

        /// Record content (IP address, hostname, or text)
        #[arg(value_name = "VALUE")]
        content: String,

        /// TTL in seconds (default: 120)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        ttl: Option<u32>,
    },

    /// Delete a DNS record
    #[command(visible_alias = "del")]
    Delete {
        /// Record name (e.g., www.example.com)
        name: String,

        /// Record type (A, AAAA, CNAME, TXT, MX, ...)
        #[arg(value_name = "TYPE")]
        record_type: DnsRecordType,
    },
}

impl Commands {
    /// Whether the command talks to the DNS API. Login and logout only touch
    /// the login file.
    pub fn uses_api(&self) -> bool {
        !matches!(self, Commands::Login { .. } | Commands::Logout)
    }
}

/// What the process should do after argument parsing
#[derive(Debug)]
pub enum Invocation {
    Run(Cli, Commands),
    /// Print the given text and exit successfully
    Usage(String),
    Version,
}

impl Cli {
    /// Color preference given on the command line, if any
    pub fn color_choice(&self) -> Option<ColorChoice> {
        if self.no_color {
            Some(ColorChoice::Never)
        } else if self.color {
            Some(ColorChoice::Always)
        } else {
            None
        }
    }
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Parse the command line. Unknown commands and wrong argument counts fall
/// back to printing usage, as does `-h`.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) if cli.version => Invocation::Version,
        Ok(mut cli) => match cli.command.take() {
            Some(command) => Invocation::Run(cli, command),
            None => Invocation::Usage(usage()),
        },
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Invocation::Usage(e.render().to_string())
            }
            ErrorKind::DisplayVersion => Invocation::Version,
            _ => Invocation::Usage(usage()),
        },
    }
}
