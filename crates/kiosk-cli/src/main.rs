//! Kiosk CLI - route authorization tooling for console operators
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`KIOSK_*`)
//! 3. Project config (`.kiosk/config.toml` under `-C`, or the current directory)
//! 4. Global config (`~/.kiosk/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success, or `check` allowed the navigation |
//! | 1 | Error (bad config, unreadable roles file, `--strict` violations) |
//! | 2 | `check` denied the navigation |

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kiosk_runtime::config::{ConfigLoader, ConfigResolver, KioskConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Kiosk CLI - route authorization tooling
#[derive(Parser, Debug)]
#[command(name = "kiosk")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every recognized permission
    Permissions,

    /// Show which station links a role sees
    Stations {
        /// Role id to filter for
        #[arg(long)]
        role: Option<String>,

        /// Roles file used to detect wildcard roles (also: KIOSK_ROLES_FILE)
        #[arg(long)]
        roles: Option<PathBuf>,
    },

    /// Load and validate a roles file
    Roles {
        /// Roles file (TOML or JSON, also: KIOSK_ROLES_FILE)
        #[arg(long)]
        roles: Option<PathBuf>,

        /// Fail on unknown permissions and duplicate ids
        #[arg(long)]
        strict: bool,
    },

    /// Dry-run one navigation and print the decision
    Check {
        /// Roles file (TOML or JSON, also: KIOSK_ROLES_FILE)
        #[arg(long)]
        roles: Option<PathBuf>,

        /// Role of the signed-in user; omit together with --user for no session
        #[arg(long)]
        role: Option<String>,

        /// Username of the signed-in user
        #[arg(long)]
        user: Option<String>,

        /// Use the marketing guard instead of the admin guard (never reads roles)
        #[arg(long, conflicts_with = "roles")]
        marketing: bool,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,

        /// Route path to check
        path: String,
    },
}

/// CLI-based configuration resolver.
///
/// Loads file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    debug: bool,
    roles_file: Option<PathBuf>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });

        let roles_file = match &args.command {
            Command::Stations { roles, .. }
            | Command::Roles { roles, .. }
            | Command::Check { roles, .. } => roles.clone(),
            Command::Permissions => None,
        };

        Self {
            project_root,
            debug: args.debug,
            roles_file,
        }
    }

    fn resolve(&self) -> Result<KioskConfig> {
        let mut config = ConfigLoader::new()
            .with_project_root(&self.project_root)
            .load()
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut KioskConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(ref path) = self.roles_file {
            config.roles.file = Some(path.clone());
        }
    }
}

/// Terminal filter: --debug > --verbose > RUST_LOG env > config `logging.level`.
fn init_tracing(args: &Args, config: &KioskConfig) {
    let filter = if args.debug || config.debug {
        EnvFilter::new("debug,tokio=warn")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.resolve()?;
    init_tracing(&args, &config);

    tracing::info!(path = %resolver.project_root.display(), "project root");

    match args.command {
        Command::Permissions => commands::permissions(),
        Command::Stations { role, .. } => commands::stations(&config, role.as_deref()).await,
        Command::Roles { strict, .. } => commands::roles(&config, strict).await,
        Command::Check {
            role,
            user,
            marketing,
            json,
            path,
            ..
        } => {
            let request = commands::CheckRequest {
                role,
                user,
                marketing,
                json,
                path,
            };
            commands::check(&config, request).await
        }
    }
}
