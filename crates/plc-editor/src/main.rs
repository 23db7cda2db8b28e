//! puavo local configuration editor — entry point.
//!
//! This binary edits the host-local configuration of a puavo-managed
//! device: local user accounts, the set of domain users allowed to log
//! in, remote administration consent, and restricted-package license
//! acceptance.  The whole configuration lives in one JSON file that is
//! validated and replaced as a unit, then handed to the system update
//! tool.
//!
//! # Usage
//!
//! ```text
//! plc-editor [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show      Print the current configuration as JSON
//!   form      Print an editable submission seeded from the current configuration
//!   check     Validate a submission without writing anything
//!   apply     Validate a submission, write the configuration, run the update tool
//!   licenses  List restricted-package licenses with acceptance and download state
//!   download  Download one restricted package
//!
//! Options:
//!   --config <PATH>        Configuration file [default: /state/etc/puavo/local/config.json]
//!   --licenses-dir <PATH>  License catalog [default: /usr/share/puavo-ltsp-client/restricted-packages]
//! ```
//!
//! # Environment variable overrides
//!
//! The CLI defaults can also be overridden with environment variables.
//! CLI args take precedence when both are present.
//!
//! | Variable             | Default                                            | Description             |
//! |----------------------|----------------------------------------------------|-------------------------|
//! | `PUAVO_LOCAL_CONFIG` | `/state/etc/puavo/local/config.json`               | Configuration file path |
//! | `PUAVO_LICENSES_DIR` | `/usr/share/puavo-ltsp-client/restricted-packages` | License catalog path    |
//!
//! # Typical editing round trip
//!
//! ```text
//! plc-editor form > form.json
//! $EDITOR form.json
//! plc-editor check --submission form.json
//! plc-editor apply --submission form.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plc_core::FormSubmission;
use plc_editor::application::licenses::{ManageLicensesUseCase, RestrictedPackageTool};
use plc_editor::application::session::{ConfigRepository, EditorSession, SystemConfigurator};
use plc_editor::application::submit::PasswordHasher;
use plc_editor::infrastructure::hasher::mkpasswd::MkpasswdHasher;
use plc_editor::infrastructure::licenses::LicenseCatalog;
use plc_editor::infrastructure::storage::ConfigStore;
use plc_editor::infrastructure::tools::local_config::SudoLocalConfig;
use plc_editor::infrastructure::tools::package_tool::PackageToolCli;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// puavo local configuration editor.
///
/// Edits the host-local configuration file: local user accounts, domain
/// login permissions, remote administration consent, and restricted-package
/// license acceptance.  Changes are validated as a whole, written
/// atomically, and applied to the system with the puavo update tool.
#[derive(Debug, Parser)]
#[command(
    name = "plc-editor",
    about = "Editor for the host-local puavo configuration",
    version
)]
struct Cli {
    /// Path of the persisted configuration file.
    #[arg(
        long,
        default_value = "/state/etc/puavo/local/config.json",
        env = "PUAVO_LOCAL_CONFIG"
    )]
    config: PathBuf,

    /// Directory holding one license descriptor sub-directory per
    /// restricted package.
    #[arg(
        long,
        default_value = "/usr/share/puavo-ltsp-client/restricted-packages",
        env = "PUAVO_LICENSES_DIR"
    )]
    licenses_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the current configuration as JSON.
    Show,

    /// Print an editable submission seeded from the current configuration.
    Form,

    /// Validate a submission without writing anything.
    Check {
        /// Path of the submission JSON; `-` reads standard input.
        #[arg(long, default_value = "-")]
        submission: String,
    },

    /// Validate a submission, write the configuration, and run the update tool.
    Apply {
        /// Path of the submission JSON; `-` reads standard input.
        #[arg(long, default_value = "-")]
        submission: String,
    },

    /// List restricted-package licenses with acceptance and download state.
    Licenses,

    /// Download one restricted package.
    Download {
        /// Package key, as shown by `licenses`.
        key: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised to format log output.  The log
///    level is controlled by the `RUST_LOG` environment variable (e.g.,
///    `RUST_LOG=debug`).
/// 2. CLI arguments are parsed with `clap` into a [`Cli`] struct.
/// 3. The concrete adapters (file store, mkpasswd hasher, sudo-wrapped
///    update tool) are created once and injected into the session behind
///    their application-layer traits.
/// 4. The selected subcommand runs; any error is reported on stderr and
///    the process exits non-zero.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, we fall back to `info` level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // ── Wiring ────────────────────────────────────────────────────────────────
    let store = Arc::new(ConfigStore::new(&cli.config));
    let session = EditorSession::new(
        Arc::clone(&store) as Arc<dyn ConfigRepository>,
        Arc::new(MkpasswdHasher) as Arc<dyn PasswordHasher>,
        Arc::new(SudoLocalConfig) as Arc<dyn SystemConfigurator>,
    );

    match cli.command {
        Commands::Show => {
            let config = session.current()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Form => {
            let form = session.seed_form()?;
            println!("{}", serde_json::to_string_pretty(&form)?);
        }

        Commands::Check { submission } => {
            let form = read_submission(&submission)?;
            session.check(&form)?;
            println!("submission is valid");
        }

        Commands::Apply { submission } => {
            let form = read_submission(&submission)?;
            let config = session.submit(&form).await?;
            info!(
                "configuration with {} local user(s) written to {}",
                config.local_users.len(),
                store.path().display()
            );
        }

        Commands::Licenses => {
            let catalog = LicenseCatalog::new(&cli.licenses_dir).scan();
            let package_tool = Arc::new(PackageToolCli) as Arc<dyn RestrictedPackageTool>;
            let rows = ManageLicensesUseCase::new(package_tool)
                .overview(catalog, &session.current()?)
                .await?;
            if rows.is_empty() {
                println!("no restricted-package licenses found");
            }
            for row in rows {
                println!(
                    "{}  accepted={}  downloaded={}  {} <{}>",
                    row.key, row.accepted, row.downloaded, row.name, row.url
                );
            }
        }

        Commands::Download { key } => {
            let package_tool = Arc::new(PackageToolCli) as Arc<dyn RestrictedPackageTool>;
            ManageLicensesUseCase::new(package_tool).download(&key).await?;
            info!("restricted package `{key}` downloaded");
        }
    }

    Ok(())
}

/// Reads a form submission from `source`: a file path, or `-` for stdin.
///
/// # Errors
///
/// Returns an error when the source cannot be read or does not contain a
/// well-formed submission.
fn read_submission(source: &str) -> anyhow::Result<FormSubmission> {
    let content = if source == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read submission file '{source}'"))?
    };
    serde_json::from_str(&content).context("failed to parse the submission JSON")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
