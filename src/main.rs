use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{fmt, EnvFilter};

use policy_roles::adapter::decode::decode_roles;
use policy_roles::adapter::derive::policy_from_roles;
use policy_roles::adapter::directives::DIRECTIVE_TABLE;
use policy_roles::adapter::loader::{load_catalog, load_json};
use policy_roles::adapter::{reconcile_with, ReconcileOptions, Retention};
use policy_roles::errors::AppError;
use policy_roles::settings::Settings;
use policy_roles::web;

#[derive(Parser, Debug)]
#[command(
    name = "policy-roles",
    version,
    about = "Translate administrative policy toggles into role permission grants"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a policy document to a role collection and print the resulting roles
    Reconcile {
        /// JSON policy document
        #[arg(long)]
        policy: PathBuf,
        /// JSON role collection keyed by role name
        #[arg(long)]
        roles: PathBuf,
        /// JSON permission catalog (overrides adapter.catalog_path)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Which roles to return: targeted or all (overrides adapter.retention)
        #[arg(long)]
        retain: Option<Retention>,
    },
    /// Print the policy a role collection currently expresses
    Derive {
        #[arg(long)]
        roles: PathBuf,
    },
    /// Print the directive table
    Table,
    /// Serve the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    // load settings
    let settings = Settings::load(&cli.config)?;
    tracing::debug!(?settings, "Loaded configuration");

    match cli.command {
        Command::Reconcile {
            policy,
            roles,
            catalog,
            retain,
        } => run_reconcile(&settings, &policy, &roles, catalog, retain)?,
        Command::Derive { roles } => run_derive(&roles)?,
        Command::Table => print_json(&DIRECTIVE_TABLE)?,
        Command::Serve => web::serve(settings).await?,
    }
    Ok(())
}

fn run_reconcile(
    settings: &Settings,
    policy: &std::path::Path,
    roles: &std::path::Path,
    catalog: Option<PathBuf>,
    retain: Option<Retention>,
) -> Result<(), AppError> {
    let policy = load_json(policy)?;
    let roles = load_json(roles)?;
    let catalog_path = catalog.or_else(|| settings.adapter.catalog_path.clone());
    let catalog = load_catalog(catalog_path.as_deref())?;

    let options = ReconcileOptions {
        retention: retain.unwrap_or(settings.adapter.retention),
    };
    let updated = reconcile_with(&policy, &roles, &catalog, &options);
    print_json(&updated)
}

fn run_derive(roles: &std::path::Path) -> Result<(), AppError> {
    let decoded = decode_roles(&load_json(roles)?)?;
    for rejected in &decoded.rejected {
        tracing::warn!(error = %rejected, "ignoring malformed role");
    }
    print_json(&policy_from_roles(&decoded.roles))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
