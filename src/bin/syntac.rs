//! Command-line front end for the connector catalog.
//!
//! Usage:
//!
//! ```text
//! syntac [--config <path>] list
//! syntac [--config <path>] describe <connector>
//! syntac [--config <path>] report
//! syntac [--config <path>] invoke <connector> <submodule> [--set key=value]...
//! ```
//!
//! `describe` and `invoke` print JSON. `invoke` accepts global fields and
//! submodule parameters through the same `--set` flag:
//!
//! ```text
//! syntac invoke SMB "List Shares (NetExec)" --set host=dc01 --set is_ntlm=true
//! ```
//!
//! Exit status is 2 for an unknown connector or submodule, 3 for values that
//! cannot satisfy the submodule schema, and 1 for any other failure. Set
//! `RUST_LOG` to see registration and invocation logs on stderr.

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

use syntac::config::{ConfigError, SyntacConfig};
use syntac::connector::adapters::process::global_registry;
use syntac::connector::domain::{CatalogReport, ConnectorError, ErrorKind};
use syntac::connector::services::ConnectorCatalogService;
use syntac::connectors::{BootstrapError, registry_from_config};

#[derive(Debug, Parser)]
#[command(name = "syntac", version, about = "Describe and invoke command-line tool connectors")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered connector names.
    List,
    /// Print a connector's globals and submodule fields as JSON.
    Describe {
        /// Connector name.
        name: String,
    },
    /// Print a text report of every registered connector.
    Report,
    /// Run a submodule and print the synthesized command as JSON.
    Invoke {
        /// Connector name.
        name: String,
        /// Submodule key.
        submodule: String,
        /// Field value, repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_owned(), value.to_owned()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Connector(error) => match error.kind() {
                ErrorKind::NotFound => 2,
                ErrorKind::BadRequest => 3,
                ErrorKind::Internal => 1,
            },
            Self::Config(_) | Self::Bootstrap(_) | Self::Encode(_) | Self::Io(_) => 1,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            error!(error = %failure, "syntac failed");
            ExitCode::from(failure.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = SyntacConfig::load_optional(cli.config.as_deref())?;
    let registry = global_registry(|| registry_from_config(&config))?;
    let service = ConnectorCatalogService::new(Arc::new(registry));
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::List => {
            for name in service.list()? {
                writeln!(stdout, "{name}")?;
            }
        }
        Command::Describe { name } => {
            serde_json::to_writer_pretty(&mut stdout, &service.describe(&name)?)?;
            writeln!(stdout)?;
        }
        Command::Report => {
            write!(stdout, "{}", CatalogReport(&service.describe_all()?))?;
        }
        Command::Invoke {
            name,
            submodule,
            values,
        } => {
            let field_values: BTreeMap<String, String> = values.into_iter().collect();
            let output = service.invoke(&name, &submodule, &field_values)?;
            serde_json::to_writer_pretty(&mut stdout, &output)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
