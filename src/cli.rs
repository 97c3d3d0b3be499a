use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

mod clients;
mod demo;
mod list;
mod range;

use anyhow::Context;
use clap::ArgAction;
use clients::Clients;
use demo::Demo;
use list::List;
use range::Range;
use tariffs::{CatalogFile, domain::LoadError, domain::tariff, manager};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML catalog to load instead of the built-in demonstration tariffs
    #[arg(short, long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let catalog = load_catalog(self.catalog.as_deref())?;
        self.command
            .unwrap_or_else(|| Command::Demo(Demo::default()))
            .run(catalog)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the catalog rendering, so logs go to stderr
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print the catalog, client total, sorted catalog and a price-range query (default)
    Demo(Demo),

    /// Print the catalog
    List(List),

    /// Print the tariffs whose monthly fee lies in a closed range
    Range(Range),

    /// Print the total number of clients
    Clients(Clients),
}

impl Command {
    fn run(self, catalog: CatalogFile) -> anyhow::Result<()> {
        match self {
            Self::Demo(command) => command.run(catalog)?,
            Self::List(command) => command.run(catalog)?,
            Self::Range(command) => command.run(catalog)?,
            Self::Clients(command) => command.run(catalog)?,
        }
        Ok(())
    }
}

#[instrument(level = "debug")]
fn load_catalog(path: Option<&Path>) -> anyhow::Result<CatalogFile> {
    match path {
        Some(path) => CatalogFile::load(path)
            .with_context(|| format!("Каталог {}", path.display())),
        None => Ok(CatalogFile::demo()?),
    }
}

/// Prints a diagnostic for a failed run to stderr and picks the exit status.
///
/// Invalid input exits with status 2, anything else with status 1.
pub fn report(error: &anyhow::Error) -> ExitCode {
    if is_invalid_input(error) {
        eprintln!("Помилка введення даних: {error:#}");
        ExitCode::from(2)
    } else {
        eprintln!("Виникла непередбачена помилка: {error:#}");
        ExitCode::FAILURE
    }
}

fn is_invalid_input(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause.is::<tariff::Error>() || cause.is::<manager::Error>() || cause.is::<LoadError>()
    })
}
