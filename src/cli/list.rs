use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tariffs::{CatalogFile, Tariff, TariffManager};
use tracing::instrument;

/// Command arguments for `tariffs list`.
#[derive(Debug, Parser, Default)]
#[command(about = "Print the catalog")]
pub struct List {
    /// Sort by ascending monthly fee before printing
    #[arg(long)]
    sort: bool,

    /// Output format (default: table)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A tariff together with its derived total cost, for JSON output.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    tariff: &'a Tariff<String>,
    total_cost: f64,
}

impl List {
    #[instrument(level = "debug", skip(catalog))]
    pub fn run(self, catalog: CatalogFile) -> anyhow::Result<()> {
        let mut manager = TariffManager::from_catalog(catalog);
        self.write(&mut manager, &mut io::stdout().lock())
    }

    fn write<W: Write>(&self, manager: &mut TariffManager, out: &mut W) -> anyhow::Result<()> {
        if self.sort {
            manager.sort_by_monthly_fee();
        }

        match self.output {
            OutputFormat::Table => manager.render_tariffs(out)?,
            OutputFormat::Json => {
                let rows: Vec<_> = manager
                    .tariffs()
                    .iter()
                    .map(|tariff| Row {
                        tariff,
                        total_cost: tariff.total_cost(),
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            }
        }
        Ok(())
    }
}
