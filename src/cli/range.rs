use std::io::{self, Write};

use clap::Parser;
use tariffs::{CatalogFile, Tariff, TariffManager, domain::tariff::format_amount};
use tracing::instrument;

/// Printed instead of an empty result list.
pub const NOTHING_FOUND: &str = "Тарифiв у заданому дiапазонi не знайдено";

#[derive(Debug, Parser)]
#[command(about = "Print the tariffs whose monthly fee lies in a closed range")]
pub struct Range {
    /// Lower bound of the monthly fee
    #[arg(long, allow_negative_numbers = true)]
    min: f64,

    /// Upper bound of the monthly fee
    #[arg(long, allow_negative_numbers = true)]
    max: f64,
}

impl Range {
    #[instrument(level = "debug", skip(catalog))]
    pub fn run(self, catalog: CatalogFile) -> anyhow::Result<()> {
        let manager = TariffManager::from_catalog(catalog);
        self.write(&manager, &mut io::stdout().lock())
    }

    fn write<W: Write>(&self, manager: &TariffManager, out: &mut W) -> anyhow::Result<()> {
        let found = manager.find_tariffs_by_price_range(self.min, self.max)?;
        write_matches(&found, out)?;
        Ok(())
    }
}

/// Writes the header for a price-range query.
pub fn write_header<W: Write>(min: f64, max: f64, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Тарифи з абонплатою у дiапазонi {} - {} грн:",
        format_amount(min),
        format_amount(max)
    )
}

/// Writes matching tariffs one per line, or [`NOTHING_FOUND`].
pub fn write_matches<W: Write>(found: &[&Tariff<String>], out: &mut W) -> io::Result<()> {
    if found.is_empty() {
        writeln!(out, "{NOTHING_FOUND}")?;
    }
    for tariff in found {
        writeln!(out, "{tariff}")?;
    }
    Ok(())
}
