use std::io::{self, Write};

use clap::Parser;
use tariffs::{CatalogFile, TariffManager};

#[derive(Debug, Parser)]
#[command(about = "Print the total number of clients")]
pub struct Clients {}

impl Clients {
    pub fn run(self, catalog: CatalogFile) -> anyhow::Result<()> {
        let manager = TariffManager::from_catalog(catalog);
        write_total(&manager, &mut io::stdout().lock())?;
        Ok(())
    }
}

/// Writes the client total line.
pub fn write_total<W: Write>(manager: &TariffManager, out: &mut W) -> io::Result<()> {
    writeln!(out, "Загальна кiлькiсть клiєнтiв: {}", manager.total_clients())
}
