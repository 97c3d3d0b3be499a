use std::io::{self, Write};

use clap::Parser;
use tariffs::{CatalogFile, TariffManager, domain::DEFAULT_RANGE};
use tracing::instrument;

use super::{
    clients::write_total,
    range::{write_header, write_matches},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Print the catalog, client total, sorted catalog and a price-range query")]
pub struct Demo {
    /// Lower bound of the queried range (default: catalog range, or 200)
    #[arg(long, allow_negative_numbers = true)]
    min: Option<f64>,

    /// Upper bound of the queried range (default: catalog range, or 400)
    #[arg(long, allow_negative_numbers = true)]
    max: Option<f64>,
}

impl Demo {
    #[instrument(level = "debug", skip(catalog))]
    pub fn run(self, catalog: CatalogFile) -> anyhow::Result<()> {
        let (default_min, default_max) = catalog.range().unwrap_or(DEFAULT_RANGE);
        let min = self.min.unwrap_or(default_min);
        let max = self.max.unwrap_or(default_max);

        let mut manager = TariffManager::from_catalog(catalog);
        write_report(&mut manager, min, max, &mut io::stdout().lock())
    }
}

/// Writes the full demonstration report, sorting `manager` along the way.
fn write_report<W: Write>(
    manager: &mut TariffManager,
    min: f64,
    max: f64,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "Список тарифiв:")?;
    manager.render_tariffs(out)?;

    writeln!(out)?;
    write_total(manager, out)?;

    manager.sort_by_monthly_fee();
    writeln!(out)?;
    writeln!(out, "Вiдсортованi тарифи за абонплатою:")?;
    manager.render_tariffs(out)?;

    writeln!(out)?;
    write_header(min, max, out)?;
    let found = manager.find_tariffs_by_price_range(min, max)?;
    write_matches(&found, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tariffs::Tariff;

    use super::*;

    fn report(manager: &mut TariffManager, min: f64, max: f64) -> (String, anyhow::Result<()>) {
        let mut out = Vec::new();
        let result = write_report(manager, min, max, &mut out);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn reference_report() {
        let mut manager = TariffManager::from_catalog(CatalogFile::demo().unwrap());
        let (text, result) = report(&mut manager, 200.0, 400.0);
        result.unwrap();
        assert_eq!(
            text,
            "\
Список тарифiв:
Тариф 'Базовий' (ID: B1): 100.00 грн/мiс, 1000 клiєнтiв
Тариф 'Премiум' (ID: P1): 500.00 грн/мiс, 200 клiєнтiв
Тариф 'Сiмейний' (ID: F1): 300.00 грн/мiс, 150 клiєнтiв

Загальна кiлькiсть клiєнтiв: 1350

Вiдсортованi тарифи за абонплатою:
Тариф 'Базовий' (ID: B1): 100.00 грн/мiс, 1000 клiєнтiв
Тариф 'Сiмейний' (ID: F1): 300.00 грн/мiс, 150 клiєнтiв
Тариф 'Премiум' (ID: P1): 500.00 грн/мiс, 200 клiєнтiв

Тарифи з абонплатою у дiапазонi 200.00 - 400.00 грн:
Тариф 'Сiмейний' (ID: F1): 300.00 грн/мiс, 150 клiєнтiв
"
        );
    }

    #[test]
    fn empty_range_prints_sentinel() {
        let mut manager = TariffManager::new();
        manager.add_tariff(Tariff::premium("X".into(), "Х", 10.0, 1, false, 0).unwrap());
        let (text, result) = report(&mut manager, 20.0, 30.0);
        result.unwrap();
        assert!(text.ends_with(
            "Тарифи з абонплатою у дiапазонi 20.00 - 30.00 грн:\n\
             Тарифiв у заданому дiапазонi не знайдено\n"
        ));
    }

    #[test]
    fn invalid_range_fails_after_the_header() {
        let mut manager = TariffManager::from_catalog(CatalogFile::demo().unwrap());
        let (text, result) = report(&mut manager, 400.0, 200.0);
        assert!(result.is_err());
        assert!(text.ends_with("Тарифи з абонплатою у дiапазонi 400.00 - 200.00 грн:\n"));
    }
}
