//! Catalog-level queries over a sequence of tariffs.

use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::{CatalogFile, Tariff, TariffList};

/// Errors returned by [`TariffManager`] queries.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One of the range bounds is negative (or not a number).
    #[error("Цiновий дiапазон не може бути вiд'ємним: {min} - {max}")]
    NegativeRange {
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// The lower bound exceeds the upper bound.
    #[error("Мiнiмальна цiна не може бути бiльшою за максимальну: {min} > {max}")]
    InvertedRange {
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },
}

/// Manages the tariffs offered by a mobile operator.
///
/// Tariffs are identified by strings. Identifier uniqueness is not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TariffManager {
    tariffs: TariffList<Tariff<String>>,
}

impl TariffManager {
    /// Creates a manager with no tariffs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tariffs: TariffList::new(),
        }
    }

    /// Creates a manager seeded with the tariffs of a catalog, in file order.
    #[must_use]
    pub fn from_catalog(catalog: CatalogFile) -> Self {
        Self {
            tariffs: catalog.into_tariffs().into(),
        }
    }

    /// Appends a tariff.
    #[instrument(level = "debug", skip_all, fields(id = %tariff.id()))]
    pub fn add_tariff(&mut self, tariff: Tariff<String>) {
        self.tariffs.push(tariff);
    }

    /// Returns the stored tariffs in their current order.
    #[must_use]
    pub const fn tariffs(&self) -> &TariffList<Tariff<String>> {
        &self.tariffs
    }

    /// Returns the number of stored tariffs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tariffs.len()
    }

    /// Returns `true` if no tariffs are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tariffs.is_empty()
    }

    /// Returns the number of clients across all tariffs, saturating at
    /// [`u64::MAX`].
    #[must_use]
    pub fn total_clients(&self) -> u64 {
        self.tariffs
            .iter()
            .map(Tariff::number_of_clients)
            .fold(0, u64::saturating_add)
    }

    /// Orders the tariffs by ascending monthly fee. Tariffs with equal fees
    /// keep their relative order.
    #[instrument(level = "debug", skip(self), fields(len = self.tariffs.len()))]
    pub fn sort_by_monthly_fee(&mut self) {
        self.tariffs.sort_by(Tariff::cmp_by_fee);
    }

    /// Returns the tariffs whose monthly fee lies in `[min, max]`, in their
    /// current order.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or `min > max`. The
    /// bounds are validated before any tariff is examined.
    #[instrument(level = "debug", skip(self))]
    pub fn find_tariffs_by_price_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<&Tariff<String>>, Error> {
        if min.is_nan() || max.is_nan() || min < 0.0 || max < 0.0 {
            return Err(Error::NegativeRange { min, max });
        }
        if min > max {
            return Err(Error::InvertedRange { min, max });
        }

        let found: Vec<_> = self
            .tariffs
            .iter()
            .filter(|tariff| (min..=max).contains(&tariff.monthly_fee()))
            .collect();
        debug!(found = found.len(), "price range query");
        Ok(found)
    }

    /// Writes every tariff to `out`, one per line, in current order.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn render_tariffs<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for tariff in &self.tariffs {
            writeln!(out, "{tariff}")?;
        }
        Ok(())
    }

    /// Prints every tariff to standard output, one per line.
    ///
    /// # Errors
    ///
    /// Propagates write errors from standard output.
    pub fn print_tariffs(&self) -> io::Result<()> {
        self.render_tariffs(&mut io::stdout().lock())
    }
}
