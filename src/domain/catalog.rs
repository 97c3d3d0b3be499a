use std::path::Path;

use serde::Deserialize;

use super::tariff::{self, Tariff};

/// A catalog of seed tariffs loaded from a TOML file.
///
/// ```toml
/// _version = "1"
///
/// [range]
/// min = 200.0
/// max = 400.0
///
/// [[tariffs]]
/// kind = "family"
/// id = "F1"
/// name = "Сiмейний"
/// monthly_fee = 300.0
/// clients = 150
/// number_of_lines = 4
/// per_line_cost = 50.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Versions")]
pub struct CatalogFile {
    tariffs: Vec<Tariff<String>>,
    range: Option<(f64, f64)>,
}

/// Errors that can occur while loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Не вдалося прочитати файл каталогу: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not a valid catalog, or one of its tariffs is invalid.
    #[error("Не вдалося розiбрати файл каталогу: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CatalogFile {
    /// Creates a catalog from already validated tariffs and an optional
    /// default price range.
    #[must_use]
    pub const fn new(tariffs: Vec<Tariff<String>>, range: Option<(f64, f64)>) -> Self {
        Self { tariffs, range }
    }

    /// Loads a catalog from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the TOML content is
    /// malformed, or if any tariff fails validation.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = toml::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            tariffs = catalog.tariffs.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// The built-in catalog used when no file is supplied.
    ///
    /// # Errors
    ///
    /// Propagates tariff validation errors.
    pub fn demo() -> Result<Self, tariff::Error> {
        let tariffs = [
            Tariff::basic("B1".to_string(), "Базовий", 100.0, 1000, 100, 5000, 0.5),
            Tariff::premium("P1".to_string(), "Премiум", 500.0, 200, true, 1),
            Tariff::family("F1".to_string(), "Сiмейний", 300.0, 150, 4, 50.0),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(tariffs, Some(DEFAULT_RANGE)))
    }

    /// Returns the seed tariffs in file order.
    #[must_use]
    pub fn tariffs(&self) -> &[Tariff<String>] {
        &self.tariffs
    }

    /// Returns the configured default price range, if any.
    #[must_use]
    pub const fn range(&self) -> Option<(f64, f64)> {
        self.range
    }

    /// Consumes the catalog, yielding its tariffs.
    #[must_use]
    pub fn into_tariffs(self) -> Vec<Tariff<String>> {
        self.tariffs
    }
}

/// Price range queried by the demonstration when none is configured.
pub const DEFAULT_RANGE: (f64, f64) = (200.0, 400.0);

/// The serialized versions of the catalog.
/// This allows the file format to evolve independently of the domain type.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        tariffs: Vec<TariffEntry>,

        #[serde(default)]
        range: Option<RangeEntry>,
    },
}

#[derive(Debug, Deserialize)]
struct RangeEntry {
    min: f64,
    max: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Kind {
    Basic,
    Premium,
    Family,
}

/// One `[[tariffs]]` table. Fields that do not apply to the entry's kind are
/// ignored.
#[derive(Debug, Deserialize)]
struct TariffEntry {
    kind: Kind,
    id: String,
    name: String,
    monthly_fee: f64,
    #[serde(default)]
    clients: i64,

    #[serde(default)]
    included_minutes: u32,
    #[serde(default)]
    included_megabytes: u32,
    #[serde(default)]
    extra_minute_cost: f64,

    #[serde(default)]
    includes_roaming: bool,
    #[serde(default)]
    priority_support: u8,

    #[serde(default = "default_lines")]
    number_of_lines: i64,
    #[serde(default)]
    per_line_cost: f64,
}

const fn default_lines() -> i64 {
    1
}

impl TryFrom<TariffEntry> for Tariff<String> {
    type Error = tariff::Error;

    fn try_from(entry: TariffEntry) -> Result<Self, Self::Error> {
        match entry.kind {
            Kind::Basic => Self::basic(
                entry.id,
                entry.name,
                entry.monthly_fee,
                entry.clients,
                entry.included_minutes,
                entry.included_megabytes,
                entry.extra_minute_cost,
            ),
            Kind::Premium => Self::premium(
                entry.id,
                entry.name,
                entry.monthly_fee,
                entry.clients,
                entry.includes_roaming,
                entry.priority_support,
            ),
            Kind::Family => Self::family(
                entry.id,
                entry.name,
                entry.monthly_fee,
                entry.clients,
                entry.number_of_lines,
                entry.per_line_cost,
            ),
        }
    }
}

impl TryFrom<Versions> for CatalogFile {
    type Error = tariff::Error;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 { tariffs, range } => {
                let tariffs = tariffs
                    .into_iter()
                    .map(Tariff::try_from)
                    .collect::<Result<_, _>>()?;
                Ok(Self::new(
                    tariffs,
                    range.map(|RangeEntry { min, max }| (min, max)),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::tariff::Plan;

    fn write_catalog(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_reads_valid_file() {
        let file = write_catalog(
            r#"
_version = "1"

[range]
min = 50
max = 150.5

[[tariffs]]
kind = "basic"
id = "B9"
name = "Економ"
monthly_fee = 75
clients = 500
included_minutes = 50
included_megabytes = 2000
extra_minute_cost = 0.7

[[tariffs]]
kind = "premium"
id = "P9"
name = "Максимум"
monthly_fee = 650.0
includes_roaming = true

[[tariffs]]
kind = "family"
id = "F9"
name = "Родина"
monthly_fee = 250.0
clients = 30
number_of_lines = 3
per_line_cost = 40.0
"#,
        );

        let catalog = CatalogFile::load(file.path()).unwrap();

        assert_eq!(catalog.range(), Some((50.0, 150.5)));
        let ids: Vec<_> = catalog.tariffs().iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, ["B9", "P9", "F9"]);

        let basic = &catalog.tariffs()[0];
        assert_eq!(basic.monthly_fee(), 75.0);
        assert!(matches!(basic.plan(), Plan::Basic(plan) if plan.included_minutes == 50));

        let premium = &catalog.tariffs()[1];
        assert_eq!(premium.number_of_clients(), 0);
        assert_eq!(premium.total_cost(), 750.0);

        assert_eq!(catalog.tariffs()[2].total_cost(), 330.0);
    }

    #[test]
    fn empty_file_is_an_empty_catalog() {
        let catalog: CatalogFile = toml::from_str(r#"_version = "1""#).unwrap();
        assert!(catalog.tariffs().is_empty());
        assert_eq!(catalog.range(), None);
    }

    #[test]
    fn invalid_tariff_is_a_parse_error() {
        let file = write_catalog(
            r#"
_version = "1"

[[tariffs]]
kind = "basic"
id = "B1"
name = "Мiнус"
monthly_fee = -10.0
"#,
        );

        let error = CatalogFile::load(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::Parse(_)));
        assert!(error.to_string().contains("не може бути вiд'ємною"));
    }

    #[test]
    fn family_lines_are_not_validated() {
        let catalog: CatalogFile = toml::from_str(
            r#"
_version = "1"

[[tariffs]]
kind = "family"
id = "F0"
name = "Порожнiй"
monthly_fee = 300.0
number_of_lines = 0
per_line_cost = 50.0
"#,
        )
        .unwrap();
        assert_eq!(catalog.tariffs()[0].total_cost(), 250.0);
    }

    #[test]
    fn new_keeps_tariffs_in_order() {
        let tariffs = CatalogFile::demo().unwrap().into_tariffs();
        let catalog = CatalogFile::new(tariffs.clone(), None);
        assert_eq!(catalog.tariffs(), tariffs.as_slice());
        assert_eq!(catalog.range(), None);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let result: Result<CatalogFile, _> = toml::from_str(r#"_version = "2""#);
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let error = CatalogFile::load(&tmp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(error, LoadError::Read(_)));
    }

    #[test]
    fn demo_catalog_matches_the_reference_tariffs() {
        let catalog = CatalogFile::demo().unwrap();
        let costs: Vec<_> = catalog.tariffs().iter().map(Tariff::total_cost).collect();
        assert_eq!(costs, [100.0, 600.0, 450.0]);
        assert_eq!(catalog.range(), Some(DEFAULT_RANGE));
    }
}
