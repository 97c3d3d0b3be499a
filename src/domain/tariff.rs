use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Surcharge added to a premium tariff's total cost when roaming is included.
pub const ROAMING_SURCHARGE: f64 = 100.0;

/// Errors raised when a tariff is constructed from invalid attributes.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The monthly fee is negative (or not a number).
    #[error("Щомiсячна плата не може бути вiд'ємною: {0}")]
    NegativeFee(f64),

    /// The client count is negative.
    #[error("Кiлькiсть клiєнтiв не може бути вiд'ємною: {0}")]
    NegativeClients(i64),
}

/// Attributes of a basic tariff.
///
/// The included allowances are recorded for reference only; they never
/// influence [`Tariff::total_cost`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasicPlan {
    /// Minutes included in the monthly fee.
    pub included_minutes: u32,
    /// Megabytes included in the monthly fee.
    pub included_megabytes: u32,
    /// Price of one minute beyond the included allowance.
    pub extra_minute_cost: f64,
}

/// Attributes of a premium tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PremiumPlan {
    /// Whether roaming is part of the bundle.
    pub includes_roaming: bool,
    /// Priority support tier. Recorded, not priced.
    pub priority_support: u8,
}

/// Attributes of a family tariff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FamilyPlan {
    /// Number of lines sharing the tariff.
    pub number_of_lines: i64,
    /// Price of every line after the first.
    pub per_line_cost: f64,
}

/// The closed set of tariff variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Plan {
    /// Limited bundle priced at its monthly fee.
    Basic(BasicPlan),
    /// Unlimited bundle with optional roaming.
    Premium(PremiumPlan),
    /// Shared bundle priced per additional line.
    Family(FamilyPlan),
}

/// A mobile-telephony tariff identified by an opaque `I`.
///
/// Two tariffs are equal only when they are the same variant with identical
/// attributes, identifier included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tariff<I> {
    id: I,
    name: String,
    monthly_fee: f64,
    number_of_clients: u64,
    #[serde(flatten)]
    plan: Plan,
}

impl<I> Tariff<I> {
    /// Creates a tariff of any variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the monthly fee or client count is negative. Plan
    /// attributes are taken as given.
    pub fn new(
        id: I,
        name: impl Into<String>,
        monthly_fee: f64,
        number_of_clients: i64,
        plan: Plan,
    ) -> Result<Self, Error> {
        if monthly_fee.is_nan() || monthly_fee < 0.0 {
            return Err(Error::NegativeFee(monthly_fee));
        }
        let number_of_clients =
            u64::try_from(number_of_clients).map_err(|_| Error::NegativeClients(number_of_clients))?;

        Ok(Self {
            id,
            name: name.into(),
            monthly_fee,
            number_of_clients,
            plan,
        })
    }

    /// Creates a basic tariff.
    ///
    /// # Errors
    ///
    /// See [`Tariff::new`].
    pub fn basic(
        id: I,
        name: impl Into<String>,
        monthly_fee: f64,
        number_of_clients: i64,
        included_minutes: u32,
        included_megabytes: u32,
        extra_minute_cost: f64,
    ) -> Result<Self, Error> {
        let plan = Plan::Basic(BasicPlan {
            included_minutes,
            included_megabytes,
            extra_minute_cost,
        });
        Self::new(id, name, monthly_fee, number_of_clients, plan)
    }

    /// Creates a premium tariff.
    ///
    /// # Errors
    ///
    /// See [`Tariff::new`].
    pub fn premium(
        id: I,
        name: impl Into<String>,
        monthly_fee: f64,
        number_of_clients: i64,
        includes_roaming: bool,
        priority_support: u8,
    ) -> Result<Self, Error> {
        let plan = Plan::Premium(PremiumPlan {
            includes_roaming,
            priority_support,
        });
        Self::new(id, name, monthly_fee, number_of_clients, plan)
    }

    /// Creates a family tariff.
    ///
    /// # Errors
    ///
    /// See [`Tariff::new`].
    pub fn family(
        id: I,
        name: impl Into<String>,
        monthly_fee: f64,
        number_of_clients: i64,
        number_of_lines: i64,
        per_line_cost: f64,
    ) -> Result<Self, Error> {
        let plan = Plan::Family(FamilyPlan {
            number_of_lines,
            per_line_cost,
        });
        Self::new(id, name, monthly_fee, number_of_clients, plan)
    }

    /// Returns the tariff identifier.
    #[must_use]
    pub const fn id(&self) -> &I {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fixed monthly fee.
    #[must_use]
    pub const fn monthly_fee(&self) -> f64 {
        self.monthly_fee
    }

    /// Returns the number of subscribed clients.
    #[must_use]
    pub const fn number_of_clients(&self) -> u64 {
        self.number_of_clients
    }

    /// Returns the variant-specific attributes.
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Returns the effective monthly charge of the tariff.
    ///
    /// - basic: the monthly fee
    /// - premium: the monthly fee plus [`ROAMING_SURCHARGE`] when roaming is
    ///   included
    /// - family: the monthly fee plus `per_line_cost` for every line after the
    ///   first; with fewer than one line the extra term is negative
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_cost(&self) -> f64 {
        match self.plan {
            Plan::Basic(_) => self.monthly_fee,
            Plan::Premium(premium) => {
                let roaming = if premium.includes_roaming {
                    ROAMING_SURCHARGE
                } else {
                    0.0
                };
                self.monthly_fee + roaming
            }
            Plan::Family(family) => {
                let extra_lines = family.number_of_lines as f64 - 1.0;
                self.monthly_fee + extra_lines * family.per_line_cost
            }
        }
    }

    /// Natural ordering of tariffs: ascending by monthly fee.
    ///
    /// Equality compares every attribute while this ordering looks at the fee
    /// only, so it is not exposed as [`PartialOrd`].
    #[must_use]
    pub fn cmp_by_fee(&self, other: &Self) -> Ordering {
        self.monthly_fee.total_cmp(&other.monthly_fee)
    }
}

impl<I: fmt::Display> fmt::Display for Tariff<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Тариф '{}' (ID: {}): {} грн/мiс, {} клiєнтiв",
            self.name,
            self.id,
            format_amount(self.monthly_fee),
            self.number_of_clients
        )
    }
}

/// Formats a money amount with two decimals, rounding half up.
///
/// Rounding is applied to the shortest decimal representation of the value,
/// so `0.125` renders as `0.13` and `1.005` as `1.01`.
///
/// ```
/// use tariffs::domain::tariff::format_amount;
///
/// assert_eq!(format_amount(100.0), "100.00");
/// assert_eq!(format_amount(0.125), "0.13");
/// ```
#[must_use]
pub fn format_amount(value: f64) -> String {
    Decimal::from_str(&value.to_string()).map_or_else(
        |_| format!("{value:.2}"),
        |amount| {
            let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        },
    )
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn basic() -> Tariff<&'static str> {
        Tariff::basic("B1", "Базовий", 100.0, 1000, 100, 5000, 0.5).unwrap()
    }

    #[test]
    fn basic_total_cost_ignores_allowances() {
        assert_eq!(basic().total_cost(), 100.0);
    }

    #[test_case(true, 600.0; "with roaming")]
    #[test_case(false, 500.0; "without roaming")]
    fn premium_total_cost(includes_roaming: bool, expected: f64) {
        let tariff = Tariff::premium("P1", "Премiум", 500.0, 200, includes_roaming, 1).unwrap();
        assert_eq!(tariff.total_cost(), expected);
    }

    #[test_case(1, 300.0; "single line")]
    #[test_case(4, 450.0; "four lines")]
    fn family_total_cost(lines: i64, expected: f64) {
        let tariff = Tariff::family("F1", "Сiмейний", 300.0, 150, lines, 50.0).unwrap();
        assert_eq!(tariff.total_cost(), expected);
    }

    #[test]
    fn negative_fee_is_rejected() {
        let error = Tariff::premium("P", "x", -1.0, 0, false, 0).unwrap_err();
        assert_eq!(error, Error::NegativeFee(-1.0));
    }

    #[test]
    fn nan_fee_is_rejected() {
        let result = Tariff::premium("P", "x", f64::NAN, 0, false, 0);
        assert!(matches!(result, Err(Error::NegativeFee(_))));
    }

    #[test]
    fn negative_clients_are_rejected() {
        let error = Tariff::premium("P", "x", 1.0, -5, false, 0).unwrap_err();
        assert_eq!(error, Error::NegativeClients(-5));
    }

    #[test_case(0, 50.0, 250.0; "zero lines")]
    #[test_case(-2, 10.0, 270.0; "negative lines")]
    #[test_case(2, -10.0, 290.0; "negative per-line cost")]
    fn family_attributes_are_priced_as_given(lines: i64, per_line_cost: f64, expected: f64) {
        let tariff = Tariff::family("F", "x", 300.0, 1, lines, per_line_cost).unwrap();
        assert_eq!(tariff.total_cost(), expected);
    }

    #[test]
    fn family_plan_is_accepted_through_new() {
        let plan = Plan::Family(FamilyPlan {
            number_of_lines: i64::MIN,
            per_line_cost: 0.0,
        });
        let tariff = Tariff::new("F", "x", 1.0, 0, plan).unwrap();
        assert_eq!(tariff.total_cost(), 1.0);
    }

    #[test]
    fn equality_requires_same_variant() {
        let basic = Tariff::basic("T", "x", 10.0, 1, 0, 0, 0.0).unwrap();
        let premium = Tariff::premium("T", "x", 10.0, 1, false, 0).unwrap();
        assert_ne!(basic, premium);
        assert_eq!(basic, basic.clone());
    }

    #[test]
    fn ordering_looks_at_fee_only() {
        let cheap = Tariff::premium("A", "z", 10.0, 1, true, 3).unwrap();
        let dear = Tariff::basic("B", "a", 20.0, 0, 0, 0, 0.0).unwrap();
        assert_eq!(cheap.cmp_by_fee(&dear), Ordering::Less);
        assert_eq!(dear.cmp_by_fee(&cheap), Ordering::Greater);
        assert_eq!(cheap.cmp_by_fee(&cheap), Ordering::Equal);
    }

    #[test]
    fn display_renders_one_line() {
        assert_eq!(
            basic().to_string(),
            "Тариф 'Базовий' (ID: B1): 100.00 грн/мiс, 1000 клiєнтiв"
        );
    }

    #[test_case(0.0, "0.00")]
    #[test_case(99.999, "100.00")]
    #[test_case(0.125, "0.13"; "half rounds up")]
    #[test_case(1.005, "1.01"; "half rounds up on shortest repr")]
    #[test_case(2.5, "2.50")]
    fn amount_formatting(value: f64, expected: &str) {
        assert_eq!(format_amount(value), expected);
    }
}
