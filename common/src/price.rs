//! [`Price`]-related definitions.

use std::str::FromStr;

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Price in minor currency units (e.g. cents).
///
/// Upstream listing data stores prices as integers of the smallest currency
/// unit, so `2_500_000` is `25 000.00` in the major unit.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Number of minor units in one major currency unit.
    pub const MINOR_PER_MAJOR: u64 = 100;

    /// Creates a new [`Price`] out of the provided amount of minor units.
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Returns the amount of minor units in this [`Price`].
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Returns the whole major units of this [`Price`], truncating the rest.
    #[must_use]
    pub const fn major(self) -> u64 {
        self.0 / Self::MINOR_PER_MAJOR
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err("expected non-negative integer amount of minor units");
        }
        s.parse().map(Self).map_err(|_| "amount overflow")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Price as a decimal string of minor currency units (e.g. cents).
    #[graphql_scalar(with = Self, parse_token(String))]
    type Price = super::Price;

    impl Price {
        fn to_output<S: ScalarValue>(p: &Price) -> Value<S> {
            Value::scalar(p.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Price` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Price` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Price;

    #[test]
    fn from_str() {
        assert_eq!(
            Price::from_str("2500000"),
            Ok(Price::from_minor(2_500_000)),
        );
        assert_eq!(Price::from_str("0"), Ok(Price::from_minor(0)));

        assert!(Price::from_str("").is_err());
        assert!(Price::from_str("-5").is_err());
        assert!(Price::from_str("+5").is_err());
        assert!(Price::from_str("12.50").is_err());
        assert!(Price::from_str(" 12").is_err());
        assert!(Price::from_str("99999999999999999999999").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Price::from_minor(2_500_000).to_string(), "2500000");
        assert_eq!(Price::from_minor(0).to_string(), "0");
    }

    #[test]
    fn major_units() {
        assert_eq!(Price::from_minor(2_500_099).major(), 25_000);
        assert_eq!(Price::from_minor(99).major(), 0);
    }

    #[test]
    fn orders_by_amount() {
        assert!(Price::from_minor(1) < Price::from_minor(2));
    }
}
