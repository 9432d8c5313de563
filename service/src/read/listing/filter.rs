//! [`Filter`] of [`Listing`]s and its [`Predicate`].

use std::collections::BTreeSet;

use common::Price;

use crate::domain::{
    country,
    listing::{self, BuildYear, Condition, Millimeters},
    manufacturer, Listing,
};

/// Constraints a [`Listing`] must satisfy to be shown.
///
/// Every field is optional: an absent (or empty) one imposes no constraint
/// on its dimension.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// Free-text query matched against the title, description,
    /// manufacturer and model names.
    pub query: Option<String>,

    /// Allowed [`manufacturer::Id`]s.
    pub manufacturers: BTreeSet<manufacturer::Id>,

    /// Allowed [`Condition`]s.
    pub conditions: BTreeSet<Condition>,

    /// Allowed countries, either as codes (`DE`) or display names
    /// (`Deutschland`).
    pub countries: BTreeSet<String>,

    /// Allowed [`Price`] range.
    pub price: Range<Price>,

    /// Allowed [`BuildYear`] range.
    pub build_year: Range<BuildYear>,

    /// Allowed measuring ranges per axis.
    pub measuring_range: Axes<Range<Millimeters>>,
}

impl Filter {
    /// Indicates whether this [`Filter`] imposes no constraints at all.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.query().is_none()
            && self.manufacturers.is_empty()
            && self.conditions.is_empty()
            && self.countries.is_empty()
            && self.price.is_unbounded()
            && self.build_year.is_unbounded()
            && self.measuring_range.x.is_unbounded()
            && self.measuring_range.y.is_unbounded()
            && self.measuring_range.z.is_unbounded()
    }

    /// Returns the trimmed free-text query, if it's not blank.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Builds a [`Predicate`] out of this [`Filter`], normalizing countries
    /// with the provided [`country::Names`].
    #[must_use]
    pub fn predicate<'a>(&'a self, names: &'a country::Names) -> Predicate<'a> {
        Predicate {
            filter: self,
            names,
            query: self.query().map(str::to_lowercase),
            countries: self
                .countries
                .iter()
                .map(|c| names.normalize(c))
                .collect(),
        }
    }
}

/// Inclusive range with optional bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range<T> {
    /// Lower bound, if any.
    pub min: Option<T>,

    /// Upper bound, if any.
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd> Range<T> {
    /// Creates a new [`Range`] with the provided bounds.
    #[must_use]
    pub const fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Indicates whether this [`Range`] has no bounds.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Indicates whether the provided `value` lies within this [`Range`].
    ///
    /// A missing `value` lies only within an unbounded [`Range`].
    #[must_use]
    pub fn contains(&self, value: Option<&T>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.as_ref().map_or(true, |min| min <= value)
            && self.max.as_ref().map_or(true, |max| value <= max)
    }
}

/// Per-axis values of a machine's measuring range.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Axes<T> {
    /// Value for the `X` axis.
    pub x: T,

    /// Value for the `Y` axis.
    pub y: T,

    /// Value for the `Z` axis.
    pub z: T,
}

/// Boolean predicate over [`Listing`]s built from a [`Filter`].
#[derive(Debug)]
pub struct Predicate<'a> {
    /// [`Filter`] this [`Predicate`] is built from.
    filter: &'a Filter,

    /// [`country::Names`] normalizing [`listing::Country`]s.
    names: &'a country::Names,

    /// Lower-cased free-text query.
    query: Option<String>,

    /// Normalized allowed countries.
    countries: BTreeSet<country::Code>,
}

impl Predicate<'_> {
    /// Indicates whether the provided [`Listing`] satisfies every populated
    /// constraint.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        let f = self.filter;
        let range = &listing.measuring_range;

        self.matches_query(listing)
            && (f.manufacturers.is_empty()
                || f.manufacturers.contains(&listing.manufacturer.id))
            && (f.conditions.is_empty()
                || f.conditions.contains(&listing.condition))
            && self.matches_country(&listing.location.country)
            && f.price.contains(Some(&listing.price))
            && f.build_year.contains(listing.build_year.as_ref())
            && f.measuring_range.x.contains(Some(&range.x))
            && f.measuring_range.y.contains(Some(&range.y))
            && f.measuring_range.z.contains(Some(&range.z))
    }

    /// Case-insensitive substring match of the query against any of the
    /// searchable texts of the provided [`Listing`].
    fn matches_query(&self, listing: &Listing) -> bool {
        let Some(query) = &self.query else {
            return true;
        };
        let found = |text: &str| text.to_lowercase().contains(query.as_str());

        found(listing.title.as_ref())
            || listing
                .description
                .as_ref()
                .is_some_and(|d| found(d.as_ref()))
            || found(listing.manufacturer.name.as_ref())
            || listing.model.as_ref().is_some_and(|m| found(m.as_ref()))
    }

    /// Membership of the normalized `country` in the allowed ones.
    fn matches_country(&self, country: &listing::Country) -> bool {
        self.countries.is_empty()
            || self.countries.contains(&self.names.normalize(country.as_ref()))
    }
}
