//! Country normalization.
//!
//! Listing data and filter UI labels refer to countries either by their
//! ISO 3166-1 alpha-2 code (`DE`) or by a display name (`Deutschland`).
//! Both sides are normalized to a [`Code`] through [`Names`] before being
//! compared.

use std::collections::HashMap;

use derive_more::{AsRef, Display};

/// Normalized country code.
///
/// Holds an upper-cased ISO 3166-1 alpha-2 code for every known country, or
/// the upper-cased label itself for labels missing in [`Names`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Code(String);

/// Built-in table of country display names and their codes.
///
/// Version `1`: German and English names of the countries machines are
/// listed in.
pub const DEFAULT_NAMES: &[(&str, &str)] = &[
    ("Deutschland", "DE"),
    ("Germany", "DE"),
    ("Österreich", "AT"),
    ("Austria", "AT"),
    ("Schweiz", "CH"),
    ("Switzerland", "CH"),
    ("Frankreich", "FR"),
    ("France", "FR"),
    ("Italien", "IT"),
    ("Italy", "IT"),
    ("Niederlande", "NL"),
    ("Netherlands", "NL"),
    ("Belgien", "BE"),
    ("Belgium", "BE"),
    ("Polen", "PL"),
    ("Poland", "PL"),
    ("Tschechien", "CZ"),
    ("Czech Republic", "CZ"),
    ("Spanien", "ES"),
    ("Spain", "ES"),
    ("Vereinigtes Königreich", "GB"),
    ("United Kingdom", "GB"),
    ("Dänemark", "DK"),
    ("Denmark", "DK"),
    ("Schweden", "SE"),
    ("Sweden", "SE"),
    ("Ungarn", "HU"),
    ("Hungary", "HU"),
    ("USA", "US"),
    ("United States", "US"),
];

/// Lookup table of country display names to [`Code`]s.
///
/// Lookups ignore case and surrounding whitespace.
#[derive(Clone, Debug)]
pub struct Names(HashMap<String, Code>);

impl Names {
    /// Creates new [`Names`] out of the provided `(name, code)` pairs.
    pub fn new<N, C>(names: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: AsRef<str>,
        C: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|(name, code)| (key(name.as_ref()), upper(code.as_ref())))
                .collect(),
        )
    }

    /// Normalizes the provided country `label` into a [`Code`].
    #[must_use]
    pub fn normalize(&self, label: &str) -> Code {
        self.0
            .get(&key(label))
            .cloned()
            .unwrap_or_else(|| upper(label))
    }

    /// Returns the number of known display names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no display names are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Names {
    fn default() -> Self {
        Self::new(DEFAULT_NAMES.iter().copied())
    }
}

/// Returns the lookup key of the provided display `name`.
fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns the upper-cased [`Code`] out of the provided `label`.
fn upper(label: &str) -> Code {
    Code(label.trim().to_uppercase())
}
