//! [`Sort`] order of [`Listing`]s.

use std::cmp::Ordering;

use derive_more::Display;

use crate::domain::Listing;

/// Order of [`Listing`]s in a result list.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Sort {
    /// Featured first, then the most recent first.
    #[default]
    #[display("relevance")]
    Relevance,

    /// Cheapest first.
    #[display("price_asc")]
    PriceAsc,

    /// Most expensive first.
    #[display("price_desc")]
    PriceDesc,

    /// Most recent first.
    #[display("date_desc")]
    DateDesc,

    /// Oldest first.
    #[display("date_asc")]
    DateAsc,

    /// Newest machines first.
    #[display("year_desc")]
    YearDesc,

    /// Oldest machines first.
    #[display("year_asc")]
    YearAsc,
}

impl Sort {
    /// All the [`Sort`] orders.
    pub const ALL: [Self; 7] = [
        Self::Relevance,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::DateDesc,
        Self::DateAsc,
        Self::YearDesc,
        Self::YearAsc,
    ];

    /// Selects the [`Sort`] order by its `key`.
    ///
    /// Unknown keys fall back to [`Sort::Relevance`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.key() == key)
            .unwrap_or_default()
    }

    /// Returns the key of this [`Sort`] order.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::YearDesc => "year_desc",
            Self::YearAsc => "year_asc",
        }
    }

    /// Compares the provided [`Listing`]s according to this [`Sort`] order.
    ///
    /// [`Ordering::Equal`] is returned for ties, so the input order of tied
    /// [`Listing`]s is preserved by [`Sort::apply()`].
    #[must_use]
    pub fn compare(self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            Self::Relevance => b
                .featured
                .cmp(&a.featured)
                .then_with(|| b.effective_date().cmp(&a.effective_date())),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::DateDesc => b.effective_date().cmp(&a.effective_date()),
            Self::DateAsc => a.effective_date().cmp(&b.effective_date()),
            Self::YearDesc => unknown_last(a.build_year, b.build_year, |a, b| {
                b.cmp(&a)
            }),
            Self::YearAsc => {
                unknown_last(a.build_year, b.build_year, |a, b| a.cmp(&b))
            }
        }
    }

    /// Sorts the provided [`Listing`]s in place according to this [`Sort`]
    /// order.
    ///
    /// The sort is stable: tied [`Listing`]s keep their relative order.
    pub fn apply(self, listings: &mut [Listing]) {
        listings.sort_by(|a, b| self.compare(a, b));
    }
}

/// Compares optional values with `cmp`, placing missing ones after the
/// present ones.
fn unknown_last<T>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl FnOnce(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{listing, Listing},
        read::listing::spec::{listing, ListingOf},
    };

    use super::Sort;

    fn ids(listings: &[Listing]) -> Vec<listing::Id> {
        listings.iter().map(|l| l.id).collect()
    }

    fn sorted(sort: Sort, mut listings: Vec<Listing>) -> Vec<listing::Id> {
        sort.apply(&mut listings);
        ids(&listings)
    }

    #[test]
    fn selects_by_key() {
        for sort in Sort::ALL {
            assert_eq!(Sort::from_key(sort.key()), sort);
            assert_eq!(sort.to_string(), sort.key());
        }
    }

    #[test]
    fn unknown_key_falls_back_to_relevance() {
        assert_eq!(Sort::from_key(""), Sort::Relevance);
        assert_eq!(Sort::from_key("cheapest"), Sort::Relevance);
        assert_eq!(Sort::from_key("PRICE_ASC"), Sort::Relevance);
    }

    #[test]
    fn price_orders_are_reverse_of_each_other() {
        let listings = [7, 3, 9, 1, 5]
            .map(|price| {
                listing(ListingOf {
                    price,
                    ..ListingOf::default()
                })
            })
            .to_vec();

        let asc = sorted(Sort::PriceAsc, listings.clone());
        let mut desc = sorted(Sort::PriceDesc, listings.clone());
        desc.reverse();

        assert_eq!(asc, desc);
        let prices = {
            let mut l = listings;
            Sort::PriceAsc.apply(&mut l);
            l.into_iter().map(|l| l.price.minor()).collect::<Vec<_>>()
        };
        assert_eq!(prices, [1, 3, 5, 7, 9]);
    }

    #[test]
    fn relevance_puts_featured_first_regardless_of_dates() {
        let old_featured = listing(ListingOf {
            featured: true,
            created_at: "2019-01-01T00:00:00Z",
            ..ListingOf::default()
        });
        let fresh = listing(ListingOf {
            created_at: "2024-06-01T00:00:00Z",
            ..ListingOf::default()
        });
        let fresher = listing(ListingOf {
            created_at: "2024-01-01T00:00:00Z",
            published_at: Some("2024-07-01T00:00:00Z"),
            ..ListingOf::default()
        });

        assert_eq!(
            sorted(
                Sort::Relevance,
                vec![fresh.clone(), old_featured.clone(), fresher.clone()],
            ),
            ids(&[old_featured, fresher, fresh]),
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let same = |featured| {
            listing(ListingOf {
                featured,
                price: 100,
                created_at: "2024-01-01T00:00:00Z",
                ..ListingOf::default()
            })
        };
        // Large enough for sort implementations switching strategies.
        let listings = (0..64).map(|i| same(i % 3 == 0)).collect::<Vec<_>>();

        for sort in Sort::ALL {
            let expected = if sort == Sort::Relevance {
                let (featured, rest): (Vec<_>, Vec<_>) =
                    listings.iter().cloned().partition(|l| l.featured);
                ids(&[featured, rest].concat())
            } else {
                ids(&listings)
            };
            assert_eq!(sorted(sort, listings.clone()), expected, "{sort}");
        }
    }

    #[test]
    fn dates_use_publication_when_present() {
        let created_late = listing(ListingOf {
            created_at: "2024-03-01T00:00:00Z",
            ..ListingOf::default()
        });
        let published_later = listing(ListingOf {
            created_at: "2023-01-01T00:00:00Z",
            published_at: Some("2024-04-01T00:00:00Z"),
            ..ListingOf::default()
        });

        assert_eq!(
            sorted(
                Sort::DateDesc,
                vec![created_late.clone(), published_later.clone()],
            ),
            ids(&[published_later.clone(), created_late.clone()]),
        );
        assert_eq!(
            sorted(
                Sort::DateAsc,
                vec![published_later.clone(), created_late.clone()],
            ),
            ids(&[created_late, published_later]),
        );
    }

    #[test]
    fn unknown_years_go_last() {
        let of = |build_year| {
            listing(ListingOf {
                build_year,
                ..ListingOf::default()
            })
        };
        let (unknown, y2005, y2018) =
            (of(None), of(Some(2005)), of(Some(2018)));
        let input = vec![unknown.clone(), y2005.clone(), y2018.clone()];

        assert_eq!(
            sorted(Sort::YearDesc, input.clone()),
            ids(&[y2018.clone(), y2005.clone(), unknown.clone()]),
        );
        assert_eq!(
            sorted(Sort::YearAsc, input),
            ids(&[y2005, y2018, unknown]),
        );
    }
}
