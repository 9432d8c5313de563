//! [`Listing`]-related read definitions.

pub mod filter;
pub mod query_string;
pub mod sort;

#[cfg(doc)]
use crate::domain::Listing;

pub use self::{
    filter::{Axes, Filter, Predicate, Range},
    query_string::SearchParams,
    sort::Sort,
};

#[cfg(test)]
pub(crate) mod spec {
    //! [`Listing`] fixtures.

    use common::{DateTime, Price};

    use crate::domain::{
        listing::{
            self, Condition, Country, Description, Location, MeasuringRange,
            Status, Title,
        },
        manufacturer::{self, ModelName},
        Listing,
    };

    /// Parameters of a [`Listing`] fixture.
    pub(crate) struct ListingOf {
        pub(crate) title: &'static str,
        pub(crate) description: Option<&'static str>,
        pub(crate) manufacturer: &'static str,
        pub(crate) manufacturer_id: manufacturer::Id,
        pub(crate) model: Option<&'static str>,
        pub(crate) price: u64,
        pub(crate) build_year: Option<u16>,
        pub(crate) condition: Condition,
        pub(crate) range: (u32, u32, u32),
        pub(crate) country: &'static str,
        pub(crate) created_at: &'static str,
        pub(crate) published_at: Option<&'static str>,
        pub(crate) featured: bool,
        pub(crate) status: Status,
    }

    impl Default for ListingOf {
        fn default() -> Self {
            Self {
                title: "Bridge CMM",
                description: None,
                manufacturer: "Hexagon",
                manufacturer_id: manufacturer::Id::new(),
                model: None,
                price: 1_000_000,
                build_year: Some(2015),
                condition: Condition::Good,
                range: (700, 1000, 600),
                country: "DE",
                created_at: "2024-01-01T00:00:00Z",
                published_at: None,
                featured: false,
                status: Status::Active,
            }
        }
    }

    /// Creates a new [`Listing`] out of the provided parameters.
    pub(crate) fn listing(of: ListingOf) -> Listing {
        let (x, y, z) = of.range;
        Listing {
            id: listing::Id::new(),
            title: Title::new(of.title).unwrap(),
            description: of.description.map(|d| Description::new(d).unwrap()),
            manufacturer: manufacturer::Manufacturer {
                id: of.manufacturer_id,
                name: manufacturer::Name::new(of.manufacturer).unwrap(),
            },
            model: of.model.map(|m| ModelName::new(m).unwrap()),
            price: Price::from_minor(of.price),
            build_year: of.build_year,
            condition: of.condition,
            measuring_range: MeasuringRange { x, y, z },
            location: Location {
                country: Country::new(of.country).unwrap(),
                city: None,
            },
            created_at: DateTime::from_rfc3339(of.created_at).unwrap().coerce(),
            published_at: of
                .published_at
                .map(|p| DateTime::from_rfc3339(p).unwrap().coerce()),
            featured: of.featured,
            status: of.status,
        }
    }
}
