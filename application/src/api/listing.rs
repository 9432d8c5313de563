//! [`Listing`]-related definitions.

use common::{DateTime, Price};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar,
};
use service::{
    domain::{self, manufacturer},
    read,
};
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A used coordinate-measuring machine offered for sale.
#[derive(Clone, Debug, From, Into)]
pub struct Listing(domain::Listing);

/// A used coordinate-measuring machine offered for sale.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Title of this `Listing`.
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Description of this `Listing`, if any.
    pub fn description(&self) -> Option<Description> {
        self.0.description.clone().map(Into::into)
    }

    /// Manufacturer of the offered machine.
    pub fn manufacturer(&self) -> Manufacturer {
        Manufacturer {
            id: self.0.manufacturer.id.into(),
            name: self.0.manufacturer.name.clone().into(),
        }
    }

    /// Model of the offered machine, if known.
    pub fn model(&self) -> Option<ModelName> {
        self.0.model.clone().map(Into::into)
    }

    /// Asking price in minor currency units.
    pub fn price(&self) -> Price {
        self.0.price
    }

    /// Year the offered machine was built in, if known.
    pub fn build_year(&self) -> Option<i32> {
        self.0.build_year.map(Into::into)
    }

    /// Condition of the offered machine.
    pub fn condition(&self) -> Condition {
        self.0.condition.into()
    }

    /// Measuring range of the offered machine.
    pub fn measuring_range(&self) -> MeasuringRange {
        self.0.measuring_range.into()
    }

    /// Country the machine is located in, as specified by its seller.
    pub fn country(&self) -> Country {
        self.0.location.country.clone().into()
    }

    /// ISO 3166-1 alpha-2 code of the country the machine is located in.
    ///
    /// Falls back to the upper-cased `country` if it's unknown.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.countryCode",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn country_code(&self, ctx: &Context) -> String {
        ctx.service()
            .config()
            .countries
            .normalize(self.0.location.country.as_ref())
            .to_string()
    }

    /// City the machine is located in, if specified.
    pub fn city(&self) -> Option<City> {
        self.0.location.city.clone().map(Into::into)
    }

    /// `DateTime` when this `Listing` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Listing` was published, if it was.
    pub fn published_at(&self) -> Option<DateTime> {
        self.0.published_at.map(|d| d.coerce())
    }

    /// `DateTime` this `Listing` is dated by: the publication one, or the
    /// creation one if it wasn't published.
    pub fn effective_date(&self) -> DateTime {
        self.0.effective_date().coerce()
    }

    /// Indicator whether this `Listing` is promoted by its seller.
    pub fn featured(&self) -> bool {
        self.0.featured
    }

    /// Status of this `Listing`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }
}

/// Unique identifier of a `Listing`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// Country of a `Listing`, either a display name or an ISO 3166-1 alpha-2
/// code.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingCountry",
    with = scalar::Via::<domain::listing::Country>,
)]
pub struct Country(domain::listing::Country);

/// City of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingCity",
    with = scalar::Via::<domain::listing::City>,
)]
pub struct City(domain::listing::City);

/// Manufacturer of measuring machines.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Manufacturer {
    /// Unique identifier of this `Manufacturer`.
    pub id: ManufacturerId,

    /// Name of this `Manufacturer`.
    pub name: ManufacturerName,
}

/// Unique identifier of a `Manufacturer`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(manufacturer::Id)]
#[into(manufacturer::Id)]
#[graphql(transparent)]
pub struct ManufacturerId(Uuid);

/// Name of a `Manufacturer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<manufacturer::Name>)]
pub struct ManufacturerName(manufacturer::Name);

/// Model name of a measuring machine.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<manufacturer::ModelName>)]
pub struct ModelName(manufacturer::ModelName);

/// Measuring range of a machine along each of its axes, in millimetres.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct MeasuringRange {
    /// Range along the `X` axis.
    pub x: i32,

    /// Range along the `Y` axis.
    pub y: i32,

    /// Range along the `Z` axis.
    pub z: i32,
}

impl From<domain::listing::MeasuringRange> for MeasuringRange {
    fn from(range: domain::listing::MeasuringRange) -> Self {
        let mm = |v: domain::listing::Millimeters| {
            i32::try_from(v).unwrap_or(i32::MAX)
        };
        Self {
            x: mm(range.x),
            y: mm(range.y),
            z: mm(range.z),
        }
    }
}

/// Condition of an offered machine.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ListingCondition")]
pub enum Condition {
    /// Unused machine.
    New,

    /// Barely used machine without visible wear.
    LikeNew,

    /// Used machine in a very good condition.
    VeryGood,

    /// Used machine with normal wear.
    Good,

    /// Machine overhauled by a service company.
    Refurbished,

    /// Defective machine sold for parts.
    ForParts,
}

impl From<domain::listing::Condition> for Condition {
    fn from(condition: domain::listing::Condition) -> Self {
        use domain::listing::Condition as C;
        match condition {
            C::New => Self::New,
            C::LikeNew => Self::LikeNew,
            C::VeryGood => Self::VeryGood,
            C::Good => Self::Good,
            C::Refurbished => Self::Refurbished,
            C::ForParts => Self::ForParts,
        }
    }
}

impl From<Condition> for domain::listing::Condition {
    fn from(condition: Condition) -> Self {
        use Condition as C;
        match condition {
            C::New => Self::New,
            C::LikeNew => Self::LikeNew,
            C::VeryGood => Self::VeryGood,
            C::Good => Self::Good,
            C::Refurbished => Self::Refurbished,
            C::ForParts => Self::ForParts,
        }
    }
}

/// Status of a `Listing`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ListingStatus")]
pub enum Status {
    /// Not submitted by its seller yet.
    Draft,

    /// Awaiting moderation.
    PendingReview,

    /// Publicly visible and available.
    Active,

    /// Reserved for a buyer.
    Reserved,

    /// Sold.
    Sold,

    /// Withdrawn from sale.
    Archived,
}

impl From<domain::listing::Status> for Status {
    fn from(status: domain::listing::Status) -> Self {
        use domain::listing::Status as S;
        match status {
            S::Draft => Self::Draft,
            S::PendingReview => Self::PendingReview,
            S::Active => Self::Active,
            S::Reserved => Self::Reserved,
            S::Sold => Self::Sold,
            S::Archived => Self::Archived,
        }
    }
}

/// Order of `Listing`s in a result list.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ListingSort")]
pub enum Sort {
    /// Featured first, then the most recent first.
    Relevance,

    /// Cheapest first.
    PriceAsc,

    /// Most expensive first.
    PriceDesc,

    /// Most recent first.
    DateDesc,

    /// Oldest first.
    DateAsc,

    /// Newest machines first.
    YearDesc,

    /// Oldest machines first.
    YearAsc,
}

impl From<Sort> for read::listing::Sort {
    fn from(sort: Sort) -> Self {
        use Sort as S;
        match sort {
            S::Relevance => Self::Relevance,
            S::PriceAsc => Self::PriceAsc,
            S::PriceDesc => Self::PriceDesc,
            S::DateDesc => Self::DateDesc,
            S::DateAsc => Self::DateAsc,
            S::YearDesc => Self::YearDesc,
            S::YearAsc => Self::YearAsc,
        }
    }
}

/// Constraints the `Listing`s must satisfy.
///
/// Every field is optional, an absent one imposing no constraint. Bounds are
/// inclusive.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "ListingFilter")]
pub struct Filter {
    /// Free-text query matched against titles, descriptions, manufacturer
    /// and model names.
    pub query: Option<String>,

    /// Allowed manufacturers.
    pub manufacturers: Option<Vec<ManufacturerId>>,

    /// Allowed conditions.
    pub conditions: Option<Vec<Condition>>,

    /// Allowed countries, either as ISO 3166-1 alpha-2 codes or display
    /// names.
    pub countries: Option<Vec<String>>,

    /// Minimum price in minor currency units.
    pub price_min: Option<Price>,

    /// Maximum price in minor currency units.
    pub price_max: Option<Price>,

    /// Minimum build year.
    pub year_min: Option<i32>,

    /// Maximum build year.
    pub year_max: Option<i32>,

    /// Minimum measuring range along the `X` axis, in millimetres.
    pub range_x_min: Option<i32>,

    /// Maximum measuring range along the `X` axis, in millimetres.
    pub range_x_max: Option<i32>,

    /// Minimum measuring range along the `Y` axis, in millimetres.
    pub range_y_min: Option<i32>,

    /// Maximum measuring range along the `Y` axis, in millimetres.
    pub range_y_max: Option<i32>,

    /// Minimum measuring range along the `Z` axis, in millimetres.
    pub range_z_min: Option<i32>,

    /// Maximum measuring range along the `Z` axis, in millimetres.
    pub range_z_max: Option<i32>,
}

impl TryFrom<Filter> for read::listing::Filter {
    type Error = std::num::TryFromIntError;

    fn try_from(filter: Filter) -> Result<Self, Self::Error> {
        fn bound<T: TryFrom<i32>>(
            v: Option<i32>,
        ) -> Result<Option<T>, T::Error> {
            v.map(T::try_from).transpose()
        }

        let Filter {
            query,
            manufacturers,
            conditions,
            countries,
            price_min,
            price_max,
            year_min,
            year_max,
            range_x_min,
            range_x_max,
            range_y_min,
            range_y_max,
            range_z_min,
            range_z_max,
        } = filter;

        Ok(Self {
            query,
            manufacturers: manufacturers
                .into_iter()
                .flatten()
                .map(Into::into)
                .collect(),
            conditions: conditions
                .into_iter()
                .flatten()
                .map(Into::into)
                .collect(),
            countries: countries.into_iter().flatten().collect(),
            price: read::listing::Range::new(price_min, price_max),
            build_year: read::listing::Range::new(
                bound(year_min)?,
                bound(year_max)?,
            ),
            measuring_range: read::listing::Axes {
                x: read::listing::Range::new(
                    bound(range_x_min)?,
                    bound(range_x_max)?,
                ),
                y: read::listing::Range::new(
                    bound(range_y_min)?,
                    bound(range_y_max)?,
                ),
                z: read::listing::Range::new(
                    bound(range_z_min)?,
                    bound(range_z_max)?,
                ),
            },
        })
    }
}

pub mod list {
    //! Definitions related to the [`Listing`] list.

    use juniper::graphql_object;
    use service::read::listing::{query_string, SearchParams};

    use super::Listing;
    use crate::Context;

    /// Page of the [`Listing`] list.
    #[derive(Clone, Debug)]
    pub struct Page {
        /// Underlying page of [`domain::Listing`]s.
        ///
        /// [`domain::Listing`]: service::domain::Listing
        page: common::Page<service::domain::Listing>,

        /// [`SearchParams`] the page was found with.
        params: SearchParams,
    }

    impl Page {
        /// Creates a new [`Page`] found with the provided [`SearchParams`].
        #[must_use]
        pub fn new(
            page: common::Page<service::domain::Listing>,
            params: SearchParams,
        ) -> Self {
            Self { page, params }
        }
    }

    /// Page of the `Listing` list.
    #[graphql_object(name = "ListingPage", context = Context)]
    impl Page {
        /// `Listing`s on this page.
        #[must_use]
        pub fn items(&self) -> Vec<Listing> {
            self.page.items.iter().cloned().map(Into::into).collect()
        }

        /// Total number of `Listing`s across all the pages.
        #[must_use]
        pub fn total_count(&self) -> i32 {
            i32::try_from(self.page.total_count).unwrap_or(i32::MAX)
        }

        /// 1-based number of this page.
        #[must_use]
        pub fn page(&self) -> i32 {
            i32::try_from(self.page.pagination.number()).unwrap_or(i32::MAX)
        }

        /// Maximum number of `Listing`s on a page.
        #[must_use]
        pub fn per_page(&self) -> i32 {
            i32::try_from(self.page.pagination.size()).unwrap_or(i32::MAX)
        }

        /// Total number of pages.
        #[must_use]
        pub fn page_count(&self) -> i32 {
            i32::try_from(self.page.page_count()).unwrap_or(i32::MAX)
        }

        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.page.has_next_page()
        }

        /// Canonical URL query string of the search this page was found
        /// with, suitable for sharing.
        #[must_use]
        pub fn query(&self) -> String {
            query_string::encode(&self.params)
        }
    }
}
