//! [`Listing`] definitions.

use common::{define_kind, unit, DateTimeOf, Price};
#[cfg(doc)]
use common::DateTime;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{define_text, manufacturer, manufacturer::Manufacturer};

/// Used coordinate-measuring machine offered for sale.
///
/// This is a read-only projection of the upstream listing record: nothing
/// in this crate mutates it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`], if any.
    #[serde(default, deserialize_with = "super::deserialize_optional_text")]
    pub description: Option<Description>,

    /// [`Manufacturer`] of the offered machine.
    pub manufacturer: Manufacturer,

    /// Model name of the offered machine, if known.
    #[serde(default, deserialize_with = "super::deserialize_optional_text")]
    pub model: Option<manufacturer::ModelName>,

    /// Asking [`Price`] in minor currency units.
    pub price: Price,

    /// Year the offered machine was built in, if known.
    #[serde(default)]
    pub build_year: Option<BuildYear>,

    /// [`Condition`] of the offered machine.
    pub condition: Condition,

    /// [`MeasuringRange`] of the offered machine.
    pub measuring_range: MeasuringRange,

    /// [`Location`] of the offered machine.
    pub location: Location,

    /// [`DateTime`] when this [`Listing`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Listing`] was published, if it was.
    #[serde(default, with = "common::datetime::serde::rfc3339::option")]
    pub published_at: Option<PublicationDateTime>,

    /// Indicator whether this [`Listing`] is promoted by its seller.
    #[serde(default)]
    pub featured: bool,

    /// [`Status`] of this [`Listing`].
    pub status: Status,
}

impl Listing {
    /// Returns the [`DateTime`] this [`Listing`] is dated by: the publication
    /// one if it was published, or the creation one otherwise.
    #[must_use]
    pub fn effective_date(&self) -> EffectiveDateTime {
        self.published_at
            .map_or_else(|| self.created_at.coerce(), DateTimeOf::coerce)
    }

    /// Indicates whether this [`Listing`] is visible in the public catalog.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.status == Status::Active
    }
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Title of a [`Listing`]."]
    Title(max = 512)
}

define_text! {
    #[doc = "Free-form description of a [`Listing`]."]
    Description(max = 65_536)
}

define_text! {
    #[doc = "City a [`Listing`] is located in."]
    City(max = 256)
}

define_text! {
    #[doc = "Country of a [`Listing`] as stored upstream: either an \
             ISO 3166-1 alpha-2 code (`DE`) or a display name \
             (`Deutschland`)."]
    Country(max = 256)
}

/// Year a machine was built in.
pub type BuildYear = u16;

/// Length in millimetres.
pub type Millimeters = u32;

/// Measuring range of a machine along each of its axes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MeasuringRange {
    /// Range along the `X` axis.
    pub x: Millimeters,

    /// Range along the `Y` axis.
    pub y: Millimeters,

    /// Range along the `Z` axis.
    pub z: Millimeters,
}

/// Location of a [`Listing`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Location {
    /// [`Country`] the machine is located in.
    pub country: Country,

    /// [`City`] the machine is located in, if specified.
    #[serde(default, deserialize_with = "super::deserialize_optional_text")]
    pub city: Option<City>,
}

define_kind! {
    #[doc = "Condition of an offered machine."]
    enum Condition {
        #[doc = "Unused machine."]
        New = 1,

        #[doc = "Barely used machine without visible wear."]
        LikeNew = 2,

        #[doc = "Used machine in a very good condition."]
        VeryGood = 3,

        #[doc = "Used machine with normal wear."]
        Good = 4,

        #[doc = "Machine overhauled by a service company."]
        Refurbished = 5,

        #[doc = "Defective machine sold for parts."]
        ForParts = 6,
    }
}

define_kind! {
    #[doc = "Moderation and sales status of a [`Listing`]."]
    enum Status {
        #[doc = "Not submitted by its seller yet."]
        Draft = 1,

        #[doc = "Awaiting moderation."]
        PendingReview = 2,

        #[doc = "Publicly visible and available."]
        Active = 3,

        #[doc = "Reserved for a buyer."]
        Reserved = 4,

        #[doc = "Sold."]
        Sold = 5,

        #[doc = "Withdrawn by its seller or a moderator."]
        Archived = 6,
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

/// [`DateTime`] when a [`Listing`] was published.
pub type PublicationDateTime = DateTimeOf<(Listing, unit::Publication)>;

/// [`DateTime`] a [`Listing`] is dated by.
///
/// See [`Listing::effective_date()`].
pub type EffectiveDateTime = DateTimeOf<Listing>;
