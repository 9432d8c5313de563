//! [`Plan`]-related definitions.

use derive_more::{From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLObject};
use service::domain::{self, plan};

use crate::Context;

/// A subscription plan of a seller.
#[derive(Clone, Copy, Debug, From, Into)]
pub struct Plan(domain::Plan);

/// A subscription plan of a seller.
#[graphql_object(context = Context)]
impl Plan {
    /// Slug of this `Plan` (`free`, `starter`, `professional` or
    /// `enterprise`).
    #[must_use]
    pub fn slug(&self) -> String {
        self.0.to_string()
    }

    /// Capabilities unlocked by this `Plan`.
    #[must_use]
    pub fn features(&self) -> Features {
        self.0.features().into()
    }

    /// Indicator whether this `Plan` unlocks the provided `Feature`.
    #[must_use]
    pub fn allows(&self, feature: Feature) -> bool {
        self.0.allows(feature.into())
    }

    /// Indicator whether a seller on this `Plan` may activate one more
    /// listing, having the provided number of `active` ones already.
    #[must_use]
    pub fn can_activate_listing(&self, active: i32) -> bool {
        u32::try_from(active).map_or(true, |a| self.0.can_activate_listing(a))
    }
}

/// Capabilities unlocked by a `Plan`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "PlanFeatures")]
#[expect(clippy::struct_excessive_bools, reason = "flags table")]
pub struct Features {
    /// Maximum number of simultaneously active listings, `null` meaning
    /// unbounded.
    pub max_active_listings: Option<i32>,

    /// Number of listings that may be featured at once.
    pub featured_listings: i32,

    /// Number of team members, including the owner.
    pub team_seats: i32,

    /// Access to the statistics dashboard.
    pub statistics: bool,

    /// Access to the inquiries inbox.
    pub inquiries: bool,

    /// Access to the API keys section.
    pub api_access: bool,

    /// Access to the inquiry auto-reply settings.
    pub auto_reply: bool,

    /// Access to the data export.
    pub export: bool,
}

impl From<plan::Features> for Features {
    fn from(f: plan::Features) -> Self {
        let int = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self {
            max_active_listings: f.max_active_listings.map(int),
            featured_listings: int(f.featured_listings),
            team_seats: int(f.team_seats),
            statistics: f.statistics,
            inquiries: f.inquiries,
            api_access: f.api_access,
            auto_reply: f.auto_reply,
            export: f.export,
        }
    }
}

/// Dashboard section gated by a `Plan`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PlanFeature")]
pub enum Feature {
    /// Statistics dashboard.
    Statistics,

    /// Inquiries inbox.
    Inquiries,

    /// API keys.
    ApiAccess,

    /// Inquiry auto-reply settings.
    AutoReply,

    /// Data export.
    Export,

    /// Featured listings.
    FeaturedListings,

    /// Team management.
    Team,
}

impl From<Feature> for plan::Feature {
    fn from(feature: Feature) -> Self {
        use Feature as F;
        match feature {
            F::Statistics => Self::Statistics,
            F::Inquiries => Self::Inquiries,
            F::ApiAccess => Self::ApiAccess,
            F::AutoReply => Self::AutoReply,
            F::Export => Self::Export,
            F::FeaturedListings => Self::FeaturedListings,
            F::Team => Self::Team,
        }
    }
}
