//! Subscription [`Plan`]s and the [`Features`] they unlock.

use common::define_kind;

define_kind! {
    #[doc = "Subscription plan of a seller, identified by its slug."]
    enum Plan {
        #[doc = "Free plan for occasional sellers."]
        Free = 1,

        #[doc = "Entry plan for small dealers."]
        Starter = 2,

        #[doc = "Plan for established dealers."]
        Professional = 3,

        #[doc = "Plan for manufacturers and large dealers."]
        Enterprise = 4,
    }
}

impl Plan {
    /// Returns the [`Features`] unlocked by this [`Plan`].
    #[must_use]
    pub const fn features(self) -> Features {
        match self {
            Self::Free => Features {
                max_active_listings: Some(1),
                featured_listings: 0,
                team_seats: 1,
                statistics: false,
                inquiries: true,
                api_access: false,
                auto_reply: false,
                export: false,
            },
            Self::Starter => Features {
                max_active_listings: Some(10),
                featured_listings: 1,
                team_seats: 2,
                statistics: true,
                inquiries: true,
                api_access: false,
                auto_reply: false,
                export: false,
            },
            Self::Professional => Features {
                max_active_listings: Some(50),
                featured_listings: 5,
                team_seats: 5,
                statistics: true,
                inquiries: true,
                api_access: true,
                auto_reply: true,
                export: true,
            },
            Self::Enterprise => Features {
                max_active_listings: None,
                featured_listings: 20,
                team_seats: 25,
                statistics: true,
                inquiries: true,
                api_access: true,
                auto_reply: true,
                export: true,
            },
        }
    }

    /// Indicates whether this [`Plan`] unlocks the provided [`Feature`].
    #[must_use]
    pub const fn allows(self, feature: Feature) -> bool {
        let f = self.features();
        match feature {
            Feature::Statistics => f.statistics,
            Feature::Inquiries => f.inquiries,
            Feature::ApiAccess => f.api_access,
            Feature::AutoReply => f.auto_reply,
            Feature::Export => f.export,
            Feature::FeaturedListings => f.featured_listings > 0,
            Feature::Team => f.team_seats > 1,
        }
    }

    /// Indicates whether a seller on this [`Plan`] may have one more active
    /// listing, given the `active` number they already have.
    #[must_use]
    pub const fn can_activate_listing(self, active: u32) -> bool {
        match self.features().max_active_listings {
            Some(max) => active < max,
            None => true,
        }
    }
}

/// Capabilities unlocked by a [`Plan`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::struct_excessive_bools, reason = "flags table")]
pub struct Features {
    /// Maximum number of simultaneously active listings, [`None`] meaning
    /// unbounded.
    pub max_active_listings: Option<u32>,

    /// Number of listings that may be featured at once.
    pub featured_listings: u32,

    /// Number of team members (including the owner).
    pub team_seats: u32,

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

define_kind! {
    #[doc = "Dashboard section gated by a [`Plan`]."]
    enum Feature {
        #[doc = "Statistics dashboard."]
        Statistics = 1,

        #[doc = "Inquiries inbox."]
        Inquiries = 2,

        #[doc = "API keys."]
        ApiAccess = 3,

        #[doc = "Inquiry auto-reply settings."]
        AutoReply = 4,

        #[doc = "Data export."]
        Export = 5,

        #[doc = "Featuring listings."]
        FeaturedListings = 6,

        #[doc = "Team management."]
        Team = 7,
    }
}
