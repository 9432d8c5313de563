//! [`Manufacturer`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::define_text;

/// Manufacturer of measuring machines, as referenced by a listing.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Manufacturer {
    /// ID of this [`Manufacturer`].
    pub id: Id,

    /// [`Name`] of this [`Manufacturer`].
    pub name: Name,
}

/// ID of a [`Manufacturer`].
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
    #[doc = "Name of a [`Manufacturer`] (e.g. `Zeiss`)."]
    Name(max = 256)
}

define_text! {
    #[doc = "Model name of a machine (e.g. `Contura G2`)."]
    ModelName(max = 256)
}
