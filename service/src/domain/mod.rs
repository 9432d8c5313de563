//! Domain definitions.

pub mod comparison;
pub mod country;
pub mod listing;
pub mod manufacturer;
pub mod plan;

pub use self::{listing::Listing, plan::Plan};

use serde::{Deserialize as _, Deserializer};

/// Deserializes an optional text newtype leniently: surrounding whitespace is
/// trimmed, and a blank or otherwise invalid value is treated as absent.
pub(crate) fn deserialize_optional_text<'de, D, T>(
    deserializer: D,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<String>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .and_then(|s| T::try_from(s.trim().to_owned()).ok()))
}

/// Defines a non-empty, trimmed and length-limited text newtype.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        $name:ident(max = $max:literal)
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Serialize,
        )]
        #[as_ref(forward)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length (in bytes) of this value.
            pub const MAX_LEN: usize = $max;

            #[doc = concat!("Creates a new [`", stringify!($name), "`] if ")]
            #[doc = "the given `value` is valid."]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            /// Checks whether the given `value` is valid.
            fn check(value: &str) -> bool {
                value.trim() == value
                    && !value.is_empty()
                    && value.len() <= Self::MAX_LEN
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }

        impl TryFrom<String> for $name {
            type Error = &'static str;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
                    .ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use define_text;
