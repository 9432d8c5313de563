//! Mapping of [`SearchParams`] to and from a URL query string.
//!
//! The query string is the single source of truth of a shareable search:
//! [`encode()`] and [`decode()`] are pure and independent of each other, and
//! `decode(&encode(&params)) == params` holds for every `params` with a
//! non-blank query (a blank one is omitted while encoding).
//!
//! Lists are comma-separated, so list values must not contain commas.

use std::{collections::BTreeSet, str::FromStr};

use itertools::Itertools as _;
use url::form_urlencoded;

use super::{Filter, Range, Sort};

/// Query string keys.
mod key {
    pub(super) const QUERY: &str = "q";
    pub(super) const MANUFACTURER: &str = "manufacturer";
    pub(super) const CONDITION: &str = "condition";
    pub(super) const COUNTRY: &str = "country";
    pub(super) const PRICE_MIN: &str = "priceMin";
    pub(super) const PRICE_MAX: &str = "priceMax";
    pub(super) const YEAR_MIN: &str = "yearMin";
    pub(super) const YEAR_MAX: &str = "yearMax";
    pub(super) const RANGE_X_MIN: &str = "rangeXMin";
    pub(super) const RANGE_X_MAX: &str = "rangeXMax";
    pub(super) const RANGE_Y_MIN: &str = "rangeYMin";
    pub(super) const RANGE_Y_MAX: &str = "rangeYMax";
    pub(super) const RANGE_Z_MIN: &str = "rangeZMin";
    pub(super) const RANGE_Z_MAX: &str = "rangeZMax";
    pub(super) const SORT: &str = "sort";
    pub(super) const PAGE: &str = "page";
}

/// Separator of list values.
const LIST_SEPARATOR: char = ',';

/// Parameters of a listing search, as reflected in a URL.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchParams {
    /// [`Filter`] to apply.
    pub filter: Filter,

    /// [`Sort`] order to apply.
    pub sort: Sort,

    /// 1-based number of the requested page, if any.
    pub page: Option<usize>,
}

/// Encodes the provided [`SearchParams`] into a URL query string (without
/// the leading `?`).
///
/// Absent constraints and the default [`Sort`] order are omitted, and keys
/// are always emitted in the same order.
#[must_use]
pub fn encode(params: &SearchParams) -> String {
    let SearchParams { filter, sort, page } = params;
    let mut out = form_urlencoded::Serializer::new(String::new());

    let query = filter.query.as_deref().filter(|q| !q.trim().is_empty());
    if let Some(query) = query {
        _ = out.append_pair(key::QUERY, query);
    }
    append_list(&mut out, key::MANUFACTURER, &filter.manufacturers);
    append_list(&mut out, key::CONDITION, &filter.conditions);
    append_list(&mut out, key::COUNTRY, &filter.countries);
    append_range(&mut out, [key::PRICE_MIN, key::PRICE_MAX], &filter.price);
    append_range(&mut out, [key::YEAR_MIN, key::YEAR_MAX], &filter.build_year);
    let axes = &filter.measuring_range;
    append_range(&mut out, [key::RANGE_X_MIN, key::RANGE_X_MAX], &axes.x);
    append_range(&mut out, [key::RANGE_Y_MIN, key::RANGE_Y_MAX], &axes.y);
    append_range(&mut out, [key::RANGE_Z_MIN, key::RANGE_Z_MAX], &axes.z);
    if *sort != Sort::default() {
        _ = out.append_pair(key::SORT, sort.key());
    }
    if let Some(page) = page {
        _ = out.append_pair(key::PAGE, &page.to_string());
    }

    out.finish()
}

/// Decodes [`SearchParams`] out of the provided URL query string (with or
/// without the leading `?`).
///
/// Never fails: unknown keys and malformed values are ignored, meaning no
/// constraint. Repeated list keys are merged, while for other keys the last
/// one wins.
#[must_use]
pub fn decode(query: &str) -> SearchParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = SearchParams::default();
    let filter = &mut params.filter;

    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        let v = v.as_ref();
        match k.as_ref() {
            key::QUERY => filter.query = Some(v.to_owned()),
            key::MANUFACTURER => extend_list(&mut filter.manufacturers, v),
            key::CONDITION => extend_list(&mut filter.conditions, v),
            key::COUNTRY => extend_list(&mut filter.countries, v),
            key::PRICE_MIN => filter.price.min = parse(v),
            key::PRICE_MAX => filter.price.max = parse(v),
            key::YEAR_MIN => filter.build_year.min = parse(v),
            key::YEAR_MAX => filter.build_year.max = parse(v),
            key::RANGE_X_MIN => filter.measuring_range.x.min = parse(v),
            key::RANGE_X_MAX => filter.measuring_range.x.max = parse(v),
            key::RANGE_Y_MIN => filter.measuring_range.y.min = parse(v),
            key::RANGE_Y_MAX => filter.measuring_range.y.max = parse(v),
            key::RANGE_Z_MIN => filter.measuring_range.z.min = parse(v),
            key::RANGE_Z_MAX => filter.measuring_range.z.max = parse(v),
            key::SORT => params.sort = Sort::from_key(v),
            key::PAGE => params.page = parse(v).filter(|p| *p > 0),
            _ => {}
        }
    }
    if filter.query.as_deref().is_some_and(|q| q.trim().is_empty()) {
        filter.query = None;
    }

    params
}

/// Appends the non-empty list of `values` under the provided `key`.
fn append_list<T: ToString>(
    out: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    values: &BTreeSet<T>,
) {
    if !values.is_empty() {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .join(&LIST_SEPARATOR.to_string());
        _ = out.append_pair(key, &joined);
    }
}

/// Appends the present bounds of the provided [`Range`] under the `keys`.
fn append_range<T: PartialOrd + ToString>(
    out: &mut form_urlencoded::Serializer<'_, String>,
    [min_key, max_key]: [&str; 2],
    range: &Range<T>,
) {
    if let Some(min) = &range.min {
        _ = out.append_pair(min_key, &min.to_string());
    }
    if let Some(max) = &range.max {
        _ = out.append_pair(max_key, &max.to_string());
    }
}

/// Extends the provided list with the parseable values of the
/// comma-separated `raw` ones.
fn extend_list<T: FromStr + Ord>(list: &mut BTreeSet<T>, raw: &str) {
    list.extend(raw.split(LIST_SEPARATOR).filter_map(parse));
}

/// Parses the trimmed non-empty `raw` value, if it's well-formed.
fn parse<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::Price;

    use crate::{
        domain::{listing::Condition, manufacturer},
        read::listing::{Filter, Range, Sort},
    };

    use super::{decode, encode, SearchParams};

    fn full_params() -> SearchParams {
        let mut filter = Filter {
            query: Some("Zeiss Contura & Co".into()),
            manufacturers: BTreeSet::from([
                manufacturer::Id::new(),
                manufacturer::Id::new(),
            ]),
            conditions: BTreeSet::from([Condition::LikeNew, Condition::Good]),
            countries: BTreeSet::from([
                "DE".to_owned(),
                "Österreich".to_owned(),
            ]),
            price: Range::new(
                Some(Price::from_minor(2_000_000)),
                Some(Price::from_minor(5_000_000)),
            ),
            build_year: Range::new(Some(2010), None),
            ..Filter::default()
        };
        filter.measuring_range.x = Range::new(Some(700), Some(1200));
        filter.measuring_range.z = Range::new(None, Some(600));

        SearchParams {
            filter,
            sort: Sort::PriceDesc,
            page: Some(3),
        }
    }

    #[test]
    fn round_trips() {
        for params in [
            SearchParams::default(),
            full_params(),
            SearchParams {
                sort: Sort::YearAsc,
                ..SearchParams::default()
            },
        ] {
            assert_eq!(decode(&encode(&params)), params);
        }
    }

    #[test]
    fn encodes_in_fixed_key_order() {
        let mut params = SearchParams {
            sort: Sort::DateAsc,
            page: Some(2),
            ..SearchParams::default()
        };
        params.filter.query = Some("cmm".into());
        params.filter.countries = BTreeSet::from(["DE".into(), "AT".into()]);
        params.filter.price = Range::new(None, Some(Price::from_minor(10)));

        assert_eq!(
            encode(&params),
            "q=cmm&country=AT%2CDE&priceMax=10&sort=date_asc&page=2",
        );
    }

    #[test]
    fn omits_defaults() {
        assert_eq!(encode(&SearchParams::default()), "");

        let mut params = SearchParams::default();
        params.filter.query = Some("  ".into());
        assert_eq!(encode(&params), "");
    }

    #[test]
    fn decodes_leading_question_mark_and_plus_spaces() {
        let params = decode("?q=portal+cmm&condition=NEW,like_new");

        assert_eq!(params.filter.query.as_deref(), Some("portal cmm"));
        assert_eq!(
            params.filter.conditions,
            BTreeSet::from([Condition::New, Condition::LikeNew]),
        );
    }

    #[test]
    fn ignores_malformed_values() {
        let params = decode(
            "priceMin=cheap&priceMax=-1&yearMin=20x5&rangeXMin=&page=0\
             &condition=broken,good&manufacturer=not-a-uuid&unknown=1\
             &sort=nonsense",
        );

        assert_eq!(params.filter.price, Range::default());
        assert_eq!(params.filter.build_year, Range::default());
        assert_eq!(params.filter.measuring_range.x, Range::default());
        assert_eq!(params.filter.conditions, BTreeSet::from([Condition::Good]));
        assert!(params.filter.manufacturers.is_empty());
        assert_eq!(params.sort, Sort::Relevance);
        assert_eq!(params.page, None);
    }

    #[test]
    fn merges_repeated_lists_and_overrides_scalars() {
        let params =
            decode("country=DE&country=CH,AT&yearMin=2000&yearMin=2010");

        assert_eq!(
            params.filter.countries,
            BTreeSet::from(["AT".into(), "CH".into(), "DE".into()]),
        );
        assert_eq!(params.filter.build_year.min, Some(2010));
    }

    #[test]
    fn drops_blank_query() {
        assert_eq!(decode("q=+++").filter.query, None);
        assert_eq!(decode("q=").filter.query, None);
    }
}
