//! Listings comparison definitions.

use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

use super::listing;

/// Default capacity of a [`Selection`].
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// Ordered, capacity-bounded set of [`listing::Id`]s a client has picked for
/// a side-by-side comparison.
///
/// All the operations are total: adding a duplicate or adding to a full
/// [`Selection`] as well as removing a missing item are no-ops.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Selected [`listing::Id`]s in their insertion order.
    items: Vec<listing::Id>,

    /// Maximum number of items in this [`Selection`].
    max_items: usize,
}

impl Selection {
    /// Creates a new empty [`Selection`] of the provided capacity.
    #[must_use]
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Vec::with_capacity(max_items),
            max_items,
        }
    }

    /// Re-bounds this [`Selection`] to the provided capacity, keeping as many
    /// of the first selected items as fit and dropping duplicates.
    #[must_use]
    pub fn with_max_items(self, max_items: usize) -> Self {
        let mut this = Self::new(max_items);
        for id in self.items {
            _ = this.add(id);
        }
        this
    }

    /// Appends the provided `id`, unless it's already present or this
    /// [`Selection`] is full.
    ///
    /// Returns whether this [`Selection`] has changed.
    pub fn add(&mut self, id: listing::Id) -> bool {
        if self.is_full() || self.contains(id) {
            return false;
        }
        self.items.push(id);
        true
    }

    /// Removes the provided `id`, if present.
    ///
    /// Returns whether this [`Selection`] has changed.
    pub fn remove(&mut self, id: listing::Id) -> bool {
        let len = self.items.len();
        self.items.retain(|i| *i != id);
        self.items.len() != len
    }

    /// Removes all the items.
    ///
    /// Returns whether this [`Selection`] has changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Returns the selected [`listing::Id`]s in their insertion order.
    #[must_use]
    pub fn items(&self) -> &[listing::Id] {
        &self.items
    }

    /// Returns the number of selected items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the capacity of this [`Selection`].
    #[must_use]
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Indicates whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indicates whether no more items can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_items
    }

    /// Indicates whether the provided `id` is selected.
    #[must_use]
    pub fn contains(&self, id: listing::Id) -> bool {
        self.items.contains(&id)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS)
    }
}

/// Key a client's [`Selection`] is persisted under.
///
/// Consists of the `compare-listings:` prefix and a client identifier of
/// ASCII alphanumerics, `-` and `_` only, so it's safe to be used as a file
/// name.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Key(String);

impl Key {
    /// Prefix of every [`Key`].
    pub const PREFIX: &'static str = "compare-listings:";

    /// Maximum length of a client identifier.
    pub const MAX_CLIENT_LEN: usize = 128;

    /// Creates a new [`Key`] for the provided `client` identifier, if it's
    /// valid.
    #[must_use]
    pub fn for_client(client: &str) -> Option<Self> {
        let valid = !client.is_empty()
            && client.len() <= Self::MAX_CLIENT_LEN
            && client
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self(format!("{}{client}", Self::PREFIX)))
    }

    /// Returns the client identifier part of this [`Key`].
    #[must_use]
    pub fn client(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }
}

#[cfg(test)]
mod spec {
    use super::{listing, Key, Selection};

    fn ids<const N: usize>() -> [listing::Id; N] {
        std::array::from_fn(|_| listing::Id::new())
    }

    #[test]
    fn adds_in_insertion_order() {
        let [a, b, c] = ids();
        let mut selection = Selection::new(4);

        assert!(selection.add(b));
        assert!(selection.add(a));
        assert!(selection.add(c));

        assert_eq!(selection.items(), [b, a, c]);
        assert_eq!(selection.count(), 3);
        assert!(!selection.is_full());
    }

    #[test]
    fn ignores_adding_beyond_capacity() {
        let [a, b, c, d, e] = ids();
        let mut selection = Selection::new(4);
        for id in [a, b, c, d] {
            assert!(selection.add(id));
        }
        assert!(selection.is_full());

        assert!(!selection.add(e));

        assert_eq!(selection.items(), [a, b, c, d]);
        assert!(!selection.contains(e));
    }

    #[test]
    fn adding_is_idempotent() {
        let [x] = ids();
        let mut selection = Selection::new(4);

        assert!(selection.add(x));
        assert!(!selection.add(x));

        assert_eq!(selection.items(), [x]);
    }

    #[test]
    fn removes_and_clears() {
        let [a, b, c] = ids();
        let mut selection = Selection::new(3);
        for id in [a, b, c] {
            _ = selection.add(id);
        }

        assert!(selection.remove(b));
        assert!(!selection.remove(b));
        assert_eq!(selection.items(), [a, c]);
        assert!(!selection.is_full());

        assert!(selection.clear());
        assert!(!selection.clear());
        assert!(selection.is_empty());
        assert_eq!(selection.max_items(), 3);
    }

    #[test]
    fn rebounds_to_smaller_capacity() {
        let [a, b, c, d] = ids();
        let mut selection = Selection::new(4);
        for id in [a, b, c, d] {
            _ = selection.add(id);
        }

        let selection = selection.with_max_items(2);

        assert_eq!(selection.items(), [a, b]);
        assert!(selection.is_full());
    }

    #[test]
    fn serializes_items_with_capacity() {
        let [a] = ids();
        let mut selection = Selection::new(4);
        _ = selection.add(a);

        let json = serde_json::to_value(&selection).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"items": [a.to_string()], "maxItems": 4}),
        );
        assert_eq!(
            serde_json::from_value::<Selection>(json).unwrap(),
            selection,
        );
    }

    #[test]
    fn validates_client_keys() {
        let key = Key::for_client("browser-42_a").unwrap();

        assert_eq!(AsRef::<str>::as_ref(&key), "compare-listings:browser-42_a");
        assert_eq!(key.client(), "browser-42_a");

        assert!(Key::for_client("").is_none());
        assert!(Key::for_client("../etc/passwd").is_none());
        assert!(Key::for_client("with space").is_none());
        assert!(Key::for_client(&"a".repeat(129)).is_none());
    }
}
