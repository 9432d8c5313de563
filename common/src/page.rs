//! Abstractions for offset pagination.

/// Requested page of a result list.
///
/// Page numbers are 1-based.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pagination {
    /// Number of the requested page.
    number: usize,

    /// Maximum number of items on a page.
    size: usize,
}

impl Pagination {
    /// Creates a new [`Pagination`] out of the optional client input.
    ///
    /// Missing or zero `number` means the first page. Missing `size` falls
    /// back to the `default` one, and any size is clamped to `1..=max`.
    #[must_use]
    pub fn new(
        number: Option<usize>,
        size: Option<usize>,
        default: usize,
        max: usize,
    ) -> Self {
        let max = max.max(1);
        Self {
            number: number.unwrap_or(1).max(1),
            size: size.unwrap_or(default).clamp(1, max),
        }
    }

    /// Returns the 1-based number of the requested page.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Returns the maximum number of items on the requested page.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }

    /// Cuts the requested [`Page`] out of all the `items`.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total_count = items.len();
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.size)
            .collect();
        Page {
            items,
            total_count,
            pagination: *self,
        }
    }
}

/// Single page of a result list.
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Total number of items across all the pages.
    pub total_count: usize,

    /// [`Pagination`] this [`Page`] was cut with.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Returns total number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total_count.div_ceil(self.pagination.size)
    }

    /// Indicates whether there is a page after this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.pagination.number < self.page_count()
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Pagination;

    #[test]
    fn clamps_input() {
        let p = Pagination::new(None, None, 20, 100);
        assert_eq!((p.number(), p.size()), (1, 20));

        let p = Pagination::new(Some(0), Some(0), 20, 100);
        assert_eq!((p.number(), p.size()), (1, 1));

        let p = Pagination::new(Some(3), Some(1000), 20, 100);
        assert_eq!((p.number(), p.size()), (3, 100));
    }

    #[test]
    fn cuts_requested_page() {
        let page = Pagination::new(Some(2), Some(3), 20, 100)
            .paginate((1..=8).collect::<Vec<_>>());

        assert_eq!(page.items, [4, 5, 6]);
        assert_eq!(page.total_count, 8);
        assert_eq!(page.page_count(), 3);
        assert!(page.has_next_page());
    }

    #[test]
    fn empty_beyond_last_page() {
        let page = Pagination::new(Some(5), Some(3), 20, 100)
            .paginate((1..=8).collect::<Vec<_>>());

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 8);
        assert!(!page.has_next_page());
    }
}
