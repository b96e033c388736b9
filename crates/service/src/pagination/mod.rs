//! Pagination core shared by every paginated listing.
//!
//! A [`Paginator`] is built per request from the matched route, configured with
//! the collection to page through, a page size and the current page, then asked
//! for the page count, the records of the current page, or a rendered navigation
//! widget. Records come from a [`RecordStore`]; output goes through a
//! [`ViewRenderer`]. Nothing is cached: each query goes back to the store.

pub mod errors;
pub mod paginator;
pub mod repo;
pub mod store;
pub mod view;

use std::borrow::Cow;
use std::fmt;

use sea_orm::EntityName;
use serde::Serialize;

pub use errors::{PaginationError, RenderError};
pub use paginator::{Page, Paginator, RouteContext, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use store::RecordStore;
pub use view::{HtmlNavRenderer, JsonViewRenderer, PageNav, ViewRenderer, DEFAULT_NAV_TEMPLATE};

/// Opaque name of a record collection ("comment", "booking", ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CollectionId(Cow<'static, str>);

impl CollectionId {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self { Self(name.into()) }

    /// Collection backing a SeaORM entity, named after its table.
    pub fn of<E: EntityName>() -> Self {
        Self(Cow::Owned(E::default().table_name().to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Number of pages needed to show `total` records, `limit` per page (ceiling division).
pub fn page_count(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Zero-based index of the first record of 1-indexed `page`.
pub fn offset(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(23, 5), 5);
        assert_eq!(page_count(1, 1), 1);
        assert_eq!(page_count(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn page_count_matches_ceiling_for_small_grid() {
        for limit in 1..=7u64 {
            for total in 0..=50u64 {
                let expected = (total as f64 / limit as f64).ceil() as u64;
                assert_eq!(page_count(total, limit), expected, "total={total} limit={limit}");
            }
        }
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(3, 5), 10);
        assert_eq!(offset(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn collection_of_entity_uses_table_name() {
        assert_eq!(CollectionId::of::<models::comment::Entity>().as_str(), "comment");
        assert_eq!(CollectionId::of::<models::booking::Entity>(), CollectionId::new("booking"));
        assert_eq!(CollectionId::new("ad").to_string(), "ad");
    }
}
