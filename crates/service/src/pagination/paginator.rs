use serde::Serialize;
use tracing::debug;

use super::errors::PaginationError;
use super::store::RecordStore;
use super::view::{PageNav, ViewRenderer};
use super::CollectionId;

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// Route of the request being served, captured once when a paginator is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteContext {
    route: String,
}

impl RouteContext {
    pub fn new(route: impl Into<String>) -> Self { Self { route: route.into() } }

    pub fn route(&self) -> &str { &self.route }
}

/// Records of the current page plus the navigation data describing it.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub nav: PageNav,
}

/// Per-request pagination state.
///
/// ```
/// use service::pagination::{CollectionId, Paginator, RouteContext, store::mock::MemoryRecordStore};
/// let comments = CollectionId::new("comment");
/// let store = MemoryRecordStore::new().with_records(comments.clone(), (1..=23).collect::<Vec<u32>>());
/// let paginator = Paginator::new(&RouteContext::new("/admin/comments/:page"), "partials/pagination.html")
///     .with_collection(comments)
///     .with_limit(5).unwrap()
///     .with_page(3).unwrap();
/// assert_eq!(tokio_test::block_on(paginator.page_count(&store)).unwrap(), 5);
/// assert_eq!(tokio_test::block_on(paginator.page_data(&store)).unwrap(), vec![11, 12, 13, 14, 15]);
/// ```
#[derive(Clone, Debug)]
pub struct Paginator {
    collection: Option<CollectionId>,
    limit: u64,
    page: u64,
    route: String,
    template: String,
}

impl Paginator {
    pub fn new(ctx: &RouteContext, template: impl Into<String>) -> Self {
        Self {
            collection: None,
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            route: ctx.route().to_string(),
            template: template.into(),
        }
    }

    pub fn with_collection(mut self, collection: CollectionId) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::InvalidLimit);
        }
        self.limit = limit;
        Ok(self)
    }

    /// No upper bound is enforced; a page past the end yields no records.
    pub fn with_page(mut self, page: u64) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage);
        }
        self.page = page;
        Ok(self)
    }

    /// Route used to build navigation links instead of the captured one.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn collection(&self) -> Option<&CollectionId> { self.collection.as_ref() }
    pub fn limit(&self) -> u64 { self.limit }
    pub fn page(&self) -> u64 { self.page }
    pub fn route(&self) -> &str { &self.route }
    pub fn template(&self) -> &str { &self.template }

    pub fn offset(&self) -> u64 { super::offset(self.page, self.limit) }

    fn require_collection(&self) -> Result<&CollectionId, PaginationError> {
        self.collection.as_ref().ok_or(PaginationError::MissingCollection)
    }

    /// Total pages for the collection; re-queries the store on every call.
    pub async fn page_count<S>(&self, store: &S) -> Result<u64, PaginationError>
    where
        S: RecordStore + ?Sized,
    {
        let collection = self.require_collection()?;
        let total = store.count(collection).await?;
        let pages = super::page_count(total, self.limit);
        debug!(collection = %collection, total, limit = self.limit, pages, "page_count");
        Ok(pages)
    }

    /// Records of the current page, in the store's natural order.
    pub async fn page_data<S>(&self, store: &S) -> Result<Vec<S::Record>, PaginationError>
    where
        S: RecordStore + ?Sized,
    {
        let collection = self.require_collection()?;
        let offset = self.offset();
        let records = store.slice(collection, self.limit, offset).await?;
        debug!(collection = %collection, page = self.page, limit = self.limit, offset, returned = records.len(), "page_data");
        Ok(records)
    }

    pub fn nav(&self, pages: u64) -> PageNav {
        PageNav { page: self.page, pages, route: self.route.clone() }
    }

    /// Page count and current records in one bundle (two store round-trips).
    pub async fn fetch<S>(&self, store: &S) -> Result<Page<S::Record>, PaginationError>
    where
        S: RecordStore + ?Sized,
    {
        let pages = self.page_count(store).await?;
        let data = self.page_data(store).await?;
        Ok(Page { data, nav: self.nav(pages) })
    }

    /// Render the navigation widget for the current state into `out`.
    pub async fn render<S, V>(&self, store: &S, view: &V, out: &mut Vec<u8>) -> Result<(), PaginationError>
    where
        S: RecordStore + ?Sized,
        V: ViewRenderer + ?Sized,
    {
        let nav = self.nav(self.page_count(store).await?);
        view.render(&self.template, &nav, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use crate::pagination::errors::RenderError;
    use crate::pagination::store::mock::MemoryRecordStore;
    use crate::pagination::view::{JsonViewRenderer, DEFAULT_NAV_TEMPLATE};
    use std::sync::Mutex;

    fn ctx() -> RouteContext { RouteContext::new("/admin/comments/:page") }

    fn comments() -> CollectionId { CollectionId::new("comment") }

    fn store_with(n: u32) -> MemoryRecordStore<u32> {
        MemoryRecordStore::new().with_records(comments(), (0..n).collect())
    }

    fn paginator() -> Paginator { Paginator::new(&ctx(), DEFAULT_NAV_TEMPLATE).with_collection(comments()) }

    /// Captures what it was asked to render.
    #[derive(Default)]
    struct RecordingRenderer {
        seen: Mutex<Vec<(String, PageNav)>>,
    }

    impl ViewRenderer for RecordingRenderer {
        fn render(&self, template: &str, nav: &PageNav, out: &mut Vec<u8>) -> Result<(), RenderError> {
            self.seen.lock().unwrap().push((template.to_string(), nav.clone()));
            out.extend_from_slice(b"ok");
            Ok(())
        }
    }

    #[test]
    fn defaults() {
        let p = Paginator::new(&ctx(), "t.html");
        assert_eq!(p.limit(), 10);
        assert_eq!(p.page(), 1);
        assert_eq!(p.route(), "/admin/comments/:page");
        assert_eq!(p.template(), "t.html");
        assert!(p.collection().is_none());
    }

    #[test]
    fn zero_limit_and_page_are_rejected() {
        assert!(matches!(paginator().with_limit(0), Err(PaginationError::InvalidLimit)));
        assert!(matches!(paginator().with_page(0), Err(PaginationError::InvalidPage)));
    }

    #[tokio::test]
    async fn page_count_is_ceiling_of_total_over_limit() {
        for (total, limit, expected) in [(0u32, 10u64, 0u64), (10, 10, 1), (11, 10, 2), (1, 1, 1), (23, 5, 5)] {
            let store = store_with(total);
            let p = paginator().with_limit(limit).unwrap();
            assert_eq!(p.page_count(&store).await.unwrap(), expected, "total={total} limit={limit}");
        }
    }

    #[tokio::test]
    async fn offset_passed_to_store_is_page_minus_one_times_limit() {
        let store = store_with(100);
        for (page, limit) in [(1u64, 10u64), (2, 10), (7, 3), (4, 25)] {
            let p = paginator().with_limit(limit).unwrap().with_page(page).unwrap();
            p.page_data(&store).await.unwrap();
            assert_eq!(store.last_slice(), Some((limit, (page - 1) * limit)));
        }
    }

    #[tokio::test]
    async fn missing_collection_fails_before_any_store_call() {
        let store = store_with(5);
        let p = Paginator::new(&ctx(), DEFAULT_NAV_TEMPLATE);
        assert!(matches!(p.page_count(&store).await, Err(PaginationError::MissingCollection)));
        assert!(matches!(p.page_data(&store).await, Err(PaginationError::MissingCollection)));
        let mut out = Vec::new();
        assert!(matches!(p.render(&store, &JsonViewRenderer, &mut out).await, Err(PaginationError::MissingCollection)));
        assert_eq!(store.calls(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn render_passes_page_pages_and_route() {
        let store = store_with(23);
        let p = paginator().with_limit(5).unwrap().with_page(2).unwrap();
        let renderer = RecordingRenderer::default();
        let mut out = Vec::new();
        p.render(&store, &renderer, &mut out).await.unwrap();

        let expected_pages = p.page_count(&store).await.unwrap();
        let seen = renderer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, DEFAULT_NAV_TEMPLATE);
        assert_eq!(seen[0].1, PageNav { page: 2, pages: expected_pages, route: "/admin/comments/:page".into() });
        assert_eq!(out, b"ok");
    }

    #[tokio::test]
    async fn changing_limit_changes_results() {
        let store = store_with(23);
        let p = paginator();
        assert_eq!(p.page_count(&store).await.unwrap(), 3);
        assert_eq!(p.page_data(&store).await.unwrap().len(), 10);

        let p = p.with_limit(4).unwrap();
        assert_eq!(p.page_count(&store).await.unwrap(), 6);
        assert_eq!(p.page_data(&store).await.unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn page_count_requeries_store_each_call() {
        let store = store_with(3);
        let p = paginator();
        p.page_count(&store).await.unwrap();
        store.push(&comments(), 99);
        store.push(&comments(), 100);
        assert_eq!(p.with_limit(2).unwrap().page_count(&store).await.unwrap(), 3);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn twenty_three_records_limit_five_page_three() {
        let store = store_with(23);
        let p = paginator().with_limit(5).unwrap().with_page(3).unwrap();
        assert_eq!(p.page_count(&store).await.unwrap(), 5);
        assert_eq!(p.page_data(&store).await.unwrap(), vec![10, 11, 12, 13, 14]);
        assert_eq!(store.last_slice(), Some((5, 10)));
    }

    #[tokio::test]
    async fn empty_collection_renders_zero_pages() {
        let store = store_with(0);
        let p = paginator().with_limit(10).unwrap().with_page(1).unwrap();
        assert_eq!(p.page_count(&store).await.unwrap(), 0);
        assert!(p.page_data(&store).await.unwrap().is_empty());

        let mut out = Vec::new();
        p.render(&store, &JsonViewRenderer, &mut out).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["pages"], 0);
        assert_eq!(v["page"], 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_not_an_error() {
        let store = store_with(7);
        let p = paginator().with_limit(5).unwrap().with_page(9).unwrap();
        assert!(p.page_data(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let store: MemoryRecordStore<u32> = MemoryRecordStore::new();
        let err = paginator().page_count(&store).await.unwrap_err();
        assert!(matches!(err, PaginationError::Store(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_bundles_data_and_nav() {
        let store = store_with(12);
        let page = paginator().with_limit(5).unwrap().with_page(3).unwrap().fetch(&store).await.unwrap();
        assert_eq!(page.data, vec![10, 11]);
        assert_eq!(page.nav, PageNav { page: 3, pages: 3, route: "/admin/comments/:page".into() });
    }

    #[tokio::test]
    async fn with_route_overrides_link_base() {
        let store = store_with(12);
        let p = paginator().with_route("/admin/comments/:page").with_template("other.html");
        let renderer = RecordingRenderer::default();
        let mut out = Vec::new();
        p.render(&store, &renderer, &mut out).await.unwrap();
        let seen = renderer.seen.lock().unwrap();
        assert_eq!(seen[0].0, "other.html");
        assert_eq!(seen[0].1.link(2), "/admin/comments/2");
    }
}
