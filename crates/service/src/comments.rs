use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{ad, comment};
use crate::errors::ServiceError;
use crate::pagination::{
    repo::SeaOrmRecordStore, CollectionId, Page, PaginationError, Paginator, RouteContext, ViewRenderer,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentInput {
    pub rating: i32,
    pub content: String,
}

#[instrument(skip(db, input), fields(slug = %slug, author_id = %author_id, rating = input.rating))]
pub async fn add_comment(db: &DatabaseConnection, slug: &str, author_id: Uuid, input: CommentInput) -> Result<comment::Model, ServiceError> {
    comment::validate(input.rating, &input.content)?;
    let target = ad::find_by_slug(db, slug).await?.ok_or_else(|| ServiceError::not_found("ad"))?;
    let created = comment::create(db, target.id, author_id, input.rating, &input.content).await?;
    info!(comment_id = %created.id, ad_id = %target.id, "comment_created");
    Ok(created)
}

pub async fn get_comment(db: &DatabaseConnection, id: Uuid) -> Result<comment::Model, ServiceError> {
    comment::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("comment"))
}

#[instrument(skip(db, input), fields(comment_id = %id))]
pub async fn update_comment(db: &DatabaseConnection, id: Uuid, input: CommentInput) -> Result<comment::Model, ServiceError> {
    comment::validate(input.rating, &input.content)?;
    let mut am: comment::ActiveModel = get_comment(db, id).await?.into();
    am.rating = Set(input.rating);
    am.content = Set(input.content.trim().to_string());
    let updated = am.update(db).await?;
    info!(comment_id = %id, "comment_updated");
    Ok(updated)
}

pub async fn delete_comment(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = comment::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("comment"));
    }
    info!(comment_id = %id, "comment_deleted");
    Ok(())
}

fn admin_paginator(route: &RouteContext, template: &str, page: u64, limit: u64) -> Result<Paginator, PaginationError> {
    Paginator::new(route, template)
        .with_collection(CollectionId::of::<comment::Entity>())
        .with_limit(limit)?
        .with_page(page)
}

/// One page of the back-office comment list.
pub async fn admin_page(
    db: &DatabaseConnection,
    route: &RouteContext,
    template: &str,
    page: u64,
    limit: u64,
) -> Result<Page<comment::Model>, PaginationError> {
    let store = SeaOrmRecordStore::<comment::Entity>::new(db.clone());
    admin_paginator(route, template, page, limit)?.fetch(&store).await
}

/// Navigation widget of the back-office comment list, rendered by `view`.
pub async fn admin_nav<V: ViewRenderer + ?Sized>(
    db: &DatabaseConnection,
    view: &V,
    route: &RouteContext,
    template: &str,
    page: u64,
    limit: u64,
) -> Result<Vec<u8>, PaginationError> {
    let store = SeaOrmRecordStore::<comment::Entity>::new(db.clone());
    let mut out = Vec::new();
    admin_paginator(route, template, page, limit)?.render(&store, view, &mut out).await?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{HtmlNavRenderer, DEFAULT_NAV_TEMPLATE};
    use crate::test_support::{get_db, seed_ad, seed_user};

    fn input(rating: i32, content: &str) -> CommentInput { CommentInput { rating, content: content.into() } }

    #[tokio::test]
    async fn comment_lifecycle() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let visitor = seed_user(&db, "visitor@example.com").await?;
        let listing = seed_ad(&db, visitor.id, "Seaside villa with a pool").await?;

        let c = add_comment(&db, &listing.slug, visitor.id, input(4, "  Lovely stay  ")).await?;
        assert_eq!(c.content, "Lovely stay");
        assert_eq!(c.ad_id, listing.id);

        let edited = update_comment(&db, c.id, input(2, "Noisy at night")).await?;
        assert_eq!(edited.rating, 2);
        assert_eq!(get_comment(&db, c.id).await?.content, "Noisy at night");

        delete_comment(&db, c.id).await?;
        assert!(matches!(get_comment(&db, c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn rejects_out_of_range_rating_and_unknown_ad() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let visitor = seed_user(&db, "visitor@example.com").await?;
        let listing = seed_ad(&db, visitor.id, "Seaside villa with a pool").await?;
        assert!(add_comment(&db, &listing.slug, visitor.id, input(6, "Too good")).await.unwrap_err().is_validation());
        assert!(add_comment(&db, &listing.slug, visitor.id, input(3, "   ")).await.unwrap_err().is_validation());
        let missing = add_comment(&db, "nowhere", visitor.id, input(3, "Fine")).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn admin_page_of_twenty_three_comments() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let visitor = seed_user(&db, "visitor@example.com").await?;
        let listing = seed_ad(&db, visitor.id, "Seaside villa with a pool").await?;
        for n in 0..23 {
            add_comment(&db, &listing.slug, visitor.id, input(n % 6, &format!("comment {n}"))).await?;
        }

        let ctx = RouteContext::new("/admin/comments/:page");
        let mut seen = std::collections::HashSet::new();
        for page in 1..=5 {
            let p = admin_page(&db, &ctx, DEFAULT_NAV_TEMPLATE, page, 5).await?;
            assert_eq!(p.nav.pages, 5);
            assert_eq!(p.data.len(), if page == 5 { 3 } else { 5 });
            seen.extend(p.data.into_iter().map(|c| c.id));
        }
        assert_eq!(seen.len(), 23);
        assert!(admin_page(&db, &ctx, DEFAULT_NAV_TEMPLATE, 6, 5).await?.data.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn admin_page_far_past_the_end_is_empty() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let visitor = seed_user(&db, "visitor@example.com").await?;
        let listing = seed_ad(&db, visitor.id, "Seaside villa with a pool").await?;
        add_comment(&db, &listing.slug, visitor.id, input(4, "quiet and clean")).await?;

        let ctx = RouteContext::new("/admin/comments/:page");
        for page in [u64::MAX / 2, u64::MAX] {
            let p = admin_page(&db, &ctx, DEFAULT_NAV_TEMPLATE, page, 5).await?;
            assert!(p.data.is_empty());
            assert_eq!(p.nav.pages, 1);
        }
        Ok(())
    }

    #[tokio::test]
    async fn admin_nav_renders_html() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let visitor = seed_user(&db, "visitor@example.com").await?;
        let listing = seed_ad(&db, visitor.id, "Seaside villa with a pool").await?;
        for n in 0..7 {
            add_comment(&db, &listing.slug, visitor.id, input(5, &format!("great {n}"))).await?;
        }
        let ctx = RouteContext::new("/admin/comments/:page");
        let html = admin_nav(&db, &HtmlNavRenderer::default(), &ctx, DEFAULT_NAV_TEMPLATE, 2, 5).await?;
        let html = String::from_utf8(html)?;
        assert!(html.contains(r#"href="/admin/comments/1""#));
        assert!(html.contains(r#"<li class="page-item active"><a class="page-link" href="/admin/comments/2">2</a></li>"#));

        let err = admin_nav(&db, &HtmlNavRenderer::default(), &ctx, "unknown.html", 1, 5).await.unwrap_err();
        assert!(matches!(err, PaginationError::Render(_)));
        Ok(())
    }
}
