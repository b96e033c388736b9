use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::{ad, booking};
use crate::errors::ServiceError;
use crate::pagination::{repo::SeaOrmRecordStore, CollectionId, Page, PaginationError, Paginator, RouteContext};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Book `slug` for the given stay. `today` bounds the arrival date from below.
#[instrument(skip(db, input), fields(slug = %slug, booker_id = %booker_id, start = %input.start_date, end = %input.end_date))]
pub async fn book_ad_on(
    db: &DatabaseConnection,
    slug: &str,
    booker_id: Uuid,
    input: BookingInput,
    today: NaiveDate,
) -> Result<booking::Model, ServiceError> {
    booking::validate_dates(input.start_date, input.end_date)?;
    if input.start_date < today {
        return Err(ServiceError::Validation("arrival date must not be in the past".into()));
    }
    let target = ad::find_by_slug(db, slug).await?.ok_or_else(|| ServiceError::not_found("ad"))?;

    let taken = booking::list_for_ad(db, target.id).await?;
    if let Some(clash) = taken
        .iter()
        .find(|b| booking::overlaps(b.start_date, b.end_date, input.start_date, input.end_date))
    {
        warn!(ad_id = %target.id, existing = %clash.id, "booking_dates_unavailable");
        return Err(ServiceError::Conflict("the chosen dates are not available for this ad".into()));
    }

    let created = booking::create(db, booking::NewBooking {
        booker_id,
        ad_id: target.id,
        start_date: input.start_date,
        end_date: input.end_date,
        amount: booking::compute_amount(target.price, input.start_date, input.end_date),
        comment: input.comment.filter(|c| !c.trim().is_empty()),
    }).await?;
    info!(booking_id = %created.id, amount = created.amount, "booking_created");
    Ok(created)
}

pub async fn book_ad(db: &DatabaseConnection, slug: &str, booker_id: Uuid, input: BookingInput) -> Result<booking::Model, ServiceError> {
    book_ad_on(db, slug, booker_id, input, Utc::now().date_naive()).await
}

pub async fn get_booking(db: &DatabaseConnection, id: Uuid) -> Result<booking::Model, ServiceError> {
    booking::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("booking"))
}

/// Admin edit: new dates and comment, amount recomputed from the ad's price.
#[instrument(skip(db, input), fields(booking_id = %id))]
pub async fn update_booking(db: &DatabaseConnection, id: Uuid, input: BookingInput) -> Result<booking::Model, ServiceError> {
    booking::validate_dates(input.start_date, input.end_date)?;
    let current = get_booking(db, id).await?;
    let price = ad::Entity::find_by_id(current.ad_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("ad"))?
        .price;

    let mut am: booking::ActiveModel = current.into();
    am.start_date = Set(input.start_date);
    am.end_date = Set(input.end_date);
    am.comment = Set(input.comment.filter(|c| !c.trim().is_empty()));
    am.amount = Set(booking::compute_amount(price, input.start_date, input.end_date));
    let updated = am.update(db).await?;
    info!(booking_id = %id, amount = updated.amount, "booking_updated");
    Ok(updated)
}

pub async fn delete_booking(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = booking::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("booking"));
    }
    info!(booking_id = %id, "booking_deleted");
    Ok(())
}

/// One page of the back-office booking list.
pub async fn admin_page(
    db: &DatabaseConnection,
    route: &RouteContext,
    template: &str,
    page: u64,
    limit: u64,
) -> Result<Page<booking::Model>, PaginationError> {
    let store = SeaOrmRecordStore::<booking::Entity>::new(db.clone());
    Paginator::new(route, template)
        .with_collection(CollectionId::of::<booking::Entity>())
        .with_limit(limit)?
        .with_page(page)?
        .fetch(&store)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_ad, seed_user};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

    fn stay(start: NaiveDate, end: NaiveDate) -> BookingInput {
        BookingInput { start_date: start, end_date: end, comment: None }
    }

    #[tokio::test]
    async fn booking_computes_amount_from_nights() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let guest = seed_user(&db, "guest@example.com").await?;
        let listing = seed_ad(&db, guest.id, "Seaside villa with a pool").await?;

        let b = book_ad_on(&db, &listing.slug, guest.id, stay(d(2030, 7, 1), d(2030, 7, 5)), d(2030, 1, 1)).await?;
        assert_eq!(b.nights(), 4);
        assert_eq!(b.amount, 4.0 * listing.price);
        assert_eq!(get_booking(&db, b.id).await?.id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_bad_dates() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let guest = seed_user(&db, "guest@example.com").await?;
        let listing = seed_ad(&db, guest.id, "Seaside villa with a pool").await?;

        let backwards = book_ad_on(&db, &listing.slug, guest.id, stay(d(2030, 7, 5), d(2030, 7, 1)), d(2030, 1, 1)).await;
        assert!(backwards.unwrap_err().is_validation());
        let past = book_ad_on(&db, &listing.slug, guest.id, stay(d(2029, 7, 1), d(2029, 7, 5)), d(2030, 1, 1)).await;
        assert!(matches!(past, Err(ServiceError::Validation(_))));
        let missing = book_ad_on(&db, "no-such-ad", guest.id, stay(d(2030, 7, 1), d(2030, 7, 5)), d(2030, 1, 1)).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn overlapping_stays_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let guest = seed_user(&db, "guest@example.com").await?;
        let listing = seed_ad(&db, guest.id, "Seaside villa with a pool").await?;
        let today = d(2030, 1, 1);

        book_ad_on(&db, &listing.slug, guest.id, stay(d(2030, 7, 1), d(2030, 7, 5)), today).await?;
        let clash = book_ad_on(&db, &listing.slug, guest.id, stay(d(2030, 7, 5), d(2030, 7, 8)), today).await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));
        book_ad_on(&db, &listing.slug, guest.id, stay(d(2030, 7, 6), d(2030, 7, 8)), today).await?;
        Ok(())
    }

    #[tokio::test]
    async fn admin_update_recomputes_amount_and_delete_removes() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let guest = seed_user(&db, "guest@example.com").await?;
        let listing = seed_ad(&db, guest.id, "Seaside villa with a pool").await?;
        let b = book_ad_on(&db, &listing.slug, guest.id, stay(d(2030, 7, 1), d(2030, 7, 3)), d(2030, 1, 1)).await?;

        let edited = update_booking(&db, b.id, BookingInput { start_date: d(2030, 8, 1), end_date: d(2030, 8, 11), comment: Some("late arrival".into()) }).await?;
        assert_eq!(edited.amount, 10.0 * listing.price);
        assert_eq!(edited.comment.as_deref(), Some("late arrival"));

        delete_booking(&db, b.id).await?;
        assert!(matches!(get_booking(&db, b.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_booking(&db, b.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn admin_page_walks_bookings() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let guest = seed_user(&db, "guest@example.com").await?;
        let listing = seed_ad(&db, guest.id, "Seaside villa with a pool").await?;
        for week in 0..12u32 {
            let start = d(2030, 1, 1) + chrono::Duration::days(i64::from(week) * 7);
            book_ad_on(&db, &listing.slug, guest.id, stay(start, start + chrono::Duration::days(2)), d(2030, 1, 1)).await?;
        }

        let ctx = RouteContext::new("/admin/bookings/:page");
        let page = admin_page(&db, &ctx, "partials/pagination.html", 2, 10).await?;
        assert_eq!(page.nav.pages, 2);
        assert_eq!(page.nav.page, 2);
        assert_eq!(page.data.len(), 2);

        let err = admin_page(&db, &ctx, "partials/pagination.html", 0, 10).await.unwrap_err();
        assert!(matches!(err, PaginationError::InvalidPage));
        Ok(())
    }
}
