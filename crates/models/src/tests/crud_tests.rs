use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{EntityTrait, ModelTrait};
use uuid::Uuid;

use super::setup_test_db;
use crate::{ad, booking, comment, image, user};

fn new_user(email: &str) -> user::NewUser {
    user::NewUser {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        email: email.into(),
        introduction: None,
        role: user::ROLE_USER.into(),
        password_hash: "$argon2id$placeholder".into(),
    }
}

fn fields(title: &str) -> ad::AdFields {
    ad::AdFields {
        title: title.into(),
        introduction: "Bright flat close to the old town".into(),
        content: "Lorem ipsum ".repeat(12),
        cover_image: "https://picsum.photos/1000/350".into(),
        price: 60.0,
        rooms: 3,
    }
}

#[tokio::test]
async fn test_user_create_and_find_by_email() -> Result<()> {
    let db = setup_test_db().await?;
    let created = user::create(&db, new_user("Jane@Example.com")).await?;
    assert_eq!(created.email, "jane@example.com");
    assert_eq!(created.full_name(), "Jane Doe");
    assert!(!created.is_admin());

    let found = user::find_by_email(&db, "JANE@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    // Email is unique
    assert!(user::create(&db, new_user("jane@example.com")).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_ad_slug_is_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let author = user::create(&db, new_user(&format!("{}@example.com", Uuid::new_v4()))).await?;

    let first = ad::create(&db, author.id, fields("Loft with a view on the river")).await?;
    assert_eq!(first.slug, "loft-with-a-view-on-the-river");
    let second = ad::create(&db, author.id, fields("Loft with a view on the river")).await?;
    assert_ne!(second.slug, first.slug);
    assert!(second.slug.starts_with("loft-with-a-view-on-the-river-"));

    let found = ad::find_by_slug(&db, &first.slug).await?;
    assert_eq!(found.map(|a| a.id), Some(first.id));
    Ok(())
}

#[tokio::test]
async fn test_images_cascade_with_ad() -> Result<()> {
    let db = setup_test_db().await?;
    let author = user::create(&db, new_user(&format!("{}@example.com", Uuid::new_v4()))).await?;
    let a = ad::create(&db, author.id, fields("Cottage at the edge of the forest")).await?;

    for n in 0..3 {
        image::attach(&db, a.id, image::ImageFields {
            url: format!("https://picsum.photos/id/{n}/200"),
            caption: format!("Picture number {n} of the cottage"),
        }).await?;
    }
    assert_eq!(image::list_for_ad(&db, a.id).await?.len(), 3);

    a.clone().delete(&db).await?;
    assert!(image::list_for_ad(&db, a.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_booking_and_comment_crud() -> Result<()> {
    let db = setup_test_db().await?;
    let author = user::create(&db, new_user(&format!("{}@example.com", Uuid::new_v4()))).await?;
    let guest = user::create(&db, new_user(&format!("{}@example.com", Uuid::new_v4()))).await?;
    let a = ad::create(&db, author.id, fields("Studio next to the central station")).await?;

    let start = NaiveDate::from_ymd_opt(2031, 7, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2031, 7, 8).unwrap();
    let b = booking::create(&db, booking::NewBooking {
        booker_id: guest.id,
        ad_id: a.id,
        start_date: start,
        end_date: end,
        amount: booking::compute_amount(a.price, start, end),
        comment: Some("Late arrival".into()),
    }).await?;
    assert_eq!(b.nights(), 7);
    assert_eq!(b.amount, 420.0);
    assert_eq!(booking::list_for_ad(&db, a.id).await?.len(), 1);

    let c = comment::create(&db, a.id, guest.id, 4, "  Lovely stay  ").await?;
    assert_eq!(c.content, "Lovely stay");
    assert!(comment::create(&db, a.id, guest.id, 9, "invalid").await.is_err());

    booking::Entity::delete_by_id(b.id).exec(&db).await?;
    assert!(booking::Entity::find_by_id(b.id).one(&db).await?.is_none());
    Ok(())
}
