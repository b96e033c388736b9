use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{ad, image};
use crate::{actor::Actor, errors::ServiceError};

/// Ad form: editable fields plus the full image gallery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdInput {
    #[serde(flatten)]
    pub fields: ad::AdFields,
    #[serde(default)]
    pub images: Vec<image::ImageFields>,
}

impl AdInput {
    fn validate(&self) -> Result<(), ServiceError> {
        ad::validate_fields(&self.fields)?;
        for img in &self.images {
            image::validate_fields(img)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdWithImages {
    #[serde(flatten)]
    pub ad: ad::Model,
    pub images: Vec<image::Model>,
}

/// All ads, oldest first.
pub async fn list_ads(db: &DatabaseConnection) -> Result<Vec<ad::Model>, ServiceError> {
    let rows = ad::Entity::find()
        .order_by_asc(ad::Column::CreatedAt)
        .order_by_asc(ad::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Persist an ad and its gallery atomically.
#[instrument(skip(db, input), fields(author_id = %author_id, title = %input.fields.title))]
pub async fn create_ad(db: &DatabaseConnection, author_id: Uuid, input: AdInput) -> Result<AdWithImages, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    let created = ad::create(&txn, author_id, input.fields).await?;
    let mut images = Vec::with_capacity(input.images.len());
    for img in input.images {
        images.push(image::attach(&txn, created.id, img).await?);
    }
    txn.commit().await?;
    info!(ad_id = %created.id, slug = %created.slug, images = images.len(), "ad_created");
    Ok(AdWithImages { ad: created, images })
}

pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> Result<AdWithImages, ServiceError> {
    let found = ad::find_by_slug(db, slug).await?.ok_or_else(|| ServiceError::not_found("ad"))?;
    let images = image::list_for_ad(db, found.id).await?;
    Ok(AdWithImages { ad: found, images })
}

async fn editable(db: &DatabaseConnection, slug: &str, actor: &Actor) -> Result<ad::Model, ServiceError> {
    let found = ad::find_by_slug(db, slug).await?.ok_or_else(|| ServiceError::not_found("ad"))?;
    if !actor.can_edit(found.author_id) {
        return Err(ServiceError::Forbidden("only the author or an admin may change this ad".into()));
    }
    Ok(found)
}

/// Replace an ad's fields and gallery. The slug is kept even when the title changes.
#[instrument(skip(db, input), fields(slug = %slug, actor = %actor.id))]
pub async fn update_ad(db: &DatabaseConnection, slug: &str, actor: &Actor, input: AdInput) -> Result<AdWithImages, ServiceError> {
    let current = editable(db, slug, actor).await?;
    input.validate()?;

    let txn = db.begin().await?;
    let ad_id = current.id;
    let mut am: ad::ActiveModel = current.into();
    am.title = Set(input.fields.title.trim().to_string());
    am.introduction = Set(input.fields.introduction);
    am.content = Set(input.fields.content);
    am.cover_image = Set(input.fields.cover_image);
    am.price = Set(input.fields.price);
    am.rooms = Set(input.fields.rooms);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await?;

    image::delete_for_ad(&txn, ad_id).await?;
    let mut images = Vec::with_capacity(input.images.len());
    for img in input.images {
        images.push(image::attach(&txn, ad_id, img).await?);
    }
    txn.commit().await?;
    info!(ad_id = %ad_id, images = images.len(), "ad_updated");
    Ok(AdWithImages { ad: updated, images })
}

/// Delete an ad; its images, bookings and comments go with it.
#[instrument(skip(db), fields(slug = %slug, actor = %actor.id))]
pub async fn delete_ad(db: &DatabaseConnection, slug: &str, actor: &Actor) -> Result<ad::Model, ServiceError> {
    let current = editable(db, slug, actor).await?;
    let txn = db.begin().await?;
    image::delete_for_ad(&txn, current.id).await?;
    ad::Entity::delete_by_id(current.id).exec(&txn).await?;
    txn.commit().await?;
    info!(ad_id = %current.id, "ad_deleted");
    Ok(current)
}
