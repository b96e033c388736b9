use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ad")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub price: f64,
    pub introduction: String,
    pub content: String,
    pub cover_image: String,
    pub rooms: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Author }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Author => Entity::belongs_to(user::Entity)
                .from(Column::AuthorId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Editable fields of an ad, shared by creation and edition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdFields {
    pub title: String,
    pub introduction: String,
    pub content: String,
    pub cover_image: String,
    pub price: f64,
    pub rooms: i32,
}

pub fn validate_url(field: &str, url: &str) -> Result<(), errors::ModelError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) || url.len() <= "https://".len() {
        return Err(errors::ModelError::Validation(format!("{field} must be a valid http(s) url")));
    }
    Ok(())
}

pub fn validate_fields(f: &AdFields) -> Result<(), errors::ModelError> {
    let title_len = f.title.trim().chars().count();
    if !(10..=255).contains(&title_len) {
        return Err(errors::ModelError::Validation("title must be between 10 and 255 characters".into()));
    }
    if f.introduction.trim().chars().count() < 20 {
        return Err(errors::ModelError::Validation("introduction must be at least 20 characters".into()));
    }
    if f.content.trim().chars().count() < 100 {
        return Err(errors::ModelError::Validation("content must be at least 100 characters".into()));
    }
    validate_url("cover_image", &f.cover_image)?;
    if !(f.price.is_finite() && f.price > 0.0) {
        return Err(errors::ModelError::Validation("price must be greater than zero".into()));
    }
    if f.rooms < 1 {
        return Err(errors::ModelError::Validation("rooms must be at least 1".into()));
    }
    Ok(())
}

/// Lowercase, accent-folded, dash-separated form of a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        let c = match c {
            'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' | 'ì' => 'i',
            'ô' | 'ö' | 'ó' | 'ò' | 'õ' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        };
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug for `title`, suffixed with a short random fragment when already taken.
pub async fn unique_slug<C: ConnectionTrait>(db: &C, title: &str) -> Result<String, errors::ModelError> {
    let base = slugify(title);
    let base = if base.is_empty() { "ad".to_string() } else { base };
    let taken = Entity::find().filter(Column::Slug.eq(base.clone())).one(db).await?;
    if taken.is_none() {
        return Ok(base);
    }
    let suffix = Uuid::new_v4().simple().to_string();
    Ok(format!("{}-{}", base, &suffix[..8]))
}

pub async fn create<C: ConnectionTrait>(db: &C, author_id: Uuid, fields: AdFields) -> Result<Model, errors::ModelError> {
    validate_fields(&fields)?;
    let slug = unique_slug(db, &fields.title).await?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        author_id: Set(author_id),
        title: Set(fields.title.trim().to_string()),
        slug: Set(slug),
        price: Set(fields.price),
        introduction: Set(fields.introduction),
        content: Set(fields.content),
        cover_image: Set(fields.cover_image),
        rooms: Set(fields.rooms),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Slug.eq(slug)).one(db).await?)
}
