use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{ad, errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ad_id: Uuid,
    pub author_id: Uuid,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Ad, Author }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Ad => Entity::belongs_to(ad::Entity).from(Column::AdId).to(ad::Column::Id).into(),
            Relation::Author => Entity::belongs_to(user::Entity).from(Column::AuthorId).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(rating: i32, content: &str) -> Result<(), errors::ModelError> {
    if !(0..=5).contains(&rating) {
        return Err(errors::ModelError::Validation("rating must be between 0 and 5".into()));
    }
    if content.trim().is_empty() {
        return Err(errors::ModelError::Validation("comment content required".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    ad_id: Uuid,
    author_id: Uuid,
    rating: i32,
    content: &str,
) -> Result<Model, errors::ModelError> {
    validate(rating, content)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        ad_id: Set(ad_id),
        author_id: Set(author_id),
        rating: Set(rating),
        content: Set(content.trim().to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
