use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{ad, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ad_id: Uuid,
    pub url: String,
    pub caption: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Ad }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Ad => Entity::belongs_to(ad::Entity)
                .from(Column::AdId)
                .to(ad::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One entry of an ad's image gallery as submitted by the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageFields {
    pub url: String,
    pub caption: String,
}

pub fn validate_fields(f: &ImageFields) -> Result<(), errors::ModelError> {
    ad::validate_url("image url", &f.url)?;
    if f.caption.trim().chars().count() < 10 {
        return Err(errors::ModelError::Validation("image caption must be at least 10 characters".into()));
    }
    Ok(())
}

pub async fn attach<C: ConnectionTrait>(db: &C, ad_id: Uuid, fields: ImageFields) -> Result<Model, errors::ModelError> {
    validate_fields(&fields)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        ad_id: Set(ad_id),
        url: Set(fields.url),
        caption: Set(fields.caption),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_for_ad<C: ConnectionTrait>(db: &C, ad_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::AdId.eq(ad_id))
        .all(db)
        .await?)
}

pub async fn delete_for_ad<C: ConnectionTrait>(db: &C, ad_id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many().filter(Column::AdId.eq(ad_id)).exec(db).await?;
    Ok(res.rows_affected)
}
