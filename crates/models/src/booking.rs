use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{ad, errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub booker_id: Uuid,
    pub ad_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub amount: f64,
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Booker, Ad }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Booker => Entity::belongs_to(user::Entity).from(Column::BookerId).to(user::Column::Id).into(),
            Relation::Ad => Entity::belongs_to(ad::Entity).from(Column::AdId).to(ad::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn nights(&self) -> i64 { nights(self.start_date, self.end_date) }
}

/// Number of nights between arrival and departure.
pub fn nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Price of a stay: nightly price times the number of nights.
pub fn compute_amount(price: f64, start: NaiveDate, end: NaiveDate) -> f64 {
    price * nights(start, end).max(0) as f64
}

pub fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<(), errors::ModelError> {
    if end <= start {
        return Err(errors::ModelError::Validation("departure date must be after arrival date".into()));
    }
    Ok(())
}

/// Two stays conflict when they share at least one day, boundaries included.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && b_start <= a_end
}

pub struct NewBooking {
    pub booker_id: Uuid,
    pub ad_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub amount: f64,
    pub comment: Option<String>,
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewBooking) -> Result<Model, errors::ModelError> {
    validate_dates(input.start_date, input.end_date)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        booker_id: Set(input.booker_id),
        ad_id: Set(input.ad_id),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        amount: Set(input.amount),
        comment: Set(input.comment),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_for_ad<C: ConnectionTrait>(db: &C, ad_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::AdId.eq(ad_id)).all(db).await?)
}
