use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, EntityTrait, Iterable, PaginatorTrait, PrimaryKeyToColumn, QueryOrder,
    QuerySelect,
};

use crate::errors::ServiceError;
use crate::pagination::{CollectionId, RecordStore};

/// Largest offset or limit the SQL drivers bind (they take `i64`).
const MAX_BOUND: u64 = i64::MAX as u64;

/// SeaORM-backed store serving the single collection of entity `E`.
///
/// Records come back ordered by primary key so consecutive pages never overlap.
pub struct SeaOrmRecordStore<E> {
    db: DatabaseConnection,
    collection: CollectionId,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> SeaOrmRecordStore<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, collection: CollectionId::of::<E>(), _entity: PhantomData }
    }

    pub fn collection(&self) -> &CollectionId { &self.collection }

    fn ensure_served(&self, collection: &CollectionId) -> Result<(), ServiceError> {
        if collection != &self.collection {
            return Err(ServiceError::NotFound(format!(
                "collection {collection} is not served by the {} store",
                self.collection
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<E> RecordStore for SeaOrmRecordStore<E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    type Record = E::Model;

    async fn count(&self, collection: &CollectionId) -> Result<u64, ServiceError> {
        self.ensure_served(collection)?;
        E::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn slice(&self, collection: &CollectionId, limit: u64, offset: u64) -> Result<Vec<E::Model>, ServiceError> {
        self.ensure_served(collection)?;
        if offset > MAX_BOUND {
            return Ok(Vec::new());
        }
        let mut select = E::find();
        for key in E::PrimaryKey::iter() {
            select = select.order_by_asc(key.into_column());
        }
        select
            .limit(limit.min(MAX_BOUND))
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}
