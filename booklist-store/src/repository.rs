//! Typed access to a collection.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

use crate::{Collection, Filter, Record, RecordId, Result, SharedStore, StoreError};

/// A serde type stored in one collection.
///
/// The decoded document carries the record identifier under `id`, so
/// entities declare an `id` field to receive it.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
}

/// Converts between an entity type and the records of its collection.
pub struct Repository<T> {
    store: SharedStore,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub async fn find_by_id(&self, id: impl Into<RecordId>) -> Result<Option<T>> {
        let id = id.into();
        self.store
            .find_by_id(T::COLLECTION, &id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>> {
        self.store
            .find_where(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn all(&self) -> Result<Vec<T>> {
        self.find(&Filter::all()).await
    }

    /// Persist `new` and return the stored entity with its assigned id.
    pub async fn insert<N>(&self, new: &N) -> Result<T>
    where
        N: Serialize + Sync + ?Sized,
    {
        let Value::Object(fields) = serde_json::to_value(new)? else {
            return Err(StoreError::Serialization(serde::ser::Error::custom(format!(
                "{} records must serialize to an object",
                T::COLLECTION
            ))));
        };

        let record = self.store.insert(T::COLLECTION, fields).await?;
        decode(record)
    }
}

fn decode<T: Entity>(record: Record) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(record.into_document()))?)
}
