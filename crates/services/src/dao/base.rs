use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub type DaoResult<T> = Result<T, DaoError>;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("Resource not found")]
    NotFound,
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Validation: {0}")]
    Validation(String),
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error(transparent)]
    BsonSer(#[from] bson::ser::Error),
    #[error(transparent)]
    BsonDe(#[from] bson::de::Error),
}

/// Returns true when the underlying mongo error is a unique-index violation.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref we)) => we.code == 11000,
        ErrorKind::Command(ref ce) => ce.code == 11000,
        _ => false,
    }
}

/// Generic CRUD wrapper around one typed collection.
pub struct BaseDao<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T: Send + Sync> BaseDao<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection::<T>(collection),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    pub async fn insert_one(&self, item: &T) -> DaoResult<ObjectId> {
        let result = self.collection.insert_one(item).await.map_err(|e| {
            if is_duplicate_key(&e) {
                DaoError::DuplicateKey(e.to_string())
            } else {
                DaoError::Mongo(e)
            }
        })?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DaoError::Validation("Inserted id is not an ObjectId".to_string()))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> DaoResult<T> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn find_one(&self, filter: Document) -> DaoResult<Option<T>> {
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn find_many(
        &self,
        filter: Document,
        sort: Option<Document>,
        limit: Option<i64>,
    ) -> DaoResult<Vec<T>> {
        let mut find = self.collection.find(filter);
        if let Some(sort) = sort {
            find = find.sort(sort);
        }
        if let Some(limit) = limit {
            find = find.limit(limit);
        }
        Ok(find.await?.try_collect().await?)
    }

    pub async fn update_by_id(&self, id: ObjectId, update: Document) -> DaoResult<bool> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update)
            .await?;
        Ok(result.modified_count > 0)
    }

    pub async fn count(&self, filter: Document) -> DaoResult<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_write_errors_are_not_duplicate_keys() {
        let err = mongodb::error::Error::custom("connection reset");
        assert!(!is_duplicate_key(&err));
    }
}
