use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use mongodb::options::ReturnDocument;
use pronuncia_db::models::User;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    pub async fn create(&self, username: String, password_hash: String) -> DaoResult<User> {
        let user = User {
            id: None,
            username,
            password_hash,
            points: 0,
            level: 1,
            created_at: DateTime::now(),
        };
        let id = self.base.insert_one(&user).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_by_username(&self, username: &str) -> DaoResult<User> {
        self.base
            .find_one(doc! { "username": username })
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// Atomically adds `delta` to the user's points and returns the new total.
    ///
    /// Single `$inc` + read-back so concurrent attempts for the same user
    /// never lose updates.
    pub async fn increment_points(&self, user_id: ObjectId, delta: i64) -> DaoResult<i64> {
        let updated = self
            .base
            .collection()
            .find_one_and_update(doc! { "_id": user_id }, doc! { "$inc": { "points": delta } })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(DaoError::NotFound)?;
        Ok(updated.points)
    }

    /// Stores the denormalized level derived from the current point total.
    pub async fn set_level(&self, user_id: ObjectId, level: i32) -> DaoResult<bool> {
        self.base
            .update_by_id(user_id, doc! { "$set": { "level": level } })
            .await
    }

    /// Top users ordered by points descending.
    pub async fn leaderboard(&self, limit: i64) -> DaoResult<Vec<User>> {
        self.base
            .find_many(doc! {}, Some(doc! { "points": -1 }), Some(limit))
            .await
    }
}
