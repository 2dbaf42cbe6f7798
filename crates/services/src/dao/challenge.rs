use bson::{doc, oid::ObjectId};
use mongodb::Database;
use pronuncia_db::models::{Challenge, Difficulty};
use tracing::info;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct ChallengeDao {
    pub base: BaseDao<Challenge>,
}

impl ChallengeDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Challenge::COLLECTION),
        }
    }

    pub async fn find_by_id(&self, challenge_id: ObjectId) -> DaoResult<Challenge> {
        self.base.find_by_id(challenge_id).await
    }

    pub async fn list_by_difficulty(&self, difficulty: Difficulty) -> DaoResult<Vec<Challenge>> {
        self.base
            .find_many(
                doc! { "difficulty": difficulty.as_str() },
                Some(doc! { "word": 1 }),
                None,
            )
            .await
    }

    /// Inserts the default catalog if the collection is empty.
    pub async fn seed_defaults(&self) -> DaoResult<usize> {
        if self.base.count(doc! {}).await? > 0 {
            return Ok(0);
        }
        let defaults = Challenge::defaults();
        for challenge in &defaults {
            match self.base.insert_one(challenge).await {
                Ok(_) => {}
                // Another instance seeded concurrently; not a failure.
                Err(DaoError::DuplicateKey(_)) => {}
                Err(e) => return Err(e),
            }
        }
        info!(count = defaults.len(), "Seeded default challenges");
        Ok(defaults.len())
    }
}
