use bson::{DateTime, Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::options::ReturnDocument;
use pronuncia_db::models::ChallengeCompletion;

use super::base::{BaseDao, DaoResult};

/// Challenges won per difficulty tier, counting completions at or above
/// the winning accuracy threshold.
#[derive(Debug, Clone, Default)]
pub struct WonCounts {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

pub struct CompletionDao {
    pub base: BaseDao<ChallengeCompletion>,
    win_threshold: f64,
}

impl CompletionDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, ChallengeCompletion::COLLECTION),
            win_threshold: 80.0,
        }
    }

    /// Records a completion, keeping only the best accuracy per
    /// (user, challenge) pair. The unique index on that pair makes the
    /// upsert race-safe.
    pub async fn record_best(
        &self,
        user_id: ObjectId,
        challenge_id: ObjectId,
        accuracy: f64,
        points_earned: i64,
    ) -> DaoResult<ChallengeCompletion> {
        let updated = self
            .base
            .collection()
            .find_one_and_update(
                doc! {
                    "user_id": user_id,
                    "challenge_id": challenge_id,
                    "accuracy": { "$lt": accuracy },
                },
                doc! {
                    "$set": {
                        "accuracy": accuracy,
                        "points_earned": points_earned,
                        "completed_at": DateTime::now(),
                    },
                    "$setOnInsert": {
                        "user_id": user_id,
                        "challenge_id": challenge_id,
                    },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await;
        match updated {
            Ok(Some(completion)) => Ok(completion),
            // The upsert collided with an existing record of equal or
            // better accuracy; return that record. Anything else is a
            // real failure and propagates.
            Ok(None) => self.fetch_existing(user_id, challenge_id).await,
            Err(e) if super::base::is_duplicate_key(&e) => {
                self.fetch_existing(user_id, challenge_id).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_existing(
        &self,
        user_id: ObjectId,
        challenge_id: ObjectId,
    ) -> DaoResult<ChallengeCompletion> {
        self.base
            .find_one(doc! { "user_id": user_id, "challenge_id": challenge_id })
            .await?
            .ok_or(super::base::DaoError::NotFound)
    }

    pub async fn completed_ids(&self, user_id: ObjectId) -> DaoResult<Vec<ObjectId>> {
        let completions = self
            .base
            .find_many(doc! { "user_id": user_id }, None, None)
            .await?;
        Ok(completions.into_iter().map(|c| c.challenge_id).collect())
    }

    /// Won-challenge counts per difficulty for the profile view.
    pub async fn won_counts(&self, user_id: ObjectId) -> DaoResult<WonCounts> {
        let pipeline = vec![
            doc! { "$match": {
                "user_id": user_id,
                "accuracy": { "$gte": self.win_threshold },
            } },
            doc! { "$lookup": {
                "from": "challenges",
                "localField": "challenge_id",
                "foreignField": "_id",
                "as": "challenge",
            } },
            doc! { "$unwind": "$challenge" },
            doc! { "$group": {
                "_id": "$challenge.difficulty",
                "count": { "$sum": 1 },
            } },
        ];
        let mut cursor = self.base.collection().aggregate(pipeline).await?;
        let mut counts = WonCounts::default();
        while let Some(row) = cursor.try_next().await? {
            let count = read_i64(&row, "count") as u64;
            match row.get_str("_id").unwrap_or_default() {
                "easy" => counts.easy = count,
                "medium" => counts.medium = count,
                "hard" => counts.hard = count,
                _ => {}
            }
        }
        Ok(counts)
    }
}

fn read_i64(doc: &Document, key: &str) -> i64 {
    doc.get_i64(key)
        .or_else(|_| doc.get_i32(key).map(i64::from))
        .unwrap_or(0)
}
