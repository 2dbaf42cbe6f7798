use bson::{DateTime, Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Database;
use pronuncia_db::models::Attempt;

use super::base::{BaseDao, DaoResult};

/// Aggregate practice statistics for one user.
#[derive(Debug, Clone, Default)]
pub struct PracticeStats {
    pub total_sessions: u64,
    pub best_accuracy: f64,
    pub practice_days: u64,
}

pub struct AttemptDao {
    pub base: BaseDao<Attempt>,
}

impl AttemptDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Attempt::COLLECTION),
        }
    }

    pub async fn record(
        &self,
        user_id: ObjectId,
        challenge_id: Option<ObjectId>,
        target_text: String,
        transcript: String,
        accuracy: f64,
        points_earned: i64,
    ) -> DaoResult<Attempt> {
        let attempt = Attempt {
            id: None,
            user_id,
            challenge_id,
            target_text,
            transcript,
            accuracy,
            points_earned,
            created_at: DateTime::now(),
        };
        let id = self.base.insert_one(&attempt).await?;
        self.base.find_by_id(id).await
    }

    /// Most recent attempts first.
    pub async fn history(&self, user_id: ObjectId, limit: i64) -> DaoResult<Vec<Attempt>> {
        self.base
            .find_many(
                doc! { "user_id": user_id },
                Some(doc! { "created_at": -1 }),
                Some(limit),
            )
            .await
    }

    /// Session count, best accuracy and distinct calendar days practiced.
    pub async fn practice_stats(&self, user_id: ObjectId) -> DaoResult<PracticeStats> {
        let pipeline = vec![
            doc! { "$match": { "user_id": user_id } },
            doc! { "$group": {
                "_id": null,
                "total_sessions": { "$sum": 1 },
                "best_accuracy": { "$max": "$accuracy" },
                "days": { "$addToSet": {
                    "$dateToString": { "format": "%Y-%m-%d", "date": "$created_at" }
                } },
            } },
        ];
        let mut cursor = self.base.collection().aggregate(pipeline).await?;
        let Some(row) = cursor.try_next().await? else {
            return Ok(PracticeStats::default());
        };
        Ok(PracticeStats {
            total_sessions: read_i64(&row, "total_sessions") as u64,
            best_accuracy: row.get_f64("best_accuracy").unwrap_or(0.0),
            practice_days: row
                .get_array("days")
                .map(|days| days.len() as u64)
                .unwrap_or(0),
        })
    }
}

// $sum may come back as i32 or i64 depending on the count.
fn read_i64(doc: &Document, key: &str) -> i64 {
    doc.get_i64(key)
        .or_else(|_| doc.get_i32(key).map(i64::from))
        .unwrap_or(0)
}
