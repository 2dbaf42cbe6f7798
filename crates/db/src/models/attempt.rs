use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// One completed pronunciation attempt (free practice or challenge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    /// Set when the attempt targeted a challenge word.
    pub challenge_id: Option<ObjectId>,
    pub target_text: String,
    pub transcript: String,
    /// Phonetic accuracy in [0, 100], rounded to 2 decimals.
    pub accuracy: f64,
    pub points_earned: i64,
    pub created_at: DateTime,
}

impl Attempt {
    pub const COLLECTION: &'static str = "attempts";
}

/// Latest completion snapshot per (user, challenge) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeCompletion {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub challenge_id: ObjectId,
    pub accuracy: f64,
    pub points_earned: i64,
    pub completed_at: DateTime,
}

impl ChallengeCompletion {
    pub const COLLECTION: &'static str = "challenge_completions";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_round_trips_through_bson() {
        let attempt = Attempt {
            id: None,
            user_id: ObjectId::new(),
            challenge_id: None,
            target_text: "hello".to_string(),
            transcript: "hello".to_string(),
            accuracy: 100.0,
            points_earned: 10,
            created_at: DateTime::now(),
        };
        let doc = bson::to_document(&attempt).unwrap();
        let parsed: Attempt = bson::from_document(doc).unwrap();
        assert_eq!(parsed.target_text, "hello");
        assert!(parsed.challenge_id.is_none());
        assert_eq!(parsed.points_earned, 10);
    }
}
