use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password_hash: String,
    /// Accumulated reward points across all practice attempts.
    #[serde(default)]
    pub points: i64,
    /// Derived level: 1 + points / 100. Stored denormalized for leaderboard reads.
    #[serde(default = "default_level")]
    pub level: i32,
    pub created_at: DateTime,
}

fn default_level() -> i32 {
    1
}

impl User {
    pub const COLLECTION: &'static str = "users";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_document_defaults_points_and_level() {
        let doc = bson::doc! {
            "username": "alice",
            "password_hash": "$argon2id$...",
            "created_at": DateTime::now(),
        };
        let user: User = bson::from_document(doc).unwrap();
        assert_eq!(user.points, 0);
        assert_eq!(user.level, 1);
        assert!(user.id.is_none());
    }

    #[test]
    fn id_is_skipped_when_none() {
        let user = User {
            id: None,
            username: "bob".to_string(),
            password_hash: "hash".to_string(),
            points: 150,
            level: 2,
            created_at: DateTime::now(),
        };
        let doc = bson::to_document(&user).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_i64("points").unwrap(), 150);
    }
}
