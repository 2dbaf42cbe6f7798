use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A predefined target word with an associated base point value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub word: String,
    pub difficulty: Difficulty,
    /// Base points awarded for a perfect (accuracy 100) attempt.
    pub points: i64,
    pub description: String,
}

impl Challenge {
    pub const COLLECTION: &'static str = "challenges";

    /// Default challenge catalog seeded on first startup.
    pub fn defaults() -> Vec<Challenge> {
        let easy = [
            ("hello", "Basic greeting"),
            ("world", "Common word"),
            ("thank", "Polite expression"),
            ("please", "Courtesy word"),
            ("water", "Essential noun"),
            ("friend", "Relationship word"),
        ];
        let medium = [
            ("beautiful", "Adjective with multiple syllables"),
            ("wonderful", "Complex adjective"),
            ("together", "Adverb with silent letters"),
            ("language", "Academic term"),
            ("important", "Formal adjective"),
            ("different", "Comparative word"),
        ];
        let hard = [
            ("pronunciation", "Technical linguistic term"),
            ("massachusetts", "Complex place name"),
            ("worcestershire", "Difficult compound word"),
            ("anachronism", "Academic vocabulary"),
            ("onomatopoeia", "Literary term"),
            ("chrysanthemum", "Scientific term"),
        ];

        let make = |word: &str, description: &str, difficulty: Difficulty, points: i64| Challenge {
            id: None,
            word: word.to_string(),
            difficulty,
            points,
            description: description.to_string(),
        };

        easy.iter()
            .map(|(w, d)| make(w, d, Difficulty::Easy, 50))
            .chain(medium.iter().map(|(w, d)| make(w, d, Difficulty::Medium, 75)))
            .chain(hard.iter().map(|(w, d)| make(w, d, Difficulty::Hard, 100)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"medium\""
        );
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn default_catalog_has_three_tiers() {
        let all = Challenge::defaults();
        assert_eq!(all.len(), 18);
        assert!(
            all.iter()
                .filter(|c| c.difficulty == Difficulty::Easy)
                .all(|c| c.points == 50)
        );
        assert!(
            all.iter()
                .filter(|c| c.difficulty == Difficulty::Hard)
                .all(|c| c.points == 100)
        );
        assert!(all.iter().any(|c| c.word == "pronunciation"));
    }
}
