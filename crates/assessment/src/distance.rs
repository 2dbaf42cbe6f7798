/// Normalize text for comparison: lowercase, strip punctuation, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token-level Levenshtein edit distance over any comparable symbol type.
///
/// Works for phoneme sequences and word sequences alike. Rolling two-row
/// formulation, O(min) memory.
pub fn levenshtein<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> usize {
    let m = reference.len();
    let n = hypothesis.len();
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if reference[i - 1] == hypothesis[j - 1] {
                0
            } else {
                1
            };
            curr[j] = std::cmp::min(
                std::cmp::min(prev[j] + 1, curr[j - 1] + 1),
                prev[j - 1] + cost,
            );
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Similarity of two token sequences on a 0..=100 scale, two decimals.
///
/// `100 * (1 - distance / max_len)`. Two empty sequences compare as a
/// perfect match; comparing against a single empty sequence scores 0.
pub fn similarity<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> f64 {
    if reference.is_empty() && hypothesis.is_empty() {
        return 100.0;
    }
    let max_len = std::cmp::max(reference.len(), hypothesis.len()).max(1);
    let distance = levenshtein(reference, hypothesis);
    let score = 100.0 * (1.0 - distance as f64 / max_len as f64);
    round2(score.clamp(0.0, 100.0))
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Character-level similarity of two raw strings.
///
/// Only trims surrounding whitespace and lowercases; punctuation and inner
/// spacing count toward the distance. Phoneme comparison goes through
/// [`normalize_text`] instead.
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.trim().to_lowercase().chars().collect();
    let b: Vec<char> = b.trim().to_lowercase().chars().collect();
    similarity(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        normalize_text(text)
            .split_whitespace()
            .map(|w| w.to_string())
            .collect()
    }

    #[test]
    fn test_distance_identical() {
        let a = words("hello world");
        assert_eq!(levenshtein(&a, &a), 0);
    }

    #[test]
    fn test_distance_substitution() {
        let a = words("hello world");
        let b = words("hello earth");
        assert_eq!(levenshtein(&a, &b), 1);
    }

    #[test]
    fn test_distance_insert_delete() {
        let a = words("foo bar baz");
        let b = words("foo baz");
        assert_eq!(levenshtein(&a, &b), 1);
        assert_eq!(levenshtein(&b, &a), 1);
    }

    #[test]
    fn test_distance_against_empty_is_length() {
        let a = words("one two three");
        let empty: Vec<String> = vec![];
        assert_eq!(levenshtein(&empty, &a), a.len());
        assert_eq!(levenshtein(&a, &empty), a.len());
        assert_eq!(levenshtein(&empty, &empty), 0);
    }

    #[test]
    fn test_distance_chars() {
        let a: Vec<char> = "kitten".chars().collect();
        let b: Vec<char> = "sitting".chars().collect();
        assert_eq!(levenshtein(&a, &b), 3);
    }

    #[test]
    fn test_similarity_perfect() {
        let a = words("hello world");
        assert!((similarity(&a, &a) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_both_empty_is_perfect() {
        let empty: Vec<String> = vec![];
        assert!((similarity(&empty, &empty) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_one_empty_is_zero() {
        let empty: Vec<String> = vec![];
        let a = words("hello");
        assert!((similarity(&a, &empty) - 0.0).abs() < f64::EPSILON);
        assert!((similarity(&empty, &a) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_bounded() {
        let a = words("one two three");
        let b = words("four five six seven eight");
        let score = similarity(&a, &b);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_similarity_two_decimals() {
        // 1 edit over 3 tokens: 100 * 2/3 = 66.666... -> 66.67
        let a = words("a b c");
        let b = words("a b d");
        assert!((similarity(&a, &b) - 66.67).abs() < 0.001);
    }

    #[test]
    fn test_similarity_symmetric() {
        let a = words("the quick brown fox");
        let b = words("the slow brown fox jumps");
        assert!((similarity(&a, &b) - similarity(&b, &a)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_score_strings() {
        assert!((similarity_score("", "") - 100.0).abs() < f64::EPSILON);
        assert!((similarity_score("  Hello ", "hello") - 100.0).abs() < f64::EPSILON);
        let score = similarity_score("kitten", "sitting");
        // 3 edits over 7 chars: 100 * 4/7 = 57.142... -> 57.14
        assert!((score - 57.14).abs() < 0.001);
    }

    #[test]
    fn test_similarity_score_keeps_punctuation() {
        // Trailing '!' is one edit over max length 6: 100 * 5/6 -> 83.33
        let score = similarity_score("hello!", "hello");
        assert!((score - 83.33).abs() < 0.001);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(
            normalize_text("Hello, World!  How  Are You?"),
            "hello world how are you"
        );
    }
}
