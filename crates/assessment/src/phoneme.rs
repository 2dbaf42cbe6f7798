use std::collections::HashMap;

use crate::distance::normalize_text;

/// Trait for pluggable grapheme-to-phoneme conversion.
pub trait Phonemizer: Send + Sync + 'static {
    /// Converts text to a flat phoneme sequence. Empty or non-alphabetic
    /// input yields an empty sequence.
    fn phonemize(&self, text: &str) -> Vec<String>;

    /// Human-readable converter name.
    fn name(&self) -> &str;
}

/// English phonemizer backed by an embedded ARPAbet lexicon with a
/// letter-to-sound rule fallback for out-of-vocabulary words.
pub struct LexiconPhonemizer {
    lexicon: HashMap<&'static str, &'static [&'static str]>,
}

impl Default for LexiconPhonemizer {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! lex {
    ($map:expr, $word:literal => [$($ph:literal),+]) => {
        $map.insert($word, &[$($ph),+] as &'static [&'static str]);
    };
}

impl LexiconPhonemizer {
    pub fn new() -> Self {
        let mut lexicon: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        lex!(lexicon, "hello" => ["HH", "AH", "L", "OW"]);
        lex!(lexicon, "world" => ["W", "ER", "L", "D"]);
        lex!(lexicon, "thank" => ["TH", "AE", "NG", "K"]);
        lex!(lexicon, "thanks" => ["TH", "AE", "NG", "K", "S"]);
        lex!(lexicon, "please" => ["P", "L", "IY", "Z"]);
        lex!(lexicon, "water" => ["W", "AO", "T", "ER"]);
        lex!(lexicon, "friend" => ["F", "R", "EH", "N", "D"]);
        lex!(lexicon, "beautiful" => ["B", "Y", "UW", "T", "AH", "F", "AH", "L"]);
        lex!(lexicon, "wonderful" => ["W", "AH", "N", "D", "ER", "F", "AH", "L"]);
        lex!(lexicon, "together" => ["T", "AH", "G", "EH", "DH", "ER"]);
        lex!(lexicon, "language" => ["L", "AE", "NG", "G", "W", "AH", "JH"]);
        lex!(lexicon, "important" => ["IH", "M", "P", "AO", "R", "T", "AH", "N", "T"]);
        lex!(lexicon, "different" => ["D", "IH", "F", "ER", "AH", "N", "T"]);
        lex!(lexicon, "pronunciation" => ["P", "R", "AH", "N", "AH", "N", "S", "IY", "EY", "SH", "AH", "N"]);
        lex!(lexicon, "massachusetts" => ["M", "AE", "S", "AH", "CH", "UW", "S", "AH", "T", "S"]);
        lex!(lexicon, "worcestershire" => ["W", "UH", "S", "T", "ER", "SH", "ER"]);
        lex!(lexicon, "anachronism" => ["AH", "N", "AE", "K", "R", "AH", "N", "IH", "Z", "AH", "M"]);
        lex!(lexicon, "onomatopoeia" => ["AA", "N", "AH", "M", "AA", "T", "AH", "P", "IY", "AH"]);
        lex!(lexicon, "chrysanthemum" => ["K", "R", "IH", "S", "AE", "N", "TH", "AH", "M", "AH", "M"]);
        lex!(lexicon, "the" => ["DH", "AH"]);
        lex!(lexicon, "a" => ["AH"]);
        lex!(lexicon, "i" => ["AY"]);
        lex!(lexicon, "you" => ["Y", "UW"]);
        lex!(lexicon, "is" => ["IH", "Z"]);
        lex!(lexicon, "are" => ["AA", "R"]);
        lex!(lexicon, "to" => ["T", "UW"]);
        lex!(lexicon, "of" => ["AH", "V"]);
        lex!(lexicon, "and" => ["AE", "N", "D"]);
        lex!(lexicon, "it" => ["IH", "T"]);
        lex!(lexicon, "my" => ["M", "AY"]);
        lex!(lexicon, "good" => ["G", "UH", "D"]);
        lex!(lexicon, "morning" => ["M", "AO", "R", "N", "IH", "NG"]);
        lex!(lexicon, "how" => ["HH", "AW"]);
        lex!(lexicon, "very" => ["V", "EH", "R", "IY"]);
        lex!(lexicon, "much" => ["M", "AH", "CH"]);
        Self { lexicon }
    }

    fn word_phonemes(&self, word: &str) -> Vec<String> {
        if let Some(phonemes) = self.lexicon.get(word) {
            return phonemes.iter().map(|p| p.to_string()).collect();
        }
        letter_to_sound(word)
    }
}

impl Phonemizer for LexiconPhonemizer {
    fn phonemize(&self, text: &str) -> Vec<String> {
        normalize_text(text)
            .split_whitespace()
            .flat_map(|word| self.word_phonemes(word))
            .collect()
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

/// Rule-based fallback: digraphs first, then single letters.
fn letter_to_sound(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut phonemes = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len() {
            let pair = [chars[i], chars[i + 1]];
            if let Some(mapped) = digraph(pair) {
                for p in mapped {
                    phonemes.push(p.to_string());
                }
                i += 2;
                continue;
            }
        }
        if let Some(mapped) = single(chars[i]) {
            for p in mapped {
                phonemes.push(p.to_string());
            }
        }
        i += 1;
    }
    phonemes
}

fn digraph(pair: [char; 2]) -> Option<&'static [&'static str]> {
    let mapped: &'static [&'static str] = match pair {
        ['c', 'h'] => &["CH"],
        ['s', 'h'] => &["SH"],
        ['t', 'h'] => &["TH"],
        ['p', 'h'] => &["F"],
        ['w', 'h'] => &["W"],
        ['c', 'k'] => &["K"],
        ['n', 'g'] => &["NG"],
        ['q', 'u'] => &["K", "W"],
        ['e', 'e'] => &["IY"],
        ['e', 'a'] => &["IY"],
        ['o', 'o'] => &["UW"],
        ['a', 'i'] | ['a', 'y'] => &["EY"],
        ['o', 'u'] | ['o', 'w'] => &["AW"],
        ['o', 'i'] | ['o', 'y'] => &["OY"],
        ['e', 'r'] => &["ER"],
        _ => return None,
    };
    Some(mapped)
}

fn single(c: char) -> Option<&'static [&'static str]> {
    let mapped: &'static [&'static str] = match c {
        'a' => &["AE"],
        'b' => &["B"],
        'c' => &["K"],
        'd' => &["D"],
        'e' => &["EH"],
        'f' => &["F"],
        'g' => &["G"],
        'h' => &["HH"],
        'i' => &["IH"],
        'j' => &["JH"],
        'k' => &["K"],
        'l' => &["L"],
        'm' => &["M"],
        'n' => &["N"],
        'o' => &["AA"],
        'p' => &["P"],
        'q' => &["K"],
        'r' => &["R"],
        's' => &["S"],
        't' => &["T"],
        'u' => &["AH"],
        'v' => &["V"],
        'w' => &["W"],
        'x' => &["K", "S"],
        'y' => &["Y"],
        'z' => &["Z"],
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_word() {
        let p = LexiconPhonemizer::new();
        assert_eq!(p.phonemize("hello"), vec!["HH", "AH", "L", "OW"]);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let p = LexiconPhonemizer::new();
        assert_eq!(p.phonemize("Hello!"), p.phonemize("hello"));
        assert_eq!(p.phonemize("  HELLO,  world. "), p.phonemize("hello world"));
    }

    #[test]
    fn test_multi_word_concatenation() {
        let p = LexiconPhonemizer::new();
        let combined = p.phonemize("hello world");
        let mut expected = p.phonemize("hello");
        expected.extend(p.phonemize("world"));
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_empty_input() {
        let p = LexiconPhonemizer::new();
        assert!(p.phonemize("").is_empty());
        assert!(p.phonemize("   ").is_empty());
        assert!(p.phonemize("?!...").is_empty());
    }

    #[test]
    fn test_oov_fallback_uses_rules() {
        let p = LexiconPhonemizer::new();
        // "shing" is not in the lexicon: sh + i + ng
        assert_eq!(p.phonemize("shing"), vec!["SH", "IH", "NG"]);
    }

    #[test]
    fn test_oov_digraphs() {
        assert_eq!(letter_to_sound("quack"), vec!["K", "W", "AE", "K"]);
        assert_eq!(letter_to_sound("phone"), vec!["F", "AA", "N", "EH"]);
    }

    #[test]
    fn test_identical_words_identical_phonemes() {
        let p = LexiconPhonemizer::new();
        assert_eq!(p.phonemize("chrysanthemum"), p.phonemize("chrysanthemum"));
    }
}
