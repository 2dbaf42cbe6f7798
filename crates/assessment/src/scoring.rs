use crate::distance::similarity;
use crate::phoneme::Phonemizer;

/// Phoneme-level pronunciation accuracy on a 0..=100 scale.
///
/// Both texts are converted with the same phonemizer and compared by edit
/// distance, so spelling differences that sound alike still score high.
pub fn phonetic_accuracy(phonemizer: &dyn Phonemizer, target_text: &str, spoken_text: &str) -> f64 {
    let target = phonemizer.phonemize(target_text);
    let spoken = phonemizer.phonemize(spoken_text);
    similarity(&target, &spoken)
}
