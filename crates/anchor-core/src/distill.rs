use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::VOWELS;

/// Ordered, vowel-free, duplicate-free uppercase letters distilled from an intention.
///
/// Built fresh by [`distill`] or [`normalize_letters`]; never updated in place.
/// Deserialized input goes through [`normalize_letters`] as well.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<char>", into = "Vec<char>")]
pub struct DistilledLetters(Vec<char>);

impl DistilledLetters {
    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, char> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<char> {
        self.0
    }
}

impl fmt::Display for DistilledLetters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl From<Vec<char>> for DistilledLetters {
    fn from(letters: Vec<char>) -> Self {
        normalize_letters(letters).0
    }
}

impl From<DistilledLetters> for Vec<char> {
    fn from(letters: DistilledLetters) -> Self {
        letters.0
    }
}

impl AsRef<[char]> for DistilledLetters {
    fn as_ref(&self) -> &[char] {
        &self.0
    }
}

/// Output of [`distill`]: the final letters plus what was dropped along the way.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistillResult {
    pub final_letters: DistilledLetters,
    /// Vowels removed, in source order and original case.
    pub removed_vowels: Vec<char>,
    /// Repeated consonants removed, in source order and original case.
    pub removed_duplicates: Vec<char>,
    /// Everything that is not an ASCII letter (digits, punctuation, spaces,
    /// accented letters), in source order. Omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_other: Vec<char>,
}

/// ASCII vowel check, case-insensitive. `Y` is a consonant.
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c.to_ascii_uppercase())
}

/// Reduce an intention to its canonical consonant sequence.
///
/// Anything that is not an ASCII letter goes to `removed_other`, vowels are
/// removed, and only the first occurrence of each consonant survives
/// (case-insensitive). Casing is ASCII only, so the result does not depend on
/// locale. An empty result is returned
/// as-is; choosing a fallback is the caller's job.
pub fn distill(intention: &str) -> DistillResult {
    let mut seen: HashSet<char> = HashSet::new();
    let mut final_letters = Vec::new();
    let mut removed_vowels = Vec::new();
    let mut removed_duplicates = Vec::new();
    let mut removed_other = Vec::new();

    for c in intention.chars() {
        if !c.is_ascii_alphabetic() {
            removed_other.push(c);
            continue;
        }
        if is_vowel(c) {
            removed_vowels.push(c);
            continue;
        }
        let upper = c.to_ascii_uppercase();
        if seen.insert(upper) {
            final_letters.push(upper);
        } else {
            removed_duplicates.push(c);
        }
    }

    DistillResult {
        final_letters: DistilledLetters(final_letters),
        removed_vowels,
        removed_duplicates,
        removed_other,
    }
}

/// Coerce arbitrary caller input into well-formed letters without rejecting it.
///
/// Keeps ASCII letters only, uppercases them, and drops repeats. Vowels are
/// kept: callers may legitimately hand the generator a letter set that never
/// went through [`distill`]. The flag is true when anything had to change.
pub fn normalize_letters<I>(letters: I) -> (DistilledLetters, bool)
where
    I: IntoIterator<Item = char>,
{
    let mut seen: HashSet<char> = HashSet::new();
    let mut out = Vec::new();
    let mut changed = false;

    for c in letters {
        if !c.is_ascii_alphabetic() {
            changed = true;
            continue;
        }
        let upper = c.to_ascii_uppercase();
        if upper != c {
            changed = true;
        }
        if seen.insert(upper) {
            out.push(upper);
        } else {
            changed = true;
        }
    }

    (DistilledLetters(out), changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_case_insensitive() {
        let expected = letters("FCS");
        assert_eq!(distill("Focus").final_letters.as_slice(), expected);
        assert_eq!(distill("FOCUS").final_letters.as_slice(), expected);
        assert_eq!(distill("focus").final_letters.as_slice(), expected);
    }

    #[test]
    fn test_stay_focused_during_training() {
        let result = distill("Stay focused during training");
        assert_eq!(result.final_letters.as_slice(), letters("STYFCDRNG"));
        assert_eq!(result.removed_duplicates, letters("sdtrnng"));
        assert_eq!(result.removed_vowels, letters("aoueuiaii"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(distill(""), DistillResult::default());
    }

    #[test]
    fn test_all_vowels() {
        let result = distill("AEIOU");
        assert!(result.final_letters.is_empty());
        assert_eq!(result.removed_vowels, letters("AEIOU"));
        assert!(result.removed_duplicates.is_empty());
    }

    #[test]
    fn test_vowels_keep_original_case() {
        let result = distill("aEiOu");
        assert_eq!(result.removed_vowels, letters("aEiOu"));
    }

    #[test]
    fn test_non_letters_dropped() {
        let result = distill("b-2-c! 99 d?");
        assert_eq!(result.final_letters.as_slice(), letters("BCD"));
        assert!(result.removed_vowels.is_empty());
        assert!(result.removed_duplicates.is_empty());
        assert_eq!(result.removed_other, letters("-2-! 99 ?"));
    }

    #[test]
    fn test_non_ascii_letters_dropped() {
        // é is alphabetic but not ASCII, so it is neither vowel nor consonant here
        let result = distill("café ß");
        assert_eq!(result.final_letters.as_slice(), letters("CF"));
        assert_eq!(result.removed_vowels, letters("a"));
        assert_eq!(result.removed_other, letters("é ß"));
    }

    #[test]
    fn test_removed_other_in_json_when_present() {
        let json = serde_json::to_value(distill("No. 1")).unwrap();
        assert_eq!(json["removedOther"], serde_json::json!([".", " ", "1"]));
    }

    #[test]
    fn test_y_is_consonant() {
        assert_eq!(distill("yay").final_letters.as_slice(), letters("Y"));
        assert!(!is_vowel('y'));
    }

    #[test]
    fn test_duplicate_keeps_case_it_appeared_in() {
        let result = distill("Sun sets");
        assert_eq!(result.final_letters.as_slice(), letters("SNT"));
        assert_eq!(result.removed_duplicates, letters("ss"));
    }

    #[test]
    fn test_display() {
        assert_eq!(distill("anchor").final_letters.to_string(), "NCHR");
    }

    #[test]
    fn test_serializes_as_strings() {
        let json = serde_json::to_string(&distill("Focus")).unwrap();
        assert_eq!(
            json,
            r#"{"finalLetters":["F","C","S"],"removedVowels":["o","u"],"removedDuplicates":[]}"#
        );
    }

    #[test]
    fn test_result_json_without_other_still_parses() {
        let parsed: DistillResult = serde_json::from_str(
            r#"{"finalLetters":["F","C","S"],"removedVowels":["o","u"],"removedDuplicates":[]}"#,
        )
        .unwrap();
        assert_eq!(parsed, distill("Focus"));
    }

    #[test]
    fn test_deserialize_normalizes_letters() {
        let parsed: DistilledLetters = serde_json::from_str(r#"["n","c","N","1","h"]"#).unwrap();
        assert_eq!(parsed.as_slice(), letters("NCH"));
        let clean: DistilledLetters = serde_json::from_str(r#"["N","C"]"#).unwrap();
        assert_eq!(clean.as_slice(), letters("NC"));
    }

    #[test]
    fn test_normalize_clean_input_unchanged() {
        let (out, changed) = normalize_letters(letters("NCHR"));
        assert_eq!(out.as_slice(), letters("NCHR"));
        assert!(!changed);
    }

    #[test]
    fn test_normalize_lowercase_dupes_and_junk() {
        let (out, changed) = normalize_letters(letters("nc h1Nr"));
        assert_eq!(out.as_slice(), letters("NCHR"));
        assert!(changed);
    }

    #[test]
    fn test_normalize_keeps_vowels() {
        let (out, changed) = normalize_letters(['A']);
        assert_eq!(out.as_slice(), ['A']);
        assert!(!changed);
    }
}
