//! Partial fuzzy string similarity

use strsim::normalized_levenshtein;

/// Best partial-alignment similarity ratio between two strings, in [0, 100].
///
/// The shorter string is slid over every equal-length character window of
/// the longer one and the best normalized Levenshtein similarity wins. This
/// rewards the user string being a substring or near-substring of the
/// candidate (or vice versa) even under a large length mismatch, which full
/// edit distance would punish.
///
/// Callers are expected to normalize case beforehand. Either string empty
/// yields 0.0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let window_len = shorter.chars().count();
    let longer_chars: Vec<char> = longer.chars().collect();

    let mut best = 0.0f64;
    for window in longer_chars.windows(window_len) {
        let candidate: String = window.iter().collect();
        let similarity = normalized_levenshtein(shorter, &candidate);
        if similarity > best {
            best = similarity;
        }
        if best >= 1.0 {
            break;
        }
    }

    best * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(partial_ratio("python", "python"), 100.0);
    }

    #[test]
    fn substring_scores_100_despite_length_mismatch() {
        assert_eq!(partial_ratio("database", "relational database"), 100.0);
        assert_eq!(partial_ratio("relational database", "database"), 100.0);
    }

    #[test]
    fn typo_still_scores_high() {
        // best window is "databas" at edit distance 2 from "databse"
        let score = partial_ratio("databse", "relational database");
        assert!(score > 70.0 && score < 100.0);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(partial_ratio("", "python"), 0.0);
        assert_eq!(partial_ratio("python", ""), 0.0);
        assert_eq!(partial_ratio("", ""), 0.0);
    }

    #[test]
    fn unrelated_strings_score_low() {
        assert!(partial_ratio("@@@@", "python") < 20.0);
    }

    #[test]
    fn ratio_is_symmetric() {
        assert_eq!(
            partial_ratio("nlp", "natural language processing"),
            partial_ratio("natural language processing", "nlp")
        );
    }
}
