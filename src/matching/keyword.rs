//! Keyword-importance (TF-IDF) vectors over the canonical skill vocabulary

use regex::Regex;
use std::collections::HashMap;

/// Sparse l2-normalized term-weight vector.
///
/// Entries are (vocabulary index, weight) pairs sorted by index; absent
/// indices are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_weights(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);

        let norm = entries
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }

        Self { entries }
    }

    pub fn zero() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    fn dot(&self, other: &SparseVector) -> f64 {
        let mut sum = 0.0;
        let mut rhs = other.entries.iter().peekable();

        for (index, weight) in &self.entries {
            while let Some((other_index, _)) = rhs.peek() {
                if other_index < index {
                    rhs.next();
                } else {
                    break;
                }
            }
            if let Some((other_index, other_weight)) = rhs.peek() {
                if other_index == index {
                    sum += weight * other_weight;
                }
            }
        }

        sum
    }

    /// Cosine similarity. Both vectors are unit-length by construction, so
    /// this is the dot product, with 0.0 for zero vectors.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        self.dot(other)
    }
}

/// TF-IDF model fit over the canonical skill list.
///
/// Semantics follow scikit-learn's `TfidfVectorizer` defaults, which the
/// original deployment used: word tokens of at least two characters,
/// lower-casing, smoothed idf `ln((1+n)/(1+df)) + 1`, l2 normalization.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Fit vocabulary and idf weights over the given documents.
    pub fn fit(documents: &[String]) -> Self {
        let token_pattern = Regex::new(r"\b\w\w+\b").expect("invalid token pattern");

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for document in documents {
            let mut seen: Vec<String> = tokenize(&token_pattern, document);
            seen.sort();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = document_frequency.keys().cloned().collect();
        terms.sort();

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = document_frequency[&term] as f64;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self {
            vocabulary,
            idf,
            token_pattern,
        }
    }

    /// Transform text into a normalized TF-IDF vector over the fitted
    /// vocabulary. Out-of-vocabulary tokens are ignored; text with no known
    /// tokens transforms to the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut term_frequency: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(&self.token_pattern, text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *term_frequency.entry(index).or_insert(0.0) += 1.0;
            }
        }

        if term_frequency.is_empty() {
            return SparseVector::zero();
        }

        let weights = term_frequency
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();
        SparseVector::from_weights(weights)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

fn tokenize(token_pattern: &Regex, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern
        .find_iter(&lowered)
        .map(|token| token.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills() -> Vec<String> {
        [
            "Python",
            "Relational Database",
            "Software Engineering",
            "Data Science",
            "NLP",
            "Natural Language Processing",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn exact_name_has_cosine_one_with_itself() {
        let vectorizer = TfidfVectorizer::fit(&skills());
        let a = vectorizer.transform("Python");
        let b = vectorizer.transform("python");
        assert!((a.cosine(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_vocabularies_have_cosine_zero() {
        let vectorizer = TfidfVectorizer::fit(&skills());
        let a = vectorizer.transform("Python");
        let b = vectorizer.transform("Relational Database");
        assert_eq!(a.cosine(&b), 0.0);
    }

    #[test]
    fn out_of_vocabulary_text_transforms_to_zero_vector() {
        let vectorizer = TfidfVectorizer::fit(&skills());
        assert!(vectorizer.transform("quantum basketweaving").is_zero());
        assert!(vectorizer.transform("").is_zero());
    }

    #[test]
    fn single_character_tokens_are_dropped() {
        let vectorizer = TfidfVectorizer::fit(&["C programming".to_string()]);
        // "C" is below the two-character token minimum
        assert_eq!(vectorizer.vocabulary_len(), 1);
    }

    #[test]
    fn shared_terms_give_partial_overlap() {
        let vectorizer = TfidfVectorizer::fit(&skills());
        let a = vectorizer.transform("data");
        let b = vectorizer.transform("Data Science");
        let cosine = a.cosine(&b);
        assert!(cosine > 0.0 && cosine < 1.0);
    }

    #[test]
    fn zero_vector_cosine_is_zero() {
        let vectorizer = TfidfVectorizer::fit(&skills());
        let zero = SparseVector::zero();
        let python = vectorizer.transform("Python");
        assert_eq!(zero.cosine(&python), 0.0);
        assert_eq!(zero.cosine(&SparseVector::zero()), 0.0);
    }
}
