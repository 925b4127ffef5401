//! The similarity engine: three independent score maps per request

use crate::matching::aggregator::RELEVANCE_THRESHOLD;
use crate::matching::embedding::{cosine_similarity, Embedder};
use crate::matching::fuzzy::partial_ratio;
use crate::matching::round3;
use crate::store::CandidateStore;
use std::collections::HashMap;
use std::sync::Arc;

/// The three per-candidate similarity maps for one user query, keyed by
/// skill name. Values are in [0, 1], rounded to 3 decimals. The keyword map
/// only contains entries that cleared its internal pre-filter; absence
/// means "no signal from that method".
#[derive(Debug, Clone)]
pub struct ScoreMaps {
    pub embedding: HashMap<String, f64>,
    pub fuzzy: HashMap<String, f64>,
    pub keyword: HashMap<String, f64>,
}

/// Computes the three similarity measures against the candidate set.
///
/// Each measure is a pure function of (user string, candidate set): no
/// shared mutable state, no ordering dependency between candidates.
pub struct SimilarityEngine {
    embedder: Arc<dyn Embedder>,
}

impl SimilarityEngine {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// All three score maps for one user query.
    pub fn score(&self, user_skill: &str, store: &CandidateStore) -> ScoreMaps {
        ScoreMaps {
            embedding: self.embedding_scores(user_skill, store),
            fuzzy: self.fuzzy_scores(user_skill, store),
            keyword: self.keyword_scores(user_skill, store),
        }
    }

    /// Cosine similarity between the embedded (lower-cased) user string and
    /// each skill's precomputed embedding.
    pub fn embedding_scores(&self, user_skill: &str, store: &CandidateStore) -> HashMap<String, f64> {
        let user_vector = self.embedder.embed(&user_skill.to_lowercase());

        store
            .all()
            .iter()
            .map(|skill| {
                let score = cosine_similarity(&user_vector, &skill.embedding) as f64;
                (skill.name.clone(), round3(score))
            })
            .collect()
    }

    /// Partial best-alignment ratio between the lower-cased user string and
    /// each lower-cased skill name, scaled from [0, 100] to [0, 1].
    pub fn fuzzy_scores(&self, user_skill: &str, store: &CandidateStore) -> HashMap<String, f64> {
        let user_lower = user_skill.to_lowercase();

        store
            .all()
            .iter()
            .map(|skill| {
                let score = partial_ratio(&user_lower, &skill.name.to_lowercase()) / 100.0;
                (skill.name.clone(), round3(score))
            })
            .collect()
    }

    /// TF-IDF cosine similarity between the user string (as typed; the
    /// vectorizer lower-cases internally) and each skill's keyword vector.
    /// Only scores strictly above the pre-filter cutoff are retained.
    pub fn keyword_scores(&self, user_skill: &str, store: &CandidateStore) -> HashMap<String, f64> {
        let user_vector = store.vectorizer().transform(user_skill);

        store
            .all()
            .iter()
            .filter_map(|skill| {
                let score = user_vector.cosine(&skill.keyword_vector);
                // internal pre-filter, distinct from the final relevance
                // threshold even though the cutoff value is the same
                if score > RELEVANCE_THRESHOLD {
                    Some((skill.name.clone(), round3(score)))
                } else {
                    None
                }
            })
            .collect()
    }
}
