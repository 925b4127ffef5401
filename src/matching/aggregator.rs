//! Weighted score aggregation, thresholding, and ranking

use crate::config::ScoringProfile;
use crate::matching::engine::ScoreMaps;
use crate::matching::round3;
use crate::store::CandidateStore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Minimum combined score for a candidate to appear in results.
pub const RELEVANCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub embedding: f64,
    pub fuzzy: f64,
    pub keyword: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.embedding + self.fuzzy + self.keyword
    }
}

/// Blended profile: one fully combined score per skill, favoring semantic
/// similarity while still rewarding lexical and keyword matches.
pub const BLENDED_WEIGHTS: Weights = Weights {
    embedding: 0.4,
    fuzzy: 0.3,
    keyword: 0.3,
};

/// Split profile: embedding and fuzzy are blended, keyword-cosine is
/// reported as its own match entry.
pub const SPLIT_BLEND_WEIGHTS: Weights = Weights {
    embedding: 0.6,
    fuzzy: 0.4,
    keyword: 0.0,
};

/// How a match's score was produced, recorded in the match log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMethod {
    #[serde(rename = "Combined")]
    Combined,
    #[serde(rename = "NLP+Fuzzy")]
    NlpFuzzy,
    #[serde(rename = "TF-IDF")]
    TfIdf,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Combined => "Combined",
            MatchMethod::NlpFuzzy => "NLP+Fuzzy",
            MatchMethod::TfIdf => "TF-IDF",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A retained match: skill name plus combined score in (0.5, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub skill: String,
    pub score: f64,
    pub method: MatchMethod,
}

/// Merge the three score maps into ranked results.
///
/// Absent map entries default to 0.0 (no signal, not an error). Results are
/// sorted by score descending with a stable sort, so equal scores keep
/// candidate-list order. An empty result is valid.
pub fn aggregate(
    profile: ScoringProfile,
    store: &CandidateStore,
    scores: &ScoreMaps,
) -> Vec<MatchResult> {
    let mut results = Vec::new();

    for skill in store.all() {
        let embedding = scores.embedding.get(&skill.name).copied().unwrap_or(0.0);
        let fuzzy = scores.fuzzy.get(&skill.name).copied().unwrap_or(0.0);
        let keyword = scores.keyword.get(&skill.name).copied().unwrap_or(0.0);

        match profile {
            ScoringProfile::Blended => {
                let weights = BLENDED_WEIGHTS;
                let combined =
                    embedding * weights.embedding + fuzzy * weights.fuzzy + keyword * weights.keyword;
                if combined > RELEVANCE_THRESHOLD {
                    results.push(MatchResult {
                        skill: skill.name.clone(),
                        score: round3(combined),
                        method: MatchMethod::Combined,
                    });
                }
            }
            ScoringProfile::Split => {
                let weights = SPLIT_BLEND_WEIGHTS;
                let blend = embedding * weights.embedding + fuzzy * weights.fuzzy;
                if blend > RELEVANCE_THRESHOLD {
                    results.push(MatchResult {
                        skill: skill.name.clone(),
                        score: round3(blend),
                        method: MatchMethod::NlpFuzzy,
                    });
                }
                // keyword scores already cleared their own pre-filter
                if keyword > RELEVANCE_THRESHOLD {
                    results.push(MatchResult {
                        skill: skill.name.clone(),
                        score: keyword,
                        method: MatchMethod::TfIdf,
                    });
                }
            }
        }
    }

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::embedding::TrigramEmbedder;
    use std::collections::HashMap;

    fn store(names: &[&str]) -> CandidateStore {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        CandidateStore::load(&names, &TrigramEmbedder::default()).unwrap()
    }

    fn maps(
        embedding: &[(&str, f64)],
        fuzzy: &[(&str, f64)],
        keyword: &[(&str, f64)],
    ) -> ScoreMaps {
        let build = |pairs: &[(&str, f64)]| -> HashMap<String, f64> {
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };
        ScoreMaps {
            embedding: build(embedding),
            fuzzy: build(fuzzy),
            keyword: build(keyword),
        }
    }

    #[test]
    fn blended_weights_sum_to_one() {
        assert!((BLENDED_WEIGHTS.sum() - 1.0).abs() < 1e-9);
        assert!((SPLIT_BLEND_WEIGHTS.embedding + SPLIT_BLEND_WEIGHTS.fuzzy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn combined_score_uses_fixed_weights() {
        let store = store(&["Python"]);
        let scores = maps(
            &[("Python", 1.0)],
            &[("Python", 0.5)],
            &[("Python", 0.6)],
        );
        let results = aggregate(ScoringProfile::Blended, &store, &scores);
        // 0.4*1.0 + 0.3*0.5 + 0.3*0.6 = 0.73
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0.73);
        assert_eq!(results[0].method, MatchMethod::Combined);
    }

    #[test]
    fn scores_at_or_below_threshold_are_excluded() {
        let store = store(&["Python"]);
        // exactly the threshold: 0.4*0.5 + 0.3*1.0 = 0.5, strictly-greater fails
        let scores = maps(&[("Python", 0.5)], &[("Python", 1.0)], &[]);
        assert!(aggregate(ScoringProfile::Blended, &store, &scores).is_empty());

        // clearly below
        let scores = maps(&[("Python", 0.5)], &[("Python", 0.5)], &[("Python", 0.4)]);
        assert!(aggregate(ScoringProfile::Blended, &store, &scores).is_empty());
    }

    #[test]
    fn missing_map_entries_default_to_zero() {
        let store = store(&["Python"]);
        let scores = maps(&[("Python", 1.0)], &[("Python", 0.9)], &[]);
        let results = aggregate(ScoringProfile::Blended, &store, &scores);
        // 0.4*1.0 + 0.3*0.9 + 0.3*0.0 = 0.67
        assert_eq!(results[0].score, 0.67);
    }

    #[test]
    fn results_are_sorted_by_score_descending() {
        let store = store(&["Python", "Data Science"]);
        let scores = maps(
            &[("Python", 0.8), ("Data Science", 1.0)],
            &[("Python", 0.8), ("Data Science", 1.0)],
            &[],
        );
        let results = aggregate(ScoringProfile::Blended, &store, &scores);
        assert_eq!(results[0].skill, "Data Science");
        assert_eq!(results[1].skill, "Python");
    }

    #[test]
    fn equal_scores_keep_candidate_list_order() {
        let store = store(&["Python", "Data Science", "NLP"]);
        let scores = maps(
            &[("Python", 0.9), ("Data Science", 0.9), ("NLP", 0.9)],
            &[("Python", 0.9), ("Data Science", 0.9), ("NLP", 0.9)],
            &[],
        );
        let results = aggregate(ScoringProfile::Blended, &store, &scores);
        let order: Vec<&str> = results.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(order, vec!["Python", "Data Science", "NLP"]);
    }

    #[test]
    fn raising_any_component_never_lowers_the_combined_score() {
        let store = store(&["Python"]);
        let base = maps(
            &[("Python", 0.6)],
            &[("Python", 0.6)],
            &[("Python", 0.6)],
        );
        let base_score = aggregate(ScoringProfile::Blended, &store, &base)[0].score;

        for bumped in [
            maps(&[("Python", 0.9)], &[("Python", 0.6)], &[("Python", 0.6)]),
            maps(&[("Python", 0.6)], &[("Python", 0.9)], &[("Python", 0.6)]),
            maps(&[("Python", 0.6)], &[("Python", 0.6)], &[("Python", 0.9)]),
        ] {
            let bumped_score = aggregate(ScoringProfile::Blended, &store, &bumped)[0].score;
            assert!(bumped_score >= base_score);
        }
    }

    #[test]
    fn split_profile_tags_blend_and_keyword_separately() {
        let store = store(&["Python"]);
        let scores = maps(
            &[("Python", 1.0)],
            &[("Python", 1.0)],
            &[("Python", 0.8)],
        );
        let results = aggregate(ScoringProfile::Split, &store, &scores);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].method, MatchMethod::NlpFuzzy);
        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[1].method, MatchMethod::TfIdf);
        assert_eq!(results[1].score, 0.8);
    }

    #[test]
    fn split_profile_omits_weak_signals() {
        let store = store(&["Python"]);
        let scores = maps(&[("Python", 0.5)], &[("Python", 0.5)], &[]);
        // 0.6*0.5 + 0.4*0.5 = 0.5, not strictly greater
        assert!(aggregate(ScoringProfile::Split, &store, &scores).is_empty());
    }

    #[test]
    fn method_tags_serialize_to_their_wire_names() {
        assert_eq!(MatchMethod::NlpFuzzy.as_str(), "NLP+Fuzzy");
        assert_eq!(MatchMethod::TfIdf.as_str(), "TF-IDF");
        let json = serde_json::to_string(&MatchMethod::NlpFuzzy).unwrap();
        assert_eq!(json, "\"NLP+Fuzzy\"");
    }
}
