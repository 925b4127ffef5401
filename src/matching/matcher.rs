//! The matcher façade wiring store, engine, aggregator, and recorder

use crate::config::ScoringProfile;
use crate::matching::aggregator::{aggregate, MatchResult};
use crate::matching::embedding::Embedder;
use crate::matching::engine::SimilarityEngine;
use crate::recorder::QueryRecorder;
use crate::store::CandidateStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The response for one match request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub submitted_skill: String,
    pub matches: Vec<MatchResult>,
}

/// Matches user skill strings against the canonical skill list.
///
/// Request handling is synchronous, CPU-only, and takes `&self`, so one
/// matcher serves concurrent callers; the only cross-request state is the
/// optional recorder, which serializes its own appends.
pub struct SkillMatcher {
    store: CandidateStore,
    engine: SimilarityEngine,
    profile: ScoringProfile,
    recorder: Option<Arc<QueryRecorder>>,
}

impl SkillMatcher {
    pub fn new(
        store: CandidateStore,
        embedder: Arc<dyn Embedder>,
        profile: ScoringProfile,
    ) -> Self {
        Self {
            store,
            engine: SimilarityEngine::new(embedder),
            profile,
            recorder: None,
        }
    }

    /// Attach a query recorder that observes every request and retained match.
    pub fn with_recorder(mut self, recorder: Arc<QueryRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    pub fn profile(&self) -> ScoringProfile {
        self.profile
    }

    /// Match one user skill string against the canonical list.
    ///
    /// Total for any well-formed string input: an empty string is legal and
    /// simply tends to produce no matches. Retained scores are in
    /// (0.5, 1.0] with at most 3 decimal digits.
    pub fn match_skill(&self, user_skill: &str) -> MatchReport {
        let scores = self.engine.score(user_skill, &self.store);
        let matches = aggregate(self.profile, &self.store, &scores);

        if let Some(recorder) = &self.recorder {
            let query_id = recorder.record_query(user_skill);
            for result in &matches {
                recorder.record_match(query_id, result);
            }
        }

        MatchReport {
            submitted_skill: user_skill.to_string(),
            matches,
        }
    }
}
