//! Canonical skill store with precomputed representations

use crate::error::{Result, SkillMatcherError};
use crate::matching::embedding::Embedder;
use crate::matching::keyword::{SparseVector, TfidfVectorizer};
use std::collections::HashSet;

/// A canonical skill and its precomputed representations.
///
/// The embedding is computed from the lower-cased name; the keyword vector
/// is the fitted TF-IDF model's transform of the raw name.
#[derive(Debug, Clone)]
pub struct Skill {
    pub name: String,
    pub embedding: Vec<f32>,
    pub keyword_vector: SparseVector,
}

/// The administrator-curated candidate set, built once at startup.
///
/// Read-only after `load`; all concurrent requests share one store without
/// locking. A future runtime update would have to build a fresh store and
/// swap the whole reference.
pub struct CandidateStore {
    skills: Vec<Skill>,
    vectorizer: TfidfVectorizer,
}

impl CandidateStore {
    /// Build the store from the canonical skill list.
    ///
    /// Fits the TF-IDF vocabulary over exactly this list, then precomputes
    /// each skill's embedding and keyword vector. Fails if the list is
    /// empty or contains duplicate names.
    pub fn load(names: &[String], embedder: &dyn Embedder) -> Result<Self> {
        if names.is_empty() {
            return Err(SkillMatcherError::Configuration(
                "canonical skill list is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(SkillMatcherError::Configuration(format!(
                    "duplicate canonical skill: {}",
                    name
                )));
            }
        }

        let vectorizer = TfidfVectorizer::fit(names);

        let skills = names
            .iter()
            .map(|name| Skill {
                name: name.clone(),
                embedding: embedder.embed(&name.to_lowercase()),
                keyword_vector: vectorizer.transform(name),
            })
            .collect();

        Ok(Self { skills, vectorizer })
    }

    /// Read-only view of the candidate skills, in load order.
    pub fn all(&self) -> &[Skill] {
        &self.skills
    }

    /// The keyword model fit over this candidate list.
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
