//! Semantic embeddings behind a swappable `Embedder` seam

use crate::error::{Result, SkillMatcherError};
use log::info;
use model2vec_rs::model::StaticModel;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::Instant;

/// Produces a dense semantic vector for a piece of text.
///
/// The canonical store and the similarity engine only depend on this trait,
/// so the production Model2Vec model can be replaced by a deterministic
/// embedder in tests or when no model is installed.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Production embedder backed by a local Model2Vec static model.
pub struct Model2VecEmbedder {
    model: StaticModel,
}

impl Model2VecEmbedder {
    pub async fn load(model_path: &Path) -> Result<Self> {
        let start_time = Instant::now();

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| SkillMatcherError::ModelLoading(format!("Failed to load model: {}", e)))?;

        info!(
            "Embedding model loaded from {} in {:.2?}",
            model_path.display(),
            start_time.elapsed()
        );

        Ok(Self { model })
    }
}

impl Embedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        self.model.encode_single(text)
    }
}

/// Hashed character-trigram embedder.
///
/// A degraded stand-in for the semantic model: identical strings map to
/// identical vectors and near-duplicates (typos, casing already normalized
/// by the caller) stay close, but no real semantics are captured. Used as
/// the CLI fallback when the Model2Vec model is missing, and as a
/// deterministic embedder in tests.
pub struct TrigramEmbedder {
    dimension: usize,
}

impl TrigramEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for TrigramEmbedder {
    fn default() -> Self {
        Self::new(512)
    }
}

impl Embedder for TrigramEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return vector;
        }

        if chars.len() < 3 {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            vector[(hasher.finish() as usize) % self.dimension] += 1.0;
            return vector;
        }

        for trigram in chars.windows(3) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            vector[(hasher.finish() as usize) % self.dimension] += 1.0;
        }

        vector
    }
}

/// Cosine similarity between two embeddings.
///
/// A zero-norm vector (empty or out-of-vocabulary input) yields 0.0 rather
/// than dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
