use serde::Serialize;
use serde_json::{Map, Value};

use crate::{CompareError, ComparisonOptions, EmbeddingSet, similarity_score};

/// One scored cross-pair, serialized as `[[id_a, id_b], score]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPair(pub (String, String), pub f64);

impl ScoredPair {
  #[must_use]
  pub fn ids(&self) -> (&str, &str) {
    (self.0.0.as_str(), self.0.1.as_str())
  }

  #[must_use]
  pub const fn score(&self) -> f64 {
    self.1
  }
}

/// Two validated embedding sets ready to be compared.
#[derive(Debug, Clone)]
pub struct Comparison {
  set1: EmbeddingSet,
  set2: EmbeddingSet,
  options: ComparisonOptions,
}

impl Comparison {
  /// Validate both raw sets; nothing is scored until
  /// [`compare_embedding_sets`](Self::compare_embedding_sets) runs.
  ///
  /// # Errors
  ///
  /// Returns [`CompareError::InvalidEmbeddingFormat`] if either set holds a
  /// value that is not an array of floats.
  pub fn new(set1: Map<String, Value>, set2: Map<String, Value>) -> Result<Self, CompareError> {
    Ok(Self::from_sets(
      EmbeddingSet::validate(set1)?,
      EmbeddingSet::validate(set2)?,
    ))
  }

  #[must_use]
  pub fn from_sets(set1: EmbeddingSet, set2: EmbeddingSet) -> Self {
    Self {
      set1,
      set2,
      options: ComparisonOptions::default(),
    }
  }

  #[must_use]
  pub fn with_options(mut self, options: ComparisonOptions) -> Self {
    self.options = options;
    self
  }

  /// Score every pair in `set1 × set2` and rank them by score, highest first.
  ///
  /// All `n × m` pairs are returned, self-pairs included. The order of equal
  /// scores is unspecified.
  ///
  /// # Errors
  ///
  /// Returns [`CompareError::Comparison`] if any single pair fails to score or
  /// produces a score that cannot be ranked. No partial result is returned.
  pub fn compare_embedding_sets(&self) -> Result<Vec<ScoredPair>, CompareError> {
    let mut results = Vec::with_capacity(self.set1.len() * self.set2.len());

    for (id1, emb1) in self.set1.iter() {
      for (id2, emb2) in self.set2.iter() {
        let score = similarity_score(emb1, emb2, &self.options).map_err(|err| {
          tracing::error!("Raised ComparisonError due to SimilarityCalculationError: {err}");
          CompareError::from_similarity(&err)
        })?;

        if !score.is_finite() {
          let err = CompareError::during_comparison(format!(
            "score for pair ({id1}, {id2}) is not finite"
          ));
          tracing::error!("Raised ComparisonError for error during comparison: {err}");
          return Err(err);
        }

        results.push(ScoredPair((id1.to_owned(), id2.to_owned()), score));
      }
    }

    results.sort_by(|a, b| b.1.total_cmp(&a.1));

    tracing::debug!(
      set1 = self.set1.len(),
      set2 = self.set2.len(),
      metric = %self.options.metric,
      "Compared embedding sets"
    );

    Ok(results)
  }
}
