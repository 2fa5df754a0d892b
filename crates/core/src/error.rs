/// Failures produced while validating or comparing embedding sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
  /// A value in an embedding set is not an array of floats.
  #[error("Invalid embedding format detected in the embedding set (id `{id}`).")]
  InvalidEmbeddingFormat { id: String },

  /// Scoring a single pair of vectors failed.
  #[error("Error calculating similarity score: {cause}")]
  SimilarityCalculation { cause: String },

  /// The pairwise sweep failed; `cause` carries the triggering message.
  #[error("{cause}")]
  Comparison { cause: String },
}

impl CompareError {
  pub(crate) fn similarity(cause: impl Into<String>) -> Self {
    Self::SimilarityCalculation {
      cause: cause.into(),
    }
  }

  /// Wrap a failed pair score raised during the sweep.
  pub(crate) fn from_similarity(err: &Self) -> Self {
    Self::Comparison {
      cause: format!("Error comparing embeddings: {err}"),
    }
  }

  /// Any other failure while orchestrating the sweep.
  pub(crate) fn during_comparison(cause: impl std::fmt::Display) -> Self {
    Self::Comparison {
      cause: format!("Error during comparison: {cause}"),
    }
  }

  /// Whether the caller sent data that can never be compared.
  #[must_use]
  pub const fn is_invalid_input(&self) -> bool {
    matches!(self, Self::InvalidEmbeddingFormat { .. })
  }
}
