use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::CompareError;

/// How a pair of vectors is scored.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  ToSchema,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SimilarityMetric {
  /// Raw dot product. Vectors must be normalized beforehand for this to equal
  /// cosine similarity.
  #[default]
  Dot,
  /// Dot product divided by the product of both vector norms.
  Cosine,
}

/// Per-request scoring switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonOptions {
  pub metric: SimilarityMetric,
  /// Report `|score|` instead of the signed score.
  pub use_absolute_value: bool,
  /// Emit one trace event per scored pair.
  pub log_pair_scores: bool,
}

/// Dot product of two equally long vectors.
///
/// # Errors
///
/// Returns [`CompareError::SimilarityCalculation`] when the lengths differ.
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64, CompareError> {
  if a.len() != b.len() {
    return Err(CompareError::similarity(format!(
      "shapes ({},) and ({},) not aligned",
      a.len(),
      b.len()
    )));
  }

  Ok(a.iter().zip(b).fold(0.0_f64, |acc, (&x, &y)| x.mul_add(y, acc)))
}

fn norm(v: &[f64]) -> f64 {
  v.iter().fold(0.0_f64, |acc, &x| x.mul_add(x, acc)).sqrt()
}

fn score(a: &[f64], b: &[f64], options: &ComparisonOptions) -> Result<f64, CompareError> {
  let dot = dot_product(a, b)?;

  let score = match options.metric {
    SimilarityMetric::Dot => dot,
    SimilarityMetric::Cosine => {
      let denom = norm(a) * norm(b);
      if denom == 0.0 {
        return Err(CompareError::similarity(
          "cosine similarity is undefined for a zero-norm vector",
        ));
      }
      dot / denom
    }
  };

  Ok(if options.use_absolute_value {
    score.abs()
  } else {
    score
  })
}

/// Score one pair of vectors according to `options`.
///
/// # Errors
///
/// Returns [`CompareError::SimilarityCalculation`] when the vectors cannot be
/// scored together; the failure is logged before it is returned.
pub fn similarity_score(
  a: &[f64],
  b: &[f64],
  options: &ComparisonOptions,
) -> Result<f64, CompareError> {
  match score(a, b, options) {
    Ok(value) => {
      if options.log_pair_scores {
        tracing::trace!(score = value, metric = %options.metric, "Returning similarity score");
      }
      Ok(value)
    }
    Err(err) => {
      tracing::error!("{err}");
      Err(err)
    }
  }
}
