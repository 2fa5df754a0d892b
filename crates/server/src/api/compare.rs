use axum::{Json, extract::State, http::StatusCode};
use embcmp_core::{CompareError, Comparison, ComparisonOptions, ScoredPair, SimilarityMetric};
use embcmp_shared::AppError;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::utils::AppState;

#[derive(Deserialize, ToSchema)]
pub struct CompareEmbeddings {
  /// Id → embedding. Every element must be written as a float.
  #[schema(value_type = Object)]
  pub embedding_set_1: Map<String, Value>,
  #[schema(value_type = Object)]
  pub embedding_set_2: Map<String, Value>,
  /// Rank by `|score|` instead of the signed score
  #[serde(default)]
  pub use_absolute_value: bool,
  /// Defaults to the raw dot product
  #[serde(default)]
  pub metric: SimilarityMetric,
}

fn into_app_error(err: CompareError) -> AppError {
  let kind = match &err {
    CompareError::InvalidEmbeddingFormat { .. } => "InvalidEmbeddingFormat",
    CompareError::SimilarityCalculation { .. } => "SimilarityCalculationError",
    CompareError::Comparison { .. } => "ComparisonError",
  };
  tracing::error!("Handled {kind}: {err}");

  let status = if err.is_invalid_input() {
    StatusCode::BAD_REQUEST
  } else {
    StatusCode::INTERNAL_SERVER_ERROR
  };
  AppError::with_status(status, err)
}

/// Score every cross-pair of two embedding sets, highest score first
#[utoipa::path(
  post,
  path = "/compare",
  request_body = CompareEmbeddings,
  responses(
    (status = 200, description = "Every pair as `[[id_1, id_2], score]`, sorted by score descending"),
    (status = 400, description = "An embedding is not an array of floats"),
    (status = 500, description = "A pair of embeddings could not be scored")
  )
)]
#[axum::debug_handler]
pub async fn compare(
  State(state): State<AppState>,
  Json(payload): Json<CompareEmbeddings>,
) -> Result<Json<Vec<ScoredPair>>, AppError> {
  let options = ComparisonOptions {
    metric: payload.metric,
    use_absolute_value: payload.use_absolute_value,
    log_pair_scores: state.log_pair_scores,
  };

  let results = Comparison::new(payload.embedding_set_1, payload.embedding_set_2)
    .and_then(|comparison| comparison.with_options(options).compare_embedding_sets())
    .map_err(into_app_error)?;

  Ok(Json(results))
}

#[cfg(test)]
mod tests {
  use axum::response::IntoResponse;
  use tracing_test::traced_test;

  use super::*;

  #[test]
  #[traced_test]
  fn format_errors_are_client_errors() {
    let err = into_app_error(CompareError::InvalidEmbeddingFormat { id: "a".into() });

    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert!(logs_contain("Handled InvalidEmbeddingFormat"));
  }

  #[test]
  #[traced_test]
  fn comparison_errors_are_logged_and_internal() {
    let err = into_app_error(CompareError::Comparison {
      cause: "Error comparing embeddings: boom".into(),
    });

    assert!(logs_contain("Handled ComparisonError: Error comparing embeddings: boom"));
    assert_eq!(
      err.into_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }
}
