use axum::{
  Json, Router,
  routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::utils::AppState;

mod compare;

pub use compare::CompareEmbeddings;

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Embedding Comparison API",
    version = "0.0.1",
    description = "Rank every cross-pair of two embedding sets by similarity"
  ),
  paths(compare::compare),
  components(schemas(CompareEmbeddings, embcmp_core::SimilarityMetric))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

pub fn app() -> Router<AppState> {
  Router::new()
    .route("/compare", post(compare::compare))
    .route("/openapi.json", get(openapi_json))
    .merge(Scalar::with_url("/openapi/", ApiDoc::openapi()))
}
