//! HTTP tests for the `/compare` route, driven through the full router.

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use embcmp_server::{router, utils::AppState};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
  router(AppState::new(false))
}

async fn post_compare(app: Router, body: &Value) -> (StatusCode, Value) {
  let request = Request::builder()
    .method("POST")
    .uri("/compare")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();

  let response = app.oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = response.into_body().collect().await.unwrap().to_bytes();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };

  (status, value)
}

#[tokio::test]
async fn orthogonal_vectors_score_zero() {
  let (status, body) = post_compare(
    app(),
    &json!({
      "embedding_set_1": { "a": [1.0, 0.0] },
      "embedding_set_2": { "b": [0.0, 1.0] },
    }),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([[["a", "b"], 0.0]]));
}

#[tokio::test]
async fn results_are_sorted_descending() {
  let (status, body) = post_compare(
    app(),
    &json!({
      "embedding_set_1": { "a": [1.0, 1.0] },
      "embedding_set_2": { "b": [1.0, 1.0], "c": [2.0, 2.0] },
    }),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([[["a", "c"], 4.0], [["a", "b"], 2.0]]));
}

#[tokio::test]
async fn returns_every_cross_pair() {
  let (status, body) = post_compare(
    app(),
    &json!({
      "embedding_set_1": { "f1": [0.1, 0.9], "b1": [0.8, 0.2], "x1": [0.5, 0.5] },
      "embedding_set_2": { "f2": [0.2, 0.8], "b2": [0.9, 0.1] },
    }),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  let pairs = body.as_array().unwrap();
  assert_eq!(pairs.len(), 6);

  let scores: Vec<f64> = pairs.iter().map(|p| p[1].as_f64().unwrap()).collect();
  assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn non_float_element_is_rejected_before_scoring() {
  let (status, body) = post_compare(
    app(),
    &json!({
      "embedding_set_1": { "a": ["x", 1.0] },
      "embedding_set_2": { "b": [1.0, 1.0] },
    }),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body,
    json!({ "error": "Invalid embedding format detected in the embedding set (id `a`)." })
  );
}

#[tokio::test]
async fn integer_element_is_rejected() {
  let (status, _) = post_compare(
    app(),
    &json!({
      "embedding_set_1": { "a": [1.0, 1.0] },
      "embedding_set_2": { "b": [1, 1.0] },
    }),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_integer_literal_is_rejected() {
  let request = Request::builder()
    .method("POST")
    .uri("/compare")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(
      r#"{"embedding_set_1":{"a":[100000000000000000000]},"embedding_set_2":{"b":[1.0]}}"#,
    ))
    .unwrap();

  let response = app().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overflowing_scores_are_a_server_error() {
  let (status, body) = post_compare(
    app(),
    &json!({
      "embedding_set_1": { "a": [1e200] },
      "embedding_set_2": { "b": [1e200], "c": [-1e200] },
    }),
  )
  .await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(
    body,
    json!({ "error": "Error during comparison: score for pair (a, b) is not finite" })
  );
}

#[tokio::test]
async fn mismatched_dimensions_are_a_server_error() {
  let (status, body) = post_compare(
    app(),
    &json!({
      "embedding_set_1": { "a": [1.0, 2.0, 3.0] },
      "embedding_set_2": { "b": [4.0, 5.0] },
    }),
  )
  .await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(
    body,
    json!({
      "error": "Error comparing embeddings: Error calculating similarity score: shapes (3,) and (2,) not aligned"
    })
  );
}

#[tokio::test]
async fn flags_change_the_score() {
  let (status, body) = post_compare(
    router(AppState::new(true)),
    &json!({
      "embedding_set_1": { "a": [1.0, 0.0] },
      "embedding_set_2": { "b": [-4.0, 0.0] },
      "use_absolute_value": true,
      "metric": "cosine",
    }),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([[["a", "b"], 1.0]]));
}

#[tokio::test]
async fn missing_set_is_a_client_error() {
  let (status, _) = post_compare(app(), &json!({ "embedding_set_1": {} })).await;
  assert!(status.is_client_error());
}

#[tokio::test]
async fn serves_openapi_document() {
  let response = app()
    .oneshot(
      Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  let bytes = response.into_body().collect().await.unwrap().to_bytes();
  let doc: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(doc["paths"]["/compare"]["post"].is_object());
}
