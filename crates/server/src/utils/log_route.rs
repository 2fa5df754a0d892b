use axum::{
  extract::{MatchedPath, Request},
  middleware::Next,
  response::Response,
};

/// Logs when a route is entered and when it finishes, with the response status.
pub async fn log_route(request: Request, next: Next) -> Response {
  let method = request.method().clone();
  let route = request
    .extensions()
    .get::<MatchedPath>()
    .map_or_else(|| request.uri().path().to_owned(), |path| path.as_str().to_owned());

  tracing::info!(%method, %route, "Route {route} called with method {method}");

  let response = next.run(request).await;

  tracing::info!(
    %route,
    status = %response.status(),
    "Finished handling route {route}"
  );

  response
}
