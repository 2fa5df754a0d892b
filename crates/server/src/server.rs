use axum::{Router, middleware, response::Html, routing::get};
use embcmp_shared::{AppEnv, AppError};
use tokio::net::TcpListener;

use crate::{
  api,
  utils::{AppState, log_route, shutdown_signal},
};

#[axum::debug_handler]
async fn handler() -> Html<&'static str> {
  Html("<h1>Embedding Comparison</h1>")
}

/// Every route, wrapped in the route logger.
pub fn router(app_state: AppState) -> Router {
  Router::new()
    .route("/", get(handler))
    .merge(api::app())
    .layer(middleware::from_fn(log_route))
    .with_state(app_state)
}

pub async fn server(env: &AppEnv) -> Result<(), AppError> {
  let app = router(AppState::from_env(env));

  let listener = TcpListener::bind(env.listen_addr).await?;

  tracing::info!("server started at http://{}", env.listen_addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}
