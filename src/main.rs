use embcmp_server::server;
use embcmp_shared::{AppEnv, AppError, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  dotenvy::dotenv().ok();

  let env = AppEnv::from_env()?;
  init_tracing(&env.log)?;

  tracing::debug!(?env, "configuration loaded");

  server(&env).await
}
