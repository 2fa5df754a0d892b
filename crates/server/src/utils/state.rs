use embcmp_shared::AppEnv;

#[derive(Clone, Debug, Default)]
pub struct AppState {
  /// Forwarded to every comparison as `ComparisonOptions::log_pair_scores`.
  pub log_pair_scores: bool,
}

impl AppState {
  #[must_use]
  pub const fn new(log_pair_scores: bool) -> Self {
    Self { log_pair_scores }
  }

  #[must_use]
  pub const fn from_env(env: &AppEnv) -> Self {
    Self::new(env.log_pair_scores)
  }
}
