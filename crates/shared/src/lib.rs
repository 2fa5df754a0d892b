mod error;
pub use error::AppError;

mod env;
pub use env::{AppEnv, LogConfig, LogFormat};

mod telemetry;
pub use telemetry::{env_filter, init_tracing};
