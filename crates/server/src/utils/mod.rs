mod log_route;
pub use log_route::log_route;

mod shutdown_signal;
pub use shutdown_signal::shutdown_signal;

mod state;
pub use state::AppState;
