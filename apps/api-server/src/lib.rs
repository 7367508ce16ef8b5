//! # Blog API Server
//!
//! actix-web HTTP surface for the blog post resource.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod state;
pub mod telemetry;

use actix_web::web;

pub use config::AppConfig;
pub use server::{RunningServer, start, start_with_state};
pub use state::AppState;

/// Register extractor configuration and routes.
///
/// The caller provides `web::Data<AppState>` and the middleware stack.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(middleware::error::json_config())
        .app_data(middleware::error::path_config())
        .configure(handlers::configure_routes);
}
