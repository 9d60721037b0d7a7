//! HTTP handlers and route configuration.

mod health;
mod metrics;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidArgument(err.to_string()).into()),
    )
    .route("/api/health", web::get().to(health::health_check))
    .route("/metrics", web::get().to(metrics::metrics))
    // RPC methods
    .service(
        web::scope("/posts.v1.PostService")
            .route("/CreatePost", web::post().to(posts::create_post))
            .route("/GetPost", web::post().to(posts::get_post))
            .route("/ListPosts", web::post().to(posts::list_posts))
            .route("/UpdatePost", web::post().to(posts::update_post))
            .route("/DeletePost", web::post().to(posts::delete_post)),
    );
}
