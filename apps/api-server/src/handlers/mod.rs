//! HTTP handlers and route configuration.

mod auth;
mod blog;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Blog surface
        .route("/", web::get().to(blog::index))
        .route("/post/{id}", web::get().to(blog::post_detail))
        .route("/post/{id}", web::post().to(blog::submit_comment))
        .route("/tag/{slug}", web::get().to(blog::tagged))
        .route("/category/{slug}", web::get().to(blog::categorized))
        .route("/category", web::post().to(blog::create_category))
        .route("/share", web::post().to(blog::share))
        // API surface
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                ),
        );
}
