//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod checkins;
pub mod error;
pub mod health;
pub mod hunters;
pub mod profile;
pub mod quests;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod workouts;

pub use error::ApiResult;

/// Register the `/api` endpoints and the diagnostics routes.
///
/// Extractor failures are mapped to `invalid_request` errors so every
/// failure shares the error payload shape.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use hunter_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .service(health::root)
        .service(health::diagnostics)
        .service(
            web::scope("/api")
                .service(hunters::create_hunter)
                .service(hunters::list_hunters)
                .service(checkins::check_in)
                .service(workouts::log_workout)
                .service(quests::todays_quest)
                .service(quests::complete_quest)
                .service(profile::get_profile),
        );
}
