pub mod auth;
pub mod companies;
pub mod export;
pub mod health;
pub mod shifts;
pub mod users;
pub mod vacations;

use actix_web::web;

/// Wires every resource under the caller-provided scope (mounted at `/api`
/// behind `AuthMiddleware` by the binary and the integration tests).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::setup),
    )
    .service(
        web::scope("/companies")
            .service(companies::list_companies)
            .service(companies::create_company)
            .service(companies::update_company),
    )
    .service(companies::my_company)
    .service(
        web::scope("/users")
            .service(users::create_user)
            .service(users::list_users),
    )
    .service(users::list_workers)
    .service(
        web::scope("/shifts")
            .service(shifts::list_shifts)
            .service(shifts::create_shift)
            .service(shifts::update_shift)
            .service(shifts::delete_shift),
    )
    .service(shifts::today_reminders)
    .service(
        web::scope("/vacations")
            .service(vacations::list_vacations)
            .service(vacations::request_vacation)
            .service(vacations::decide_vacation),
    )
    .service(export::export_pdf);
}
