use actix_web::{get, web, Responder};

pub mod enrollment_api;

#[get("/ping")]
async fn debug_ping() -> impl Responder {
    // just to test that the server is running
    "Pong!"
}

/// Registers every route of the service. Used by `main` and by the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(debug_ping)
        .service(enrollment_api::enroll)
        .service(enrollment_api::drop_course)
        .service(enrollment_api::enrolled_courses);
}
