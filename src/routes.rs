use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::handlers;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::resource("/depts")
                .route(web::get().to(handlers::department::list_departments))
                .route(web::post().to(handlers::department::create_department))
                .route(web::put().to(handlers::department::update_department_by_body)),
        )
        .service(
            web::resource("/depts/{id}")
                .route(web::get().to(handlers::department::get_department))
                .route(web::put().to(handlers::department::update_department))
                .route(web::delete().to(handlers::department::delete_department)),
        );
}
