use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::{debug, error, info};
use validator::Validate;

use crate::errors::AppError;
use crate::models::department::{DepartmentUpdate, NewDepartment};
use crate::models::response::ApiResponse;
use crate::store::DepartmentStore;

/// Only positive integers are ids.
fn check_id(id: i64) -> Result<i64, AppError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(AppError::BadRequest("Invalid id format".to_string()))
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest("Invalid id format".to_string()))
        .and_then(check_id)
}

fn log_store_error(err: &AppError) {
    if matches!(err, AppError::DatabaseError(_) | AppError::InternalServerError(_)) {
        error!("department store failure: {}", err);
    }
}

fn not_found(id: i64) -> AppError {
    debug!("department {} not found", id);
    AppError::NotFound("Department not found".to_string())
}

pub async fn list_departments(
    store: web::Data<dyn DepartmentStore>,
) -> Result<HttpResponse, AppError> {
    let departments = store.list().await.inspect_err(log_store_error)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(departments)))
}

pub async fn get_department(
    store: web::Data<dyn DepartmentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;

    match store.find(id).await.inspect_err(log_store_error)? {
        Some(department) => Ok(HttpResponse::Ok().json(ApiResponse::ok(department))),
        None => Err(not_found(id)),
    }
}

pub async fn create_department(
    store: web::Data<dyn DepartmentStore>,
    new_department: web::Json<NewDepartment>,
) -> Result<HttpResponse, AppError> {
    new_department.validate()?;

    let department = store
        .create(&new_department.name, Utc::now())
        .await
        .inspect_err(log_store_error)?;

    info!("created department {} ({})", department.id, department.name);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(department)))
}

/// `PUT /depts/{id}`: the path names the target row. A body `id`, if sent, must agree.
pub async fn update_department(
    store: web::Data<dyn DepartmentStore>,
    id: web::Path<String>,
    updates: web::Json<DepartmentUpdate>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    if updates.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::BadRequest(
            "Department id in body does not match path".to_string(),
        ));
    }
    updates.validate()?;

    save_department(&**store, id, &updates.name).await
}

/// `PUT /depts`: the body must carry the target id.
pub async fn update_department_by_body(
    store: web::Data<dyn DepartmentStore>,
    updates: web::Json<DepartmentUpdate>,
) -> Result<HttpResponse, AppError> {
    let id = updates
        .id
        .ok_or_else(|| AppError::BadRequest("Missing department id".to_string()))
        .and_then(check_id)?;
    updates.validate()?;

    save_department(&**store, id, &updates.name).await
}

async fn save_department(
    store: &dyn DepartmentStore,
    id: i64,
    name: &str,
) -> Result<HttpResponse, AppError> {
    match store.save(id, name, Utc::now()).await.inspect_err(log_store_error)? {
        Some(department) => {
            info!("renamed department {} to {}", department.id, department.name);
            Ok(HttpResponse::Ok().json(ApiResponse::ok(department)))
        }
        None => Err(not_found(id)),
    }
}

pub async fn delete_department(
    store: web::Data<dyn DepartmentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;

    if !store.delete(id).await.inspect_err(log_store_error)? {
        return Err(not_found(id));
    }

    info!("deleted department {}", id);
    Ok(HttpResponse::Ok().json(ApiResponse::empty()))
}
