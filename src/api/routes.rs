use actix_web::{delete, get, post, put, web, HttpResponse, Result as WebResult};
use serde_json::json;
use uuid::Uuid;

use crate::api::models::{CreateAnalysisRequest, UpdateAnalysisRequest};
use crate::catalog;
use crate::db::{service::DbService, DbPool};

// The pool is absent when the store connection failed at boot; CRUD answers
// 500 while the rest of the API keeps serving.
type MaybePool = Option<DbPool>;

fn db_unavailable() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "error": "Database unavailable",
    }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": "Not found",
    }))
}

fn store_error(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "error": e.to_string(),
    }))
}

#[get("/common-conditions")]
pub async fn common_conditions() -> WebResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "conditions": catalog::COMMON_CONDITIONS,
    })))
}

#[post("")]
pub async fn create_analysis(
    pool: web::Data<MaybePool>,
    req: web::Json<CreateAnalysisRequest>,
) -> WebResult<HttpResponse> {
    let Some(pool) = pool.get_ref() else {
        return Ok(db_unavailable());
    };
    let conn = pool.lock().unwrap();
    let req = req.into_inner();

    match DbService::insert_analysis(
        &conn,
        req.image_name.as_deref(),
        &req.result,
        req.notes.as_deref(),
        req.refer_to_derm,
    ) {
        Ok(analysis) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "analysis": analysis,
        }))),
        Err(e) => Ok(store_error(e)),
    }
}

#[get("")]
pub async fn list_analyses(pool: web::Data<MaybePool>) -> WebResult<HttpResponse> {
    let Some(pool) = pool.get_ref() else {
        return Ok(db_unavailable());
    };
    let conn = pool.lock().unwrap();

    match DbService::list_analyses(&conn) {
        Ok(analyses) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "analyses": analyses,
        }))),
        Err(e) => Ok(store_error(e)),
    }
}

#[get("/{id}")]
pub async fn get_analysis(
    pool: web::Data<MaybePool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let Some(pool) = pool.get_ref() else {
        return Ok(db_unavailable());
    };
    let conn = pool.lock().unwrap();

    match DbService::get_analysis(&conn, id.into_inner()) {
        Ok(Some(analysis)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "analysis": analysis,
        }))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(store_error(e)),
    }
}

#[put("/{id}")]
pub async fn update_analysis(
    pool: web::Data<MaybePool>,
    id: web::Path<Uuid>,
    req: web::Json<UpdateAnalysisRequest>,
) -> WebResult<HttpResponse> {
    let Some(pool) = pool.get_ref() else {
        return Ok(db_unavailable());
    };
    let conn = pool.lock().unwrap();
    let req = req.into_inner();

    match DbService::update_analysis(
        &conn,
        id.into_inner(),
        req.image_name.as_deref(),
        req.result.as_ref(),
        req.notes.as_deref(),
        req.refer_to_derm,
    ) {
        Ok(Some(analysis)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "analysis": analysis,
        }))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(store_error(e)),
    }
}

#[delete("/{id}")]
pub async fn delete_analysis(
    pool: web::Data<MaybePool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let Some(pool) = pool.get_ref() else {
        return Ok(db_unavailable());
    };
    let conn = pool.lock().unwrap();

    match DbService::delete_analysis(&conn, id.into_inner()) {
        Ok(true) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(store_error(e)),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(common_conditions).service(
        web::scope("/api/analyses")
            .service(create_analysis)
            .service(list_analyses)
            .service(get_analysis)
            .service(update_analysis)
            .service(delete_analysis),
    );
}
