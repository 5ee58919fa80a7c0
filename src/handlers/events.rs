use crate::models::*;
use crate::services::EventService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "创建活动成功", body = EventResponse),
        (status = 400, description = "参数校验失败")
    )
)]
pub async fn create_event(
    service: web::Data<EventService>,
    req: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    match service.create_event(req.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": event }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "获取活动列表成功", body = [EventResponse])
    )
)]
pub async fn list_events(service: web::Data<EventService>) -> Result<HttpResponse> {
    match service.list_events().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "获取活动成功", body = EventResponse),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn get_event(
    service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_event(path.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": event }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "活动ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "更新活动成功", body = EventResponse),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn update_event(
    service: web::Data<EventService>,
    path: web::Path<i64>,
    req: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse> {
    match service.update_event(path.into_inner(), req.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": event }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events/{id}/runs",
    tag = "events",
    params(("id" = i64, Path, description = "活动ID")),
    request_body = CreateSpeedrunRequest,
    responses(
        (status = 200, description = "创建比赛项目成功", body = SpeedrunResponse),
        (status = 400, description = "参数校验失败或活动已锁定")
    )
)]
pub async fn create_speedrun(
    service: web::Data<EventService>,
    path: web::Path<i64>,
    req: web::Json<CreateSpeedrunRequest>,
) -> Result<HttpResponse> {
    match service
        .create_speedrun(path.into_inner(), req.into_inner())
        .await
    {
        Ok(run) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": run }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}/runs",
    tag = "events",
    params(("id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "获取比赛项目列表成功", body = [SpeedrunResponse])
    )
)]
pub async fn list_speedruns(
    service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_speedruns(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/runs/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "比赛项目ID")),
    request_body = UpdateSpeedrunRequest,
    responses(
        (status = 200, description = "更新比赛项目成功", body = SpeedrunResponse),
        (status = 404, description = "比赛项目不存在")
    )
)]
pub async fn update_speedrun(
    service: web::Data<EventService>,
    path: web::Path<i64>,
    req: web::Json<UpdateSpeedrunRequest>,
) -> Result<HttpResponse> {
    match service
        .update_speedrun(path.into_inner(), req.into_inner())
        .await
    {
        Ok(run) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": run }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn event_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::post().to(create_event))
            .route("", web::get().to(list_events))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", web::put().to(update_event))
            .route("/{id}/runs", web::post().to(create_speedrun))
            .route("/{id}/runs", web::get().to(list_speedruns)),
    )
    .service(web::scope("/runs").route("/{id}", web::put().to(update_speedrun)));
}
