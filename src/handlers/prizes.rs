use crate::models::*;
use crate::services::{DrawService, PrizeService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/prizes",
    tag = "prizes",
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "创建奖品成功", body = PrizeResponse),
        (status = 400, description = "配置校验失败 (返回全部违规项)")
    )
)]
pub async fn create_prize(
    service: web::Data<PrizeService>,
    req: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create_prize(req.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/{id}",
    tag = "prizes",
    params(("id" = i64, Path, description = "奖品ID")),
    responses(
        (status = 200, description = "获取奖品成功", body = PrizeResponse),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn get_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_prize(path.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/prizes/{id}",
    tag = "prizes",
    params(("id" = i64, Path, description = "奖品ID")),
    request_body = UpdatePrizeRequest,
    responses(
        (status = 200, description = "更新奖品成功", body = PrizeResponse),
        (status = 400, description = "配置校验失败, 原配置保持不变")
    )
)]
pub async fn update_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    req: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.update_prize(path.into_inner(), req.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prizes",
    params(("event_id" = i64, Query, description = "活动ID")),
    responses(
        (status = 200, description = "获取活动奖品列表成功", body = [PrizeResponse])
    )
)]
pub async fn list_prizes(
    service: web::Data<PrizeService>,
    query: web::Query<EventScopedQuery>,
) -> Result<HttpResponse> {
    match service.list_prizes(query.into_inner().event_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/{id}/eligible-donors",
    tag = "prizes",
    params(("id" = i64, Path, description = "奖品ID")),
    responses(
        (status = 200, description = "合格捐赠者列表 (含金额与权重, 按 donor id 排序)", body = [EligibleDonorResponse]),
        (status = 400, description = "奖品配置校验失败")
    )
)]
pub async fn eligible_donors(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.eligible_donors(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/prizes/{id}/draw",
    tag = "prizes",
    params(("id" = i64, Path, description = "奖品ID")),
    request_body = DrawRequest,
    responses(
        (status = 200, description = "抽取完成; winner_id 为空表示本轮无人符合条件", body = DrawResponse),
        (status = 400, description = "奖品配置校验失败"),
        (status = 409, description = "并发冲突或名额已满, 可重试")
    )
)]
pub async fn draw_prize(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    req: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service.draw(path.into_inner(), req.into_inner().seed).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/{id}/winners",
    tag = "prizes",
    params(("id" = i64, Path, description = "奖品ID")),
    responses(
        (status = 200, description = "获奖记录列表", body = [PrizeWinnerResponse])
    )
)]
pub async fn list_winners(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_winners(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/prize-categories",
    tag = "prizes",
    request_body = CreatePrizeCategoryRequest,
    responses(
        (status = 200, description = "创建奖品类别成功", body = PrizeCategoryResponse),
        (status = 400, description = "类别重名")
    )
)]
pub async fn create_category(
    service: web::Data<PrizeService>,
    req: web::Json<CreatePrizeCategoryRequest>,
) -> Result<HttpResponse> {
    match service.create_category(req.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": category }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prize-categories",
    tag = "prizes",
    responses(
        (status = 200, description = "获取类别列表成功", body = [PrizeCategoryResponse])
    )
)]
pub async fn list_categories(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_categories().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prizes")
            .route("", web::post().to(create_prize))
            .route("", web::get().to(list_prizes))
            .route("/{id}", web::get().to(get_prize))
            .route("/{id}", web::put().to(update_prize))
            .route("/{id}/eligible-donors", web::get().to(eligible_donors))
            .route("/{id}/draw", web::post().to(draw_prize))
            .route("/{id}/winners", web::get().to(list_winners)),
    )
    .service(
        web::scope("/prize-categories")
            .route("", web::post().to(create_category))
            .route("", web::get().to(list_categories)),
    );
}
