use crate::models::*;
use crate::services::BidService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/bids",
    tag = "bids",
    request_body = CreateBidRequest,
    responses(
        (status = 200, description = "创建竞价节点成功", body = BidResponse),
        (status = 400, description = "违反树约束 (重名 / target 规则等)")
    )
)]
pub async fn create_bid(
    service: web::Data<BidService>,
    req: web::Json<CreateBidRequest>,
) -> Result<HttpResponse> {
    match service.create_bid(req.into_inner()).await {
        Ok(bid) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": bid }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bids/{id}",
    tag = "bids",
    params(("id" = i64, Path, description = "竞价节点ID")),
    responses(
        (status = 200, description = "获取竞价节点成功", body = BidResponse),
        (status = 404, description = "竞价节点不存在")
    )
)]
pub async fn get_bid(service: web::Data<BidService>, path: web::Path<i64>) -> Result<HttpResponse> {
    match service.get_bid(path.into_inner()).await {
        Ok(bid) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": bid }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/bids/{id}",
    tag = "bids",
    params(("id" = i64, Path, description = "竞价节点ID")),
    request_body = UpdateBidRequest,
    responses(
        (status = 200, description = "更新竞价节点成功 (根编辑会级联整棵子树)", body = BidResponse),
        (status = 400, description = "违反树约束")
    )
)]
pub async fn update_bid(
    service: web::Data<BidService>,
    path: web::Path<i64>,
    req: web::Json<UpdateBidRequest>,
) -> Result<HttpResponse> {
    match service.update_bid(path.into_inner(), req.into_inner()).await {
        Ok(bid) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": bid }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/bids/{id}/state",
    tag = "bids",
    params(("id" = i64, Path, description = "竞价节点ID")),
    request_body = SetBidStateRequest,
    responses(
        (status = 200, description = "状态变更成功", body = BidResponse)
    )
)]
pub async fn set_bid_state(
    service: web::Data<BidService>,
    path: web::Path<i64>,
    req: web::Json<SetBidStateRequest>,
) -> Result<HttpResponse> {
    match service
        .set_bid_state(path.into_inner(), req.into_inner().state)
        .await
    {
        Ok(bid) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": bid }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/bids/{id}/rename",
    tag = "bids",
    params(("id" = i64, Path, description = "竞价节点ID")),
    request_body = RenameBidRequest,
    responses(
        (status = 200, description = "重命名成功", body = BidResponse),
        (status = 400, description = "同作用域下重名")
    )
)]
pub async fn rename_bid(
    service: web::Data<BidService>,
    path: web::Path<i64>,
    req: web::Json<RenameBidRequest>,
) -> Result<HttpResponse> {
    match service
        .rename_bid(path.into_inner(), req.into_inner().name)
        .await
    {
        Ok(bid) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": bid }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/bids/{id}/reparent",
    tag = "bids",
    params(("id" = i64, Path, description = "竞价节点ID")),
    request_body = ReparentBidRequest,
    responses(
        (status = 200, description = "换父成功, 权威字段已从新根拉取", body = BidResponse),
        (status = 400, description = "新父为 target 或位于自身子树内")
    )
)]
pub async fn reparent_bid(
    service: web::Data<BidService>,
    path: web::Path<i64>,
    req: web::Json<ReparentBidRequest>,
) -> Result<HttpResponse> {
    match service
        .reparent_bid(path.into_inner(), req.into_inner().parent_id)
        .await
    {
        Ok(bid) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": bid }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/bids/{id}/suggestions",
    tag = "bids",
    params(("id" = i64, Path, description = "竞价节点ID")),
    request_body = CreateBidSuggestionRequest,
    responses(
        (status = 200, description = "提交建议成功", body = BidSuggestionResponse),
        (status = 400, description = "活动内建议重名")
    )
)]
pub async fn add_suggestion(
    service: web::Data<BidService>,
    path: web::Path<i64>,
    req: web::Json<CreateBidSuggestionRequest>,
) -> Result<HttpResponse> {
    match service
        .add_suggestion(path.into_inner(), req.into_inner().name)
        .await
    {
        Ok(s) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": s }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bids/{id}/suggestions",
    tag = "bids",
    params(("id" = i64, Path, description = "竞价节点ID")),
    responses(
        (status = 200, description = "获取建议列表成功", body = [BidSuggestionResponse])
    )
)]
pub async fn list_suggestions(
    service: web::Data<BidService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_suggestions(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bids",
    tag = "bids",
    params(("event_id" = i64, Query, description = "活动ID")),
    responses(
        (status = 200, description = "获取活动内竞价列表成功", body = [BidResponse])
    )
)]
pub async fn list_bids(
    service: web::Data<BidService>,
    query: web::Query<EventScopedQuery>,
) -> Result<HttpResponse> {
    match service.list_bids(query.into_inner().event_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn bid_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bids")
            .route("", web::post().to(create_bid))
            .route("", web::get().to(list_bids))
            .route("/{id}", web::get().to(get_bid))
            .route("/{id}", web::put().to(update_bid))
            .route("/{id}/state", web::post().to(set_bid_state))
            .route("/{id}/rename", web::post().to(rename_bid))
            .route("/{id}/reparent", web::post().to(reparent_bid))
            .route("/{id}/suggestions", web::post().to(add_suggestion))
            .route("/{id}/suggestions", web::get().to(list_suggestions)),
    );
}
