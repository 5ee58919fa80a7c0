use crate::models::*;
use crate::services::DonationService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/donations",
    tag = "donations",
    request_body = CreateDonationRequest,
    responses(
        (status = 200, description = "创建捐赠成功", body = DonationResponse),
        (status = 400, description = "参数校验失败或活动已锁定")
    )
)]
pub async fn create_donation(
    service: web::Data<DonationService>,
    req: web::Json<CreateDonationRequest>,
) -> Result<HttpResponse> {
    match service.create_donation(req.into_inner()).await {
        Ok(donation) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": donation }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/donations",
    tag = "donations",
    params(
        ("event_id" = Option<i64>, Query, description = "按活动过滤"),
        ("transaction_state" = Option<String>, Query, description = "按交易状态过滤"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取捐赠列表成功", body = PaginatedResponse<DonationResponse>)
    )
)]
pub async fn list_donations(
    service: web::Data<DonationService>,
    query: web::Query<DonationQuery>,
) -> Result<HttpResponse> {
    match service.list_donations(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/donations/{id}",
    tag = "donations",
    params(("id" = i64, Path, description = "捐赠ID")),
    responses(
        (status = 200, description = "获取捐赠成功", body = DonationResponse),
        (status = 404, description = "捐赠不存在")
    )
)]
pub async fn get_donation(
    service: web::Data<DonationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_donation(path.into_inner()).await {
        Ok(donation) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": donation }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/donations/{id}",
    tag = "donations",
    params(("id" = i64, Path, description = "捐赠ID")),
    request_body = UpdateDonationRequest,
    responses(
        (status = 200, description = "更新捐赠成功", body = DonationResponse),
        (status = 400, description = "非 PENDING 状态缺少 donor")
    )
)]
pub async fn update_donation(
    service: web::Data<DonationService>,
    path: web::Path<i64>,
    req: web::Json<UpdateDonationRequest>,
) -> Result<HttpResponse> {
    match service
        .update_donation(path.into_inner(), req.into_inner())
        .await
    {
        Ok(donation) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": donation }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/donations/{id}/bids",
    tag = "donations",
    params(("id" = i64, Path, description = "捐赠ID")),
    request_body = CreateDonationBidRequest,
    responses(
        (status = 200, description = "分配成功", body = DonationBidResponse),
        (status = 400, description = "目标不是叶子或分配总额超出捐赠金额")
    )
)]
pub async fn add_donation_bid(
    service: web::Data<DonationService>,
    path: web::Path<i64>,
    req: web::Json<CreateDonationBidRequest>,
) -> Result<HttpResponse> {
    match service
        .add_donation_bid(path.into_inner(), req.into_inner())
        .await
    {
        Ok(allocation) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": allocation })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/donations/{id}/tickets",
    tag = "donations",
    params(("id" = i64, Path, description = "捐赠ID")),
    request_body = CreatePrizeTicketRequest,
    responses(
        (status = 200, description = "购买奖券成功", body = PrizeTicketResponse),
        (status = 400, description = "奖品非 ticket_draw 或奖券总额超出捐赠金额")
    )
)]
pub async fn add_prize_ticket(
    service: web::Data<DonationService>,
    path: web::Path<i64>,
    req: web::Json<CreatePrizeTicketRequest>,
) -> Result<HttpResponse> {
    match service
        .add_prize_ticket(path.into_inner(), req.into_inner())
        .await
    {
        Ok(ticket) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": ticket }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn donation_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/donations")
            .route("", web::post().to(create_donation))
            .route("", web::get().to(list_donations))
            .route("/{id}", web::get().to(get_donation))
            .route("/{id}", web::put().to(update_donation))
            .route("/{id}/bids", web::post().to(add_donation_bid))
            .route("/{id}/tickets", web::post().to(add_prize_ticket)),
    );
}
