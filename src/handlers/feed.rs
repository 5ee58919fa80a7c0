use crate::models::*;
use crate::services::FeedService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/feed/{event_id}/upcoming-runs",
    tag = "feed",
    params(("event_id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "接下来的 3 个 run", body = [UpcomingRunEntry])
    )
)]
pub async fn upcoming_runs(
    service: web::Data<FeedService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.upcoming_runs(path.into_inner()).await {
        Ok(results) => Ok(HttpResponse::Ok().json(json!({ "results": results }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/feed/{event_id}/upcoming-bids",
    tag = "feed",
    params(("event_id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "进行中的竞价及选项金额", body = [UpcomingBidEntry])
    )
)]
pub async fn upcoming_bids(
    service: web::Data<FeedService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.upcoming_bids(path.into_inner()).await {
        Ok(results) => Ok(HttpResponse::Ok().json(json!({ "results": results }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/feed/{event_id}/recent-donations",
    tag = "feed",
    params(("event_id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "最近 20 笔已完成捐赠", body = [RecentDonationEntry])
    )
)]
pub async fn recent_donations(
    service: web::Data<FeedService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.recent_donations(path.into_inner()).await {
        Ok(results) => Ok(HttpResponse::Ok().json(json!({ "results": results }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/feed/{event_id}/total",
    tag = "feed",
    params(("event_id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "活动已筹总额", body = EventTotalResponse)
    )
)]
pub async fn event_total(
    service: web::Data<FeedService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.event_total(path.into_inner()).await {
        Ok(total) => Ok(HttpResponse::Ok().json(total)),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (公开, 不在 /api/v1 下)
pub fn feed_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/feed")
            .route("/{event_id}/upcoming-runs", web::get().to(upcoming_runs))
            .route("/{event_id}/upcoming-bids", web::get().to(upcoming_bids))
            .route(
                "/{event_id}/recent-donations",
                web::get().to(recent_donations),
            )
            .route("/{event_id}/total", web::get().to(event_total)),
    );
}
