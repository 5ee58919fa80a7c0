use crate::models::*;
use crate::services::DonorService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/donors",
    tag = "donors",
    request_body = CreateDonorRequest,
    responses(
        (status = 200, description = "创建捐赠者成功", body = DonorResponse),
        (status = 400, description = "参数校验失败")
    )
)]
pub async fn create_donor(
    service: web::Data<DonorService>,
    req: web::Json<CreateDonorRequest>,
) -> Result<HttpResponse> {
    match service.create_donor(req.into_inner()).await {
        Ok(donor) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": donor }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/donors",
    tag = "donors",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取捐赠者列表成功", body = PaginatedResponse<DonorResponse>)
    )
)]
pub async fn list_donors(
    service: web::Data<DonorService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match service.list_donors(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/donors/{id}",
    tag = "donors",
    params(("id" = i64, Path, description = "捐赠者ID")),
    responses(
        (status = 200, description = "获取捐赠者成功", body = DonorResponse),
        (status = 404, description = "捐赠者不存在")
    )
)]
pub async fn get_donor(
    service: web::Data<DonorService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_donor(path.into_inner()).await {
        Ok(donor) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": donor }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/donors/{id}",
    tag = "donors",
    params(("id" = i64, Path, description = "捐赠者ID")),
    request_body = UpdateDonorRequest,
    responses(
        (status = 200, description = "更新捐赠者成功", body = DonorResponse),
        (status = 404, description = "捐赠者不存在")
    )
)]
pub async fn update_donor(
    service: web::Data<DonorService>,
    path: web::Path<i64>,
    req: web::Json<UpdateDonorRequest>,
) -> Result<HttpResponse> {
    match service.update_donor(path.into_inner(), req.into_inner()).await {
        Ok(donor) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": donor }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn donor_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/donors")
            .route("", web::post().to(create_donor))
            .route("", web::get().to(list_donors))
            .route("/{id}", web::get().to(get_donor))
            .route("/{id}", web::put().to(update_donor)),
    );
}
