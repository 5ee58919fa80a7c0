use actix_cors::Cors;

/// feed 接口会被活动方的播报页面跨域拉取, 放行所有来源;
/// 管理接口部署在内网, 不依赖浏览器侧限制
pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
