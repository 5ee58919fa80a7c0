use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{DonorVisibility, donor_entity};

/// 创建捐赠者请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDonorRequest {
    pub email: String,
    /// 空字符串视为未设置
    pub alias: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub visibility: Option<DonorVisibility>,
}

/// 更新捐赠者请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateDonorRequest {
    pub email: Option<String>,
    pub alias: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub visibility: Option<DonorVisibility>,
}

/// 捐赠者响应 (对外名称已按 visibility 渲染)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonorResponse {
    pub id: i64,
    pub email: String,
    pub alias: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub visibility: DonorVisibility,
    pub visible_name: String,
}

impl From<donor_entity::Model> for DonorResponse {
    fn from(m: donor_entity::Model) -> Self {
        let visible_name = m.visible_name();
        DonorResponse {
            id: m.id,
            email: m.email,
            alias: m.alias,
            first_name: m.first_name,
            last_name: m.last_name,
            visibility: m.visibility,
            visible_name,
        }
    }
}
