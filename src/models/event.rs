use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{event_entity, speedrun_entity};
use crate::models::Currency;

/// 创建活动请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// URL 安全短标识 (`^\w+$`)
    pub short: String,
    pub name: String,
    #[serde(default)]
    pub receiver_name: String,
    pub currency: Currency,
    /// 筹款目标, 必须大于 0
    pub target_amount: Decimal,
    pub scheduled_at: DateTime<Utc>,
}

/// 更新活动请求 (缺省字段不变)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub receiver_name: Option<String>,
    pub currency: Option<Currency>,
    pub target_amount: Option<Decimal>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub locked: Option<bool>,
}

/// 活动响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub short: String,
    pub name: String,
    pub receiver_name: String,
    pub currency: Currency,
    pub target_amount: Decimal,
    pub scheduled_at: DateTime<Utc>,
    pub locked: bool,
}

impl From<event_entity::Model> for EventResponse {
    fn from(m: event_entity::Model) -> Self {
        EventResponse {
            id: m.id,
            short: m.short,
            name: m.name,
            receiver_name: m.receiver_name,
            currency: m.currency,
            target_amount: m.target_amount,
            scheduled_at: m.scheduled_at,
            locked: m.locked,
        }
    }
}

/// 创建比赛项目请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSpeedrunRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sort_key: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// 关联的选手 donor id 列表
    #[serde(default)]
    pub runner_ids: Vec<i64>,
}

/// 更新比赛项目请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSpeedrunRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_key: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub runner_ids: Option<Vec<i64>>,
}

/// 比赛项目响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpeedrunResponse {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub sort_key: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// 旧数据的自由文本选手名单
    pub deprecated_runners: String,
}

impl From<speedrun_entity::Model> for SpeedrunResponse {
    fn from(m: speedrun_entity::Model) -> Self {
        SpeedrunResponse {
            id: m.id,
            event_id: m.event_id,
            name: m.name,
            description: m.description,
            sort_key: m.sort_key,
            start_time: m.start_time,
            end_time: m.end_time,
            deprecated_runners: m.deprecated_runners,
        }
    }
}
