use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{BidState, bid_entity, bid_suggestion_entity};

/// 创建竞价节点请求
/// event_id 与 speedrun_id 仅对根节点有意义; 子节点创建时
/// 会从根节点继承这两个字段与 state
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBidRequest {
    pub event_id: Option<i64>,
    pub speedrun_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub name: String,
    pub state: Option<BidState>,
    #[serde(default)]
    pub description: String,
    /// 可选目标金额, 必须大于 0
    pub goal: Option<Decimal>,
    #[serde(default)]
    pub is_target: bool,
}

/// 更新竞价节点请求
/// event_id / speedrun_id 只对根节点生效, 子节点的权威字段始终从根拉取
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBidRequest {
    pub name: Option<String>,
    pub state: Option<BidState>,
    pub description: Option<String>,
    pub goal: Option<Decimal>,
    pub is_target: Option<bool>,
    /// 提供时执行换父操作; Some(None) 表示提升为根
    pub parent_id: Option<Option<i64>>,
    pub event_id: Option<i64>,
    /// Some(None) 表示解除与 run 的关联
    pub speedrun_id: Option<Option<i64>>,
}

/// 单独的状态变更请求 (级联整棵子树)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetBidStateRequest {
    pub state: BidState,
}

/// 重命名请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameBidRequest {
    pub name: String,
}

/// 换父请求 (None 表示提升为根)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReparentBidRequest {
    pub parent_id: Option<i64>,
}

/// 竞价节点响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BidResponse {
    pub id: i64,
    pub event_id: Option<i64>,
    pub speedrun_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub name: String,
    pub state: BidState,
    pub description: String,
    pub goal: Option<Decimal>,
    pub is_target: bool,
    pub revealed_at: Option<DateTime<Utc>>,
}

impl From<bid_entity::Model> for BidResponse {
    fn from(m: bid_entity::Model) -> Self {
        BidResponse {
            id: m.id,
            event_id: m.event_id,
            speedrun_id: m.speedrun_id,
            parent_id: m.parent_id,
            name: m.name,
            state: m.state,
            description: m.description,
            goal: m.goal,
            is_target: m.is_target,
            revealed_at: m.revealed_at,
        }
    }
}

/// 提交选项建议请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBidSuggestionRequest {
    pub name: String,
}

/// 选项建议响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BidSuggestionResponse {
    pub id: i64,
    pub bid_id: i64,
    pub name: String,
}

impl From<bid_suggestion_entity::Model> for BidSuggestionResponse {
    fn from(m: bid_suggestion_entity::Model) -> Self {
        BidSuggestionResponse {
            id: m.id,
            bid_id: m.bid_id,
            name: m.name,
        }
    }
}
