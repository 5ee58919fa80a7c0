use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 竞价节点状态 (整棵树以根节点状态为准)
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum BidState {
    #[sea_orm(string_value = "HIDDEN")]
    Hidden,
    #[sea_orm(string_value = "OPENED")]
    Opened,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl std::fmt::Display for BidState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BidState::Hidden => write!(f, "HIDDEN"),
            BidState::Opened => write!(f, "OPENED"),
            BidState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// 树形竞价节点实体
/// - event_id/speedrun_id/state 为根节点字段的冗余副本, 根节点变更时
///   由服务层在同一事务内写到全部后代
/// - is_target 的节点是叶子, 才允许接受捐赠分配
/// - revealed_at 在节点创建及 HIDDEN -> OPENED 时打点
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
