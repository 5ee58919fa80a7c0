use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 奖品配置实体
/// - 抽奖窗口二选一: (start_run_id, end_run_id) 成对出现, 或
///   (start_time, end_time) 成对出现, 不允许两对同时设置或只设一半
/// - sum_donations: 按捐赠者累计金额参与, 否则取单笔最大
/// - random_draw: 加权随机抽取, 否则固定取最高金额者
/// - ticket_draw: 资格由奖券而非时间窗口决定
/// - maximum_bid 为空表示权重不封顶; 非 sum 模式下必须等于 minimum_bid
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub sort_key: i32,
    pub image: Option<String>,
    pub description: String,
    pub minimum_bid: Decimal,
    pub maximum_bid: Option<Decimal>,
    pub sum_donations: bool,
    pub random_draw: bool,
    pub ticket_draw: bool,
    pub event_id: i64,
    pub start_run_id: Option<i64>,
    pub end_run_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub max_winners: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 窗口由 run 对定义
    pub fn uses_run_window(&self) -> bool {
        self.start_run_id.is_some() && self.end_run_id.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
