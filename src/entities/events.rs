use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Currency;

/// 马拉松活动实体
/// - short: URL 安全的短标识 (`^\w+$`), 全局唯一
/// - target_amount: 筹款目标 (> 0)
/// - locked: 锁定后其子实体 (run/bid/donation/prize) 拒绝常规增改
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub short: String,
    pub name: String,
    pub receiver_name: String,
    pub currency: Currency,
    pub target_amount: Decimal,
    pub scheduled_at: DateTime<Utc>,
    pub locked: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
