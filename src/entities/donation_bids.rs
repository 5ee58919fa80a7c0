use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 捐赠金额在某个叶子 bid 上的分配
/// - amount > 0, 目标 bid 在提交时必须是叶子
/// - 单笔捐赠的分配总额不得超过捐赠金额
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "donation_bids")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub donation_id: i64,
    pub bid_id: i64,
    pub amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
