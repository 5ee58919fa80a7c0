use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 奖品与获奖者的关联
/// - (prize_id, winner_id) 唯一
/// - 奖品有类别时, 同一 (类别, 活动) 下同一捐赠者最多出现一次,
///   在落库事务内复查
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prize_winners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub prize_id: i64,
    pub winner_id: i64,
    pub email_sent: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
