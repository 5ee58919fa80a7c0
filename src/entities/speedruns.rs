use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 比赛项目实体
/// - 属于唯一一个活动, 同一活动内名称唯一
/// - sort_key 决定节目单顺序, 奖品的 run 窗口按它校验先后
/// - 约束: end_time >= start_time
/// - deprecated_runners: 旧数据的自由文本选手名单, 新数据走 speedrun_runners 关联
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "speedruns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub sort_key: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub deprecated_runners: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
