use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// run 与 donor 的多对多关联 (选手)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "speedrun_runners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub speedrun_id: i64,
    pub donor_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
