use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Currency;

/// 捐赠来源渠道
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum DonationDomain {
    #[sea_orm(string_value = "LOCAL")]
    Local,
    #[sea_orm(string_value = "CHIPIN")]
    Chipin,
    #[sea_orm(string_value = "PAYPAL")]
    Paypal,
}

/// 交易状态: 只有 COMPLETED 的捐赠参与统计与抽奖
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(64))")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionState {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "FLAGGED")]
    Flagged,
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionState::Pending => write!(f, "PENDING"),
            TransactionState::Completed => write!(f, "COMPLETED"),
            TransactionState::Cancelled => write!(f, "CANCELLED"),
            TransactionState::Flagged => write!(f, "FLAGGED"),
        }
    }
}

/// 竞价分配的处理状态 (主持人工作流)
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum BidProcessingState {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "IGNORED")]
    Ignored,
    #[sea_orm(string_value = "PROCESSED")]
    Processed,
    #[sea_orm(string_value = "FLAGGED")]
    Flagged,
}

/// 播报状态
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadState {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "READY")]
    Ready,
    #[sea_orm(string_value = "IGNORED")]
    Ignored,
    #[sea_orm(string_value = "READ")]
    Read,
    #[sea_orm(string_value = "FLAGGED")]
    Flagged,
}

/// 留言审核状态
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentState {
    #[sea_orm(string_value = "ABSENT")]
    Absent,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "DENIED")]
    Denied,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "FLAGGED")]
    Flagged,
}

/// 捐赠时请求的名称展示模式 (CURR = 沿用捐赠者当前设置)
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestedVisibility {
    #[sea_orm(string_value = "CURR")]
    Curr,
    #[sea_orm(string_value = "FULL")]
    Full,
    #[sea_orm(string_value = "FIRST")]
    First,
    #[sea_orm(string_value = "ALIAS")]
    Alias,
    #[sea_orm(string_value = "ANON")]
    Anon,
}

/// 捐赠实体
/// - transaction_state 离开 PENDING 后必须关联 donor (服务层校验)
/// - domain_id 去重来自支付渠道的重复通知, 全局唯一
/// - test_donation 的测试数据不参与任何统计与抽奖
/// - 关联的竞价分配总额 / 奖券总额都不得超过 amount
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub donor_id: Option<i64>,
    pub event_id: i64,
    pub domain: DonationDomain,
    pub domain_id: String,
    pub transaction_state: TransactionState,
    pub bid_state: BidProcessingState,
    pub read_state: ReadState,
    pub comment_state: CommentState,
    pub amount: Decimal,
    pub fee: Decimal,
    pub currency: Currency,
    pub time_received: DateTime<Utc>,
    pub comment: String,
    pub mod_comment: String,
    pub test_donation: bool,
    pub requested_visibility: RequestedVisibility,
    pub requested_alias: Option<String>,
    pub requested_email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
