use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{
    BidProcessingState, CommentState, DonationDomain, ReadState, RequestedVisibility,
    TransactionState, donation_bid_entity, donation_entity, prize_ticket_entity,
};
use crate::models::Currency;

/// 创建捐赠请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDonationRequest {
    pub donor_id: Option<i64>,
    pub event_id: i64,
    pub domain: Option<DonationDomain>,
    /// 渠道侧唯一标识; LOCAL 且有 donor 时缺省自动生成
    pub domain_id: Option<String>,
    pub transaction_state: Option<TransactionState>,
    /// 金额, 必须大于 0
    pub amount: Decimal,
    /// 手续费, 不允许为负
    pub fee: Option<Decimal>,
    pub currency: Currency,
    pub time_received: DateTime<Utc>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub test_donation: bool,
    pub requested_visibility: Option<RequestedVisibility>,
    pub requested_alias: Option<String>,
    pub requested_email: Option<String>,
}

/// 更新捐赠请求 (状态流转 / 审核)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateDonationRequest {
    pub donor_id: Option<i64>,
    pub transaction_state: Option<TransactionState>,
    pub bid_state: Option<BidProcessingState>,
    pub read_state: Option<ReadState>,
    pub comment_state: Option<CommentState>,
    pub mod_comment: Option<String>,
}

/// 捐赠列表查询参数
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DonationQuery {
    pub event_id: Option<i64>,
    pub transaction_state: Option<TransactionState>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// 捐赠响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonationResponse {
    pub id: i64,
    pub donor_id: Option<i64>,
    pub event_id: i64,
    pub domain: DonationDomain,
    pub transaction_state: TransactionState,
    pub bid_state: BidProcessingState,
    pub read_state: ReadState,
    pub comment_state: CommentState,
    pub amount: Decimal,
    pub fee: Decimal,
    pub currency: Currency,
    pub time_received: DateTime<Utc>,
    pub comment: String,
    pub test_donation: bool,
}

impl From<donation_entity::Model> for DonationResponse {
    fn from(m: donation_entity::Model) -> Self {
        DonationResponse {
            id: m.id,
            donor_id: m.donor_id,
            event_id: m.event_id,
            domain: m.domain,
            transaction_state: m.transaction_state,
            bid_state: m.bid_state,
            read_state: m.read_state,
            comment_state: m.comment_state,
            amount: m.amount,
            fee: m.fee,
            currency: m.currency,
            time_received: m.time_received,
            comment: m.comment,
            test_donation: m.test_donation,
        }
    }
}

/// 在叶子 bid 上分配金额的请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDonationBidRequest {
    pub bid_id: i64,
    /// 分配金额, 必须大于 0
    pub amount: Decimal,
}

/// 竞价分配响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonationBidResponse {
    pub id: i64,
    pub donation_id: i64,
    pub bid_id: i64,
    pub amount: Decimal,
}

impl From<donation_bid_entity::Model> for DonationBidResponse {
    fn from(m: donation_bid_entity::Model) -> Self {
        DonationBidResponse {
            id: m.id,
            donation_id: m.donation_id,
            bid_id: m.bid_id,
            amount: m.amount,
        }
    }
}

/// 购买奖券请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePrizeTicketRequest {
    pub prize_id: i64,
    /// 投入金额, 必须大于 0
    pub amount: Decimal,
}

/// 奖券响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeTicketResponse {
    pub id: i64,
    pub prize_id: i64,
    pub donation_id: i64,
    pub amount: Decimal,
}

impl From<prize_ticket_entity::Model> for PrizeTicketResponse {
    fn from(m: prize_ticket_entity::Model) -> Self {
        PrizeTicketResponse {
            id: m.id,
            prize_id: m.prize_id,
            donation_id: m.donation_id,
            amount: m.amount,
        }
    }
}
