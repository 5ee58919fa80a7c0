use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// 即将开始的比赛项目 (播报 ticker)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpcomingRunEntry {
    pub game: String,
    pub runners: Vec<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: chrono::DateTime<chrono::Utc>,
}

/// 竞价选项及其已筹金额
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BidOptionEntry {
    pub name: String,
    pub amount_raised: Decimal,
}

/// 进行中的竞价及其选项
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpcomingBidEntry {
    pub game: String,
    pub bid: String,
    pub goal: Option<Decimal>,
    pub amount_raised: Decimal,
    pub options: Vec<BidOptionEntry>,
}

/// 最近的捐赠 (捐赠者名称已按 visibility 渲染)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentDonationEntry {
    pub id: i64,
    pub donor: String,
    pub comment: String,
    pub amount: Decimal,
}

/// 活动已筹总额
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventTotalResponse {
    pub total: Decimal,
}
