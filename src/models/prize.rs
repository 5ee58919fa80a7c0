use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{prize_category_entity, prize_entity, prize_winner_entity};

/// 创建奖品类别请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePrizeCategoryRequest {
    pub name: String,
}

/// 奖品类别响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeCategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<prize_category_entity::Model> for PrizeCategoryResponse {
    fn from(m: prize_category_entity::Model) -> Self {
        PrizeCategoryResponse {
            id: m.id,
            name: m.name,
        }
    }
}

/// 创建奖品请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePrizeRequest {
    pub name: String,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub sort_key: i32,
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    /// 最低参与金额, 必须大于 0
    pub minimum_bid: Decimal,
    /// 权重封顶金额; 非 sum 模式必须等于 minimum_bid
    pub maximum_bid: Option<Decimal>,
    pub sum_donations: bool,
    pub random_draw: Option<bool>,
    pub ticket_draw: Option<bool>,
    pub event_id: i64,
    pub start_run_id: Option<i64>,
    pub end_run_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub max_winners: Option<i32>,
}

/// 更新奖品请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub sort_key: Option<i32>,
    pub image: Option<Option<String>>,
    pub description: Option<String>,
    pub minimum_bid: Option<Decimal>,
    pub maximum_bid: Option<Option<Decimal>>,
    pub sum_donations: Option<bool>,
    pub random_draw: Option<bool>,
    pub ticket_draw: Option<bool>,
    pub start_run_id: Option<Option<i64>>,
    pub end_run_id: Option<Option<i64>>,
    pub start_time: Option<Option<DateTime<Utc>>>,
    pub end_time: Option<Option<DateTime<Utc>>>,
    pub max_winners: Option<i32>,
}

/// 奖品响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
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
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            category_id: m.category_id,
            sort_key: m.sort_key,
            image: m.image,
            description: m.description,
            minimum_bid: m.minimum_bid,
            maximum_bid: m.maximum_bid,
            sum_donations: m.sum_donations,
            random_draw: m.random_draw,
            ticket_draw: m.ticket_draw,
            event_id: m.event_id,
            start_run_id: m.start_run_id,
            end_run_id: m.end_run_id,
            start_time: m.start_time,
            end_time: m.end_time,
            max_winners: m.max_winners,
        }
    }
}

/// 抽奖候选人: 合格金额与归一化权重
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EligibleDonorResponse {
    pub donor_id: i64,
    pub amount: Decimal,
    pub weight: f64,
}

/// 抽奖请求; seed 提供时抽取结果可复现 (测试 / 审计)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DrawRequest {
    pub seed: Option<u64>,
}

/// 抽奖结果; winner_id 为空表示本轮无人符合条件
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub winner_id: Option<i64>,
}

/// 获奖记录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeWinnerResponse {
    pub id: i64,
    pub prize_id: i64,
    pub winner_id: i64,
    pub email_sent: bool,
}

impl From<prize_winner_entity::Model> for PrizeWinnerResponse {
    fn from(m: prize_winner_entity::Model) -> Self {
        PrizeWinnerResponse {
            id: m.id,
            prize_id: m.prize_id,
            winner_id: m.winner_id,
            email_sent: m.email_sent,
        }
    }
}
