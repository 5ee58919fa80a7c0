use crate::entities::{
    BidState, CommentState, TransactionState, bid_entity as bids,
    donation_bid_entity as donation_bids, donation_entity as donations, donor_entity as donors,
    speedrun_entity as runs, speedrun_runners,
};
use crate::error::AppResult;
use crate::models::{
    BidOptionEntry, EventTotalResponse, RecentDonationEntry, UpcomingBidEntry, UpcomingRunEntry,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

/// 公共播报数据 (ticker): 即将到来的 run / 进行中的竞价 / 最近捐赠 / 总额。
/// 只读查询, 测试捐赠一律不计入。
#[derive(Clone)]
pub struct FeedService {
    pool: DatabaseConnection,
}

impl FeedService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 接下来的 3 个尚未结束的 run
    pub async fn upcoming_runs(&self, event_id: i64) -> AppResult<Vec<UpcomingRunEntry>> {
        let now = Utc::now();
        let run_list = runs::Entity::find()
            .filter(runs::Column::EventId.eq(event_id))
            .filter(runs::Column::EndTime.gte(now))
            .order_by_asc(runs::Column::StartTime)
            .limit(3)
            .all(&self.pool)
            .await?;

        let run_ids: Vec<i64> = run_list.iter().map(|r| r.id).collect();
        let links = speedrun_runners::Entity::find()
            .filter(speedrun_runners::Column::SpeedrunId.is_in(run_ids))
            .all(&self.pool)
            .await?;
        let donor_ids: Vec<i64> = links.iter().map(|l| l.donor_id).collect();
        let donor_map: HashMap<i64, donors::Model> = donors::Entity::find()
            .filter(donors::Column::Id.is_in(donor_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        let mut results = Vec::new();
        for run in run_list {
            let mut runners: Vec<String> = links
                .iter()
                .filter(|l| l.speedrun_id == run.id)
                .filter_map(|l| donor_map.get(&l.donor_id))
                .map(|d| d.visible_name())
                .collect();
            // 旧数据回退到自由文本名单
            if runners.is_empty() && !run.deprecated_runners.is_empty() {
                runners = run
                    .deprecated_runners
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            results.push(UpcomingRunEntry {
                game: run.name,
                runners,
                start_time: run.start_time,
                end_time: run.end_time,
            });
        }
        Ok(results)
    }

    /// 进行中的竞价及其选项, 带已筹金额
    pub async fn upcoming_bids(&self, event_id: i64) -> AppResult<Vec<UpcomingBidEntry>> {
        let roots = bids::Entity::find()
            .filter(bids::Column::EventId.eq(event_id))
            .filter(bids::Column::State.eq(BidState::Opened))
            .filter(bids::Column::ParentId.is_null())
            .filter(bids::Column::SpeedrunId.is_not_null())
            .all(&self.pool)
            .await?;

        let root_ids: Vec<i64> = roots.iter().map(|b| b.id).collect();
        let options = bids::Entity::find()
            .filter(bids::Column::ParentId.is_in(root_ids.clone()))
            .filter(bids::Column::State.eq(BidState::Opened))
            .order_by_asc(bids::Column::Name)
            .all(&self.pool)
            .await?;

        let mut all_ids = root_ids;
        all_ids.extend(options.iter().map(|b| b.id));
        let totals = self.bid_totals(&all_ids).await?;

        let run_ids: Vec<i64> = roots.iter().filter_map(|b| b.speedrun_id).collect();
        let run_map: HashMap<i64, runs::Model> = runs::Entity::find()
            .filter(runs::Column::Id.is_in(run_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let mut entries: Vec<(chrono::DateTime<Utc>, UpcomingBidEntry)> = Vec::new();
        for root in roots {
            let Some(run) = root.speedrun_id.and_then(|id| run_map.get(&id)) else {
                continue;
            };
            let mut amount_raised = totals.get(&root.id).copied().unwrap_or(Decimal::ZERO);
            let mut option_entries = Vec::new();
            for option in options.iter().filter(|o| o.parent_id == Some(root.id)) {
                let raised = totals.get(&option.id).copied().unwrap_or(Decimal::ZERO);
                amount_raised += raised;
                option_entries.push(BidOptionEntry {
                    name: option.name.clone(),
                    amount_raised: raised,
                });
            }
            entries.push((
                run.end_time,
                UpcomingBidEntry {
                    game: run.name.clone(),
                    bid: root.name,
                    goal: root.goal,
                    amount_raised,
                    options: option_entries,
                },
            ));
        }
        entries.sort_by_key(|(end_time, _)| *end_time);
        Ok(entries.into_iter().map(|(_, e)| e).collect())
    }

    /// 最近 20 笔已完成的捐赠; 留言只在审核通过时透出
    pub async fn recent_donations(&self, event_id: i64) -> AppResult<Vec<RecentDonationEntry>> {
        let donation_list = donations::Entity::find()
            .filter(donations::Column::EventId.eq(event_id))
            .filter(donations::Column::TransactionState.eq(TransactionState::Completed))
            .filter(donations::Column::TestDonation.eq(false))
            .order_by(donations::Column::TimeReceived, Order::Desc)
            .limit(20)
            .all(&self.pool)
            .await?;

        let donor_ids: Vec<i64> = donation_list.iter().filter_map(|d| d.donor_id).collect();
        let donor_map: HashMap<i64, donors::Model> = donors::Entity::find()
            .filter(donors::Column::Id.is_in(donor_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        let results = donation_list
            .into_iter()
            .map(|d| {
                let donor = d
                    .donor_id
                    .and_then(|id| donor_map.get(&id))
                    .map(|m| m.visible_name())
                    .unwrap_or_else(|| "(Anonymous)".to_string());
                let comment = if d.comment_state == CommentState::Approved {
                    d.comment
                } else {
                    String::new()
                };
                RecentDonationEntry {
                    id: d.id,
                    donor,
                    comment,
                    amount: d.amount,
                }
            })
            .collect();
        Ok(results)
    }

    /// 活动已筹总额 (已完成且非测试)
    pub async fn event_total(&self, event_id: i64) -> AppResult<EventTotalResponse> {
        let donation_list = donations::Entity::find()
            .filter(donations::Column::EventId.eq(event_id))
            .filter(donations::Column::TransactionState.eq(TransactionState::Completed))
            .filter(donations::Column::TestDonation.eq(false))
            .all(&self.pool)
            .await?;
        let total = donation_list.into_iter().map(|d| d.amount).sum();
        Ok(EventTotalResponse { total })
    }

    /// 每个 bid 收到的分配总额 (只计已完成且非测试的捐赠)
    async fn bid_totals(&self, bid_ids: &[i64]) -> AppResult<HashMap<i64, Decimal>> {
        let allocations = donation_bids::Entity::find()
            .filter(donation_bids::Column::BidId.is_in(bid_ids.to_vec()))
            .all(&self.pool)
            .await?;

        let donation_ids: Vec<i64> = allocations.iter().map(|a| a.donation_id).collect();
        let counted: std::collections::HashSet<i64> = donations::Entity::find()
            .filter(donations::Column::Id.is_in(donation_ids))
            .filter(donations::Column::TransactionState.eq(TransactionState::Completed))
            .filter(donations::Column::TestDonation.eq(false))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();

        let mut totals: HashMap<i64, Decimal> = HashMap::new();
        for allocation in allocations {
            if counted.contains(&allocation.donation_id) {
                *totals.entry(allocation.bid_id).or_insert(Decimal::ZERO) += allocation.amount;
            }
        }
        Ok(totals)
    }
}
