use crate::entities::{
    TransactionState, donation_entity as donations, prize_entity as prizes,
    prize_ticket_entity as tickets, prize_winner_entity as winners, speedrun_entity as runs,
};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use std::collections::{BTreeMap, HashMap, HashSet};

/// 捐赠账本行: 一笔合格捐赠对应的捐赠者与计入金额
/// (奖券模式下金额是该笔捐赠在本奖品上的奖券总额)
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub donor_id: i64,
    pub amount: Decimal,
    pub time_received: DateTime<Utc>,
}

/// 抽奖窗口: run 对取 (起始 run 开始, 结束 run 结束), 否则取显式时间对。
/// 两者都未设置时返回 None (不做时间限制)。
pub fn draw_window(
    prize: &prizes::Model,
    start_run: Option<&runs::Model>,
    end_run: Option<&runs::Model>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if let (Some(start), Some(end)) = (start_run, end_run) {
        return Some((start.start_time, end.end_time));
    }
    if let (Some(start), Some(end)) = (prize.start_time, prize.end_time) {
        return Some((start, end));
    }
    None
}

/// 按捐赠者聚合合格金额: sum 模式累加, 否则取单笔最大。
/// 纯函数, 同一账本快照下重复调用结果一致;
/// 没有合格捐赠的捐赠者不会出现在结果里。
pub fn aggregate_qualifying(rows: &[LedgerEntry], sum_donations: bool) -> BTreeMap<i64, Decimal> {
    let mut amounts: BTreeMap<i64, Decimal> = BTreeMap::new();
    for row in rows {
        let entry = amounts.entry(row.donor_id).or_insert(Decimal::ZERO);
        if sum_donations {
            *entry += row.amount;
        } else if row.amount > *entry {
            *entry = row.amount;
        }
    }
    amounts
}

/// 已在同一 (类别, 活动) 中获奖的捐赠者集合; 无类别的奖品不共享名额
pub async fn category_winner_ids<C: ConnectionTrait>(
    conn: &C,
    prize: &prizes::Model,
) -> AppResult<HashSet<i64>> {
    let Some(category_id) = prize.category_id else {
        return Ok(HashSet::new());
    };
    let category_prizes: Vec<i64> = prizes::Entity::find()
        .filter(prizes::Column::EventId.eq(prize.event_id))
        .filter(prizes::Column::CategoryId.eq(category_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    if category_prizes.is_empty() {
        return Ok(HashSet::new());
    }
    let rows = winners::Entity::find()
        .filter(winners::Column::PrizeId.is_in(category_prizes))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|w| w.winner_id).collect())
}

/// 计算奖品的合格捐赠者及其计入金额。
/// 流程: 活动内已完成且非测试的捐赠 -> 剔除被排除的捐赠者
/// -> 奖券模式按奖券求和 / 窗口模式按接收时间过滤 (闭区间)
/// -> 按捐赠者聚合 (sum / max)。
pub async fn qualifying_amounts<C: ConnectionTrait>(
    conn: &C,
    prize: &prizes::Model,
    start_run: Option<&runs::Model>,
    end_run: Option<&runs::Model>,
    excluded_donors: &HashSet<i64>,
) -> AppResult<BTreeMap<i64, Decimal>> {
    let mut query = donations::Entity::find()
        .filter(donations::Column::EventId.eq(prize.event_id))
        .filter(donations::Column::TransactionState.eq(TransactionState::Completed))
        .filter(donations::Column::TestDonation.eq(false))
        .filter(donations::Column::DonorId.is_not_null());

    if !prize.ticket_draw
        && let Some((start, end)) = draw_window(prize, start_run, end_run)
    {
        query = query
            .filter(donations::Column::TimeReceived.gte(start))
            .filter(donations::Column::TimeReceived.lte(end));
    }

    let completed = query.all(conn).await?;

    // 奖券模式: 每笔捐赠的计入金额是它在本奖品上的奖券总额
    let ticket_sums: Option<HashMap<i64, Decimal>> = if prize.ticket_draw {
        let rows = tickets::Entity::find()
            .filter(tickets::Column::PrizeId.eq(prize.id))
            .all(conn)
            .await?;
        let mut sums: HashMap<i64, Decimal> = HashMap::new();
        for t in rows {
            *sums.entry(t.donation_id).or_insert(Decimal::ZERO) += t.amount;
        }
        Some(sums)
    } else {
        None
    };

    let mut rows: Vec<LedgerEntry> = Vec::new();
    for donation in completed {
        let Some(donor_id) = donation.donor_id else {
            continue;
        };
        if excluded_donors.contains(&donor_id) {
            continue;
        }
        let amount = match &ticket_sums {
            Some(sums) => match sums.get(&donation.id) {
                Some(sum) => *sum,
                // 没有本奖品奖券的捐赠不参与 ticket_draw
                None => continue,
            },
            None => donation.amount,
        };
        rows.push(LedgerEntry {
            donor_id,
            amount,
            time_received: donation.time_received,
        });
    }

    Ok(aggregate_qualifying(&rows, prize.sum_donations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn entry(donor_id: i64, amount: &str) -> LedgerEntry {
        LedgerEntry {
            donor_id,
            amount: dec(amount),
            time_received: chrono::Utc.with_ymd_and_hms(2014, 1, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_aggregate_sum_mode() {
        let rows = vec![entry(1, "3.00"), entry(1, "4.00"), entry(2, "25.00")];
        let amounts = aggregate_qualifying(&rows, true);
        assert_eq!(amounts[&1], dec("7.00"));
        assert_eq!(amounts[&2], dec("25.00"));
    }

    #[test]
    fn test_aggregate_max_mode() {
        let rows = vec![entry(1, "3.00"), entry(1, "4.00"), entry(2, "25.00")];
        let amounts = aggregate_qualifying(&rows, false);
        assert_eq!(amounts[&1], dec("4.00"));
        assert_eq!(amounts[&2], dec("25.00"));
    }

    #[test]
    fn test_aggregate_absent_donors_stay_absent() {
        let rows = vec![entry(1, "3.00")];
        let amounts = aggregate_qualifying(&rows, true);
        assert!(!amounts.contains_key(&2));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let rows = vec![entry(1, "3.00"), entry(2, "5.00"), entry(1, "9.50")];
        let first = aggregate_qualifying(&rows, true);
        let second = aggregate_qualifying(&rows, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_draw_window_prefers_run_pair() {
        let start = chrono::Utc.with_ymd_and_hms(2014, 1, 5, 12, 0, 0).unwrap();
        let run_start = runs::Model {
            id: 1,
            event_id: 1,
            name: "First Run".to_string(),
            description: String::new(),
            sort_key: 0,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            deprecated_runners: String::new(),
            created_at: None,
            updated_at: None,
        };
        let run_end = runs::Model {
            id: 2,
            sort_key: 1,
            start_time: start + chrono::Duration::hours(2),
            end_time: start + chrono::Duration::hours(3),
            ..run_start.clone()
        };
        let prize = prizes::Model {
            id: 1,
            name: "Prize".to_string(),
            category_id: None,
            sort_key: 0,
            image: None,
            description: String::new(),
            minimum_bid: dec("5.00"),
            maximum_bid: Some(dec("5.00")),
            sum_donations: false,
            random_draw: true,
            ticket_draw: false,
            event_id: 1,
            start_run_id: Some(1),
            end_run_id: Some(2),
            start_time: None,
            end_time: None,
            max_winners: 1,
            created_at: None,
            updated_at: None,
        };
        let window = draw_window(&prize, Some(&run_start), Some(&run_end)).unwrap();
        assert_eq!(window.0, run_start.start_time);
        assert_eq!(window.1, run_end.end_time);
    }

    #[test]
    fn test_draw_window_absent_when_unset() {
        let prize = prizes::Model {
            id: 1,
            name: "Prize".to_string(),
            category_id: None,
            sort_key: 0,
            image: None,
            description: String::new(),
            minimum_bid: dec("5.00"),
            maximum_bid: Some(dec("5.00")),
            sum_donations: false,
            random_draw: true,
            ticket_draw: false,
            event_id: 1,
            start_run_id: None,
            end_run_id: None,
            start_time: None,
            end_time: None,
            max_winners: 1,
            created_at: None,
            updated_at: None,
        };
        assert!(draw_window(&prize, None, None).is_none());
    }
}
