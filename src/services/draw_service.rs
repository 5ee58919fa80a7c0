use crate::entities::{prize_entity as prizes, prize_winner_entity as winners};
use crate::error::{AppError, AppResult};
use crate::models::{DrawResponse, EligibleDonorResponse};
use crate::services::eligibility_service::{category_winner_ids, qualifying_amounts};
use crate::services::prize_service::check_prize;
use crate::utils::money_to_f64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::{BTreeMap, HashSet};

/// 权重函数: 合格金额相对 minimum_bid 归一化
/// - amount < min        -> 0 (不参与)
/// - max 设置且超出      -> max / min (封顶)
/// - 其余                -> amount / min
pub fn weight(minimum: Decimal, maximum: Option<Decimal>, amount: Decimal) -> f64 {
    if minimum <= Decimal::ZERO || amount < minimum {
        return 0.0;
    }
    if let Some(max) = maximum
        && amount > max
    {
        return money_to_f64(max) / money_to_f64(minimum);
    }
    money_to_f64(amount) / money_to_f64(minimum)
}

/// 由合格金额构造候选列表。
/// 随机抽取: 权重 >= 1.0 的全部捐赠者, 按 donor id 升序 (并列时顺序确定);
/// 固定抽取: 合格金额最高者一人 (并列取最小 donor id), 权重报告为 1.0。
pub fn build_candidates(
    prize: &prizes::Model,
    amounts: &BTreeMap<i64, Decimal>,
) -> Vec<EligibleDonorResponse> {
    if prize.random_draw {
        amounts
            .iter()
            .map(|(donor_id, amount)| EligibleDonorResponse {
                donor_id: *donor_id,
                amount: *amount,
                weight: weight(prize.minimum_bid, prize.maximum_bid, *amount),
            })
            .filter(|c| c.weight >= 1.0)
            .collect()
    } else {
        // BTreeMap 升序遍历 + 严格大于: 并列时自然取最小 donor id
        let mut best: Option<(i64, Decimal)> = None;
        for (donor_id, amount) in amounts {
            if *amount < prize.minimum_bid {
                continue;
            }
            match best {
                Some((_, best_amount)) if *amount <= best_amount => {}
                _ => best = Some((*donor_id, *amount)),
            }
        }
        best.map(|(donor_id, amount)| EligibleDonorResponse {
            donor_id,
            amount,
            weight: 1.0,
        })
        .into_iter()
        .collect()
    }
}

/// 加权随机抽取: 在 [0, 总权重) 上取均匀随机数, 沿累计权重落点。
/// 候选为空时无获奖者 (不是错误)。
pub fn pick_winner<R: Rng>(candidates: &[EligibleDonorResponse], rng: &mut R) -> Option<i64> {
    if candidates.is_empty() {
        return None;
    }
    let total: f64 = candidates.iter().map(|c| c.weight).sum();
    if total <= 0.0 {
        return None;
    }
    let pick: f64 = rng.gen_range(0.0..total);
    let mut acc = 0.0;
    for candidate in candidates {
        acc += candidate.weight;
        if pick < acc {
            return Some(candidate.donor_id);
        }
    }
    // 浮点累计的边界兜底
    candidates.last().map(|c| c.donor_id)
}

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    max_attempts: u32,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection, max_attempts: u32) -> Self {
        Self { pool, max_attempts }
    }

    /// 奖品当前的合格捐赠者列表 (含金额与权重)。
    /// 配置校验是前置门槛, 未通过的奖品不会计算资格。
    pub async fn eligible_donors(&self, prize_id: i64) -> AppResult<Vec<EligibleDonorResponse>> {
        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;
        let (start_run, end_run) = check_prize(&self.pool, &prize).await?;

        let excluded = self.excluded_donors(&self.pool, &prize).await?;
        let amounts = qualifying_amounts(
            &self.pool,
            &prize,
            start_run.as_ref(),
            end_run.as_ref(),
            &excluded,
        )
        .await?;
        Ok(build_candidates(&prize, &amounts))
    }

    /// 抽取一名获奖者并落库。
    /// seed 提供时结果可复现; 多名额奖品由调用方重复调用,
    /// 已获奖者每轮都从候选池剔除。落库事务内对奖品行加排他锁,
    /// 并发抽取不会超出 max_winners; 冲突时按配置重试。
    pub async fn draw(&self, prize_id: i64, seed: Option<u64>) -> AppResult<DrawResponse> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_draw(prize_id, seed).await {
                Err(AppError::ConflictError(msg)) if attempt < self.max_attempts => {
                    log::warn!("Draw conflict for prize {prize_id}, retrying: {msg}");
                }
                other => return other,
            }
        }
    }

    async fn try_draw(&self, prize_id: i64, seed: Option<u64>) -> AppResult<DrawResponse> {
        let txn = self.pool.begin().await?;

        // 排他锁串行化同一奖品的并发抽取
        let prize = prizes::Entity::find_by_id(prize_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;
        let (start_run, end_run) = check_prize(&txn, &prize).await?;

        let existing = winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(prize.id))
            .all(&txn)
            .await?;
        if existing.len() as i32 >= prize.max_winners {
            return Err(AppError::ConflictError(format!(
                "Prize '{}' already has the maximum number of winners",
                prize.name
            )));
        }

        let mut excluded = self.excluded_donors(&txn, &prize).await?;
        excluded.extend(existing.iter().map(|w| w.winner_id));

        let amounts = qualifying_amounts(
            &txn,
            &prize,
            start_run.as_ref(),
            end_run.as_ref(),
            &excluded,
        )
        .await?;
        let candidates = build_candidates(&prize, &amounts);

        // 候选池为空: 本轮无获奖者, 属正常终态
        if candidates.is_empty() {
            txn.commit().await?;
            return Ok(DrawResponse { winner_id: None });
        }

        let winner_id = if prize.random_draw {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            pick_winner(&candidates, &mut rng)
        } else {
            candidates.first().map(|c| c.donor_id)
        };

        let Some(winner_id) = winner_id else {
            txn.commit().await?;
            return Ok(DrawResponse { winner_id: None });
        };

        // 落库前复查 (类别, 活动) 唯一性: 资格计算之后别的奖品
        // 可能刚记录了同一捐赠者
        let category_winners = category_winner_ids(&txn, &prize).await?;
        if category_winners.contains(&winner_id) {
            return Err(AppError::ConflictError(format!(
                "Donor {winner_id} already won a prize in the same category for this event"
            )));
        }

        let insert_result = winners::ActiveModel {
            prize_id: Set(prize.id),
            winner_id: Set(winner_id),
            email_sent: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await;
        match insert_result {
            Ok(_) => {}
            // 唯一索引兜底: 并发窗口里同一捐赠者已被记录
            Err(e) if e.to_string().contains("duplicate key") => {
                return Err(AppError::ConflictError(format!(
                    "Donor {winner_id} has already won prize '{}'",
                    prize.name
                )));
            }
            Err(e) => return Err(e.into()),
        }

        txn.commit().await?;
        log::info!("Drew donor {winner_id} as winner of prize '{}'", prize.name);
        Ok(DrawResponse {
            winner_id: Some(winner_id),
        })
    }

    /// 抽取前需要剔除的捐赠者:
    /// 同一 (类别, 活动) 的既有获奖者 + 本奖品的既有获奖者
    async fn excluded_donors<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        prize: &prizes::Model,
    ) -> AppResult<HashSet<i64>> {
        let mut excluded = category_winner_ids(conn, prize).await?;
        let own = winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(prize.id))
            .all(conn)
            .await?;
        excluded.extend(own.into_iter().map(|w| w.winner_id));
        Ok(excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn prize(minimum: &str, maximum: Option<&str>, sum_donations: bool, random_draw: bool) -> prizes::Model {
        prizes::Model {
            id: 1,
            name: "Prize".to_string(),
            category_id: None,
            sort_key: 0,
            image: None,
            description: String::new(),
            minimum_bid: dec(minimum),
            maximum_bid: maximum.map(dec),
            sum_donations,
            random_draw,
            ticket_draw: false,
            event_id: 1,
            start_run_id: None,
            end_run_id: None,
            start_time: None,
            end_time: None,
            max_winners: 1,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_weight_below_minimum_is_zero() {
        assert_eq!(weight(dec("5.00"), Some(dec("20.00")), dec("2.00")), 0.0);
    }

    #[test]
    fn test_weight_at_minimum_is_exactly_one() {
        // boundary: amount == minimum must land inside the candidate pool
        assert_eq!(weight(dec("5.00"), Some(dec("20.00")), dec("5.00")), 1.0);
    }

    #[test]
    fn test_weight_is_capped_at_max_over_min() {
        assert_eq!(weight(dec("5.00"), Some(dec("20.00")), dec("25.00")), 4.0);
        assert_eq!(weight(dec("5.00"), Some(dec("20.00")), dec("20.00")), 4.0);
    }

    #[test]
    fn test_weight_uncapped_without_maximum() {
        assert_eq!(weight(dec("5.00"), None, dec("50.00")), 10.0);
    }

    #[test]
    fn test_weight_monotonic_in_amount() {
        let amounts = ["1.00", "4.99", "5.00", "7.00", "19.99", "20.00", "25.00"];
        let weights: Vec<f64> = amounts
            .iter()
            .map(|a| weight(dec("5.00"), Some(dec("20.00")), dec(a)))
            .collect();
        for pair in weights.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_candidates_example_from_sum_mode() {
        // min 5.00, max 20.00, sum mode: A 7.00 -> 1.4, B 25.00 -> capped 4.0,
        // C 2.00 -> excluded
        let p = prize("5.00", Some("20.00"), true, true);
        let mut amounts = BTreeMap::new();
        amounts.insert(1, dec("7.00"));
        amounts.insert(2, dec("25.00"));
        amounts.insert(3, dec("2.00"));
        let candidates = build_candidates(&p, &amounts);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].donor_id, 1);
        assert_eq!(candidates[0].weight, 1.4);
        assert_eq!(candidates[1].donor_id, 2);
        assert_eq!(candidates[1].weight, 4.0);
    }

    #[test]
    fn test_candidates_sorted_by_donor_id() {
        let p = prize("5.00", None, true, true);
        let mut amounts = BTreeMap::new();
        amounts.insert(9, dec("5.00"));
        amounts.insert(3, dec("5.00"));
        amounts.insert(7, dec("5.00"));
        let ids: Vec<i64> = build_candidates(&p, &amounts)
            .iter()
            .map(|c| c.donor_id)
            .collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn test_fixed_draw_selects_maximum_amount() {
        let p = prize("5.00", Some("5.00"), false, false);
        let mut amounts = BTreeMap::new();
        amounts.insert(1, dec("7.00"));
        amounts.insert(2, dec("25.00"));
        let candidates = build_candidates(&p, &amounts);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].donor_id, 2);
        assert_eq!(candidates[0].weight, 1.0);
    }

    #[test]
    fn test_fixed_draw_ties_break_to_lowest_donor_id() {
        let p = prize("5.00", Some("5.00"), false, false);
        let mut amounts = BTreeMap::new();
        amounts.insert(8, dec("25.00"));
        amounts.insert(2, dec("25.00"));
        amounts.insert(5, dec("10.00"));
        let candidates = build_candidates(&p, &amounts);
        assert_eq!(candidates[0].donor_id, 2);
    }

    #[test]
    fn test_empty_pool_yields_no_winner() {
        let p = prize("5.00", None, true, true);
        let amounts = BTreeMap::new();
        let candidates = build_candidates(&p, &amounts);
        assert!(candidates.is_empty());
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(pick_winner(&candidates, &mut rng), None);
    }

    #[test]
    fn test_pick_winner_is_deterministic_for_a_seed() {
        let p = prize("5.00", Some("20.00"), true, true);
        let mut amounts = BTreeMap::new();
        amounts.insert(1, dec("7.00"));
        amounts.insert(2, dec("25.00"));
        amounts.insert(3, dec("12.00"));
        let candidates = build_candidates(&p, &amounts);

        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);
        assert_eq!(
            pick_winner(&candidates, &mut rng_a),
            pick_winner(&candidates, &mut rng_b)
        );
    }

    #[test]
    fn test_pick_winner_respects_weights() {
        // donor 2 carries ~97% of the total weight; over many seeded draws it
        // must come out far ahead of donor 1
        let p = prize("5.00", None, true, true);
        let mut amounts = BTreeMap::new();
        amounts.insert(1, dec("5.00"));
        amounts.insert(2, dec("150.00"));
        let candidates = build_candidates(&p, &amounts);

        let mut rng = StdRng::seed_from_u64(7);
        let mut donor_two = 0;
        for _ in 0..200 {
            if pick_winner(&candidates, &mut rng) == Some(2) {
                donor_two += 1;
            }
        }
        assert!(donor_two > 150);
    }
}
