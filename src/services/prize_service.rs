use crate::entities::{
    prize_category_entity as categories, prize_entity as prizes, prize_winner_entity as winners,
    speedrun_entity as runs,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreatePrizeCategoryRequest, CreatePrizeRequest, PrizeCategoryResponse, PrizeResponse,
    PrizeWinnerResponse, UpdatePrizeRequest,
};
use crate::services::event_service::load_unlocked_event;
use crate::utils::round_money;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

/// 奖品配置校验: 返回全部违规项, 空列表为合法。
/// 抽奖窗口 / 金额关系 / sum 模式一致性在此一次性检查,
/// 未通过校验的配置不会进入资格计算与抽取。
pub fn validate_prize(
    prize: &prizes::Model,
    start_run: Option<&runs::Model>,
    end_run: Option<&runs::Model>,
) -> Vec<String> {
    let mut violations = Vec::new();

    if prize.minimum_bid <= Decimal::ZERO {
        violations.push("Minimum bid must be a positive non-zero value".to_string());
    }
    if let Some(max) = prize.maximum_bid {
        if max <= Decimal::ZERO {
            violations.push("Maximum bid must be a positive non-zero value".to_string());
        }
        if max < prize.minimum_bid {
            violations.push("Maximum bid cannot be lower than minimum bid".to_string());
        }
    }
    if !prize.sum_donations && prize.maximum_bid != Some(prize.minimum_bid) {
        violations.push(
            "Maximum bid cannot differ from minimum bid when donations are not summed".to_string(),
        );
    }

    if prize.start_run_id.is_some() != prize.end_run_id.is_some() {
        violations.push("Must have both start run and end run set, or neither".to_string());
    }
    if prize.start_time.is_some() != prize.end_time.is_some() {
        violations.push("Must have both start time and end time set, or neither".to_string());
    }
    if prize.uses_run_window() && (prize.start_time.is_some() || prize.end_time.is_some()) {
        violations.push("Cannot have both a run window and a time window".to_string());
    }

    if let Some(run) = start_run {
        if run.event_id != prize.event_id {
            violations.push("Prize event must match start run event".to_string());
        }
    }
    if let Some(run) = end_run {
        if run.event_id != prize.event_id {
            violations.push("Prize event must match end run event".to_string());
        }
    }
    if let (Some(start), Some(end)) = (start_run, end_run)
        && start.sort_key > end.sort_key
    {
        violations.push("Start run must precede end run".to_string());
    }

    if let (Some(start), Some(end)) = (prize.start_time, prize.end_time)
        && start > end
    {
        violations.push("Start time must not be later than end time".to_string());
    }

    if prize.max_winners < 1 {
        violations.push("Max winners must be at least 1".to_string());
    }

    violations
}

/// 加载窗口引用的 run 并执行配置校验; 保存与抽奖共用的前置门槛
pub async fn check_prize<C: ConnectionTrait>(
    conn: &C,
    prize: &prizes::Model,
) -> AppResult<(Option<runs::Model>, Option<runs::Model>)> {
    let start_run = match prize.start_run_id {
        Some(id) => Some(
            runs::Entity::find_by_id(id)
                .one(conn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Run {id} not found")))?,
        ),
        None => None,
    };
    let end_run = match prize.end_run_id {
        Some(id) => Some(
            runs::Entity::find_by_id(id)
                .one(conn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Run {id} not found")))?,
        ),
        None => None,
    };

    let violations = validate_prize(prize, start_run.as_ref(), end_run.as_ref());
    if !violations.is_empty() {
        return Err(AppError::ValidationErrors(violations));
    }
    Ok((start_run, end_run))
}

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建奖品; 配置校验不通过不落库
    pub async fn create_prize(&self, req: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        load_unlocked_event(&self.pool, req.event_id).await?;

        if let Some(category_id) = req.category_id {
            let exists = categories::Entity::find_by_id(category_id)
                .one(&self.pool)
                .await?;
            if exists.is_none() {
                return Err(AppError::NotFound(format!(
                    "Prize category {category_id} not found"
                )));
            }
        }

        let existing = prizes::Entity::find()
            .filter(prizes::Column::Name.eq(req.name.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "Prize '{}' already exists",
                req.name
            )));
        }

        // 先组装再整体校验, 校验失败时不产生任何写入
        let candidate = prizes::Model {
            id: 0,
            name: req.name,
            category_id: req.category_id,
            sort_key: req.sort_key,
            image: req.image,
            description: req.description,
            minimum_bid: round_money(req.minimum_bid),
            maximum_bid: req.maximum_bid.map(round_money),
            sum_donations: req.sum_donations,
            random_draw: req.random_draw.unwrap_or(true),
            ticket_draw: req.ticket_draw.unwrap_or(false),
            event_id: req.event_id,
            start_run_id: req.start_run_id,
            end_run_id: req.end_run_id,
            start_time: req.start_time,
            end_time: req.end_time,
            max_winners: req.max_winners.unwrap_or(1),
            created_at: None,
            updated_at: None,
        };
        check_prize(&self.pool, &candidate).await?;

        let model = prizes::ActiveModel {
            name: Set(candidate.name),
            category_id: Set(candidate.category_id),
            sort_key: Set(candidate.sort_key),
            image: Set(candidate.image),
            description: Set(candidate.description),
            minimum_bid: Set(candidate.minimum_bid),
            maximum_bid: Set(candidate.maximum_bid),
            sum_donations: Set(candidate.sum_donations),
            random_draw: Set(candidate.random_draw),
            ticket_draw: Set(candidate.ticket_draw),
            event_id: Set(candidate.event_id),
            start_run_id: Set(candidate.start_run_id),
            end_run_id: Set(candidate.end_run_id),
            start_time: Set(candidate.start_time),
            end_time: Set(candidate.end_time),
            max_winners: Set(candidate.max_winners),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// 更新奖品; 合并后的完整配置重新过一遍校验,
    /// 不通过时保持原配置不变
    pub async fn update_prize(&self, id: i64, req: UpdatePrizeRequest) -> AppResult<PrizeResponse> {
        let prize = prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {id} not found")))?;
        load_unlocked_event(&self.pool, prize.event_id).await?;

        let candidate = prizes::Model {
            id: prize.id,
            name: req.name.clone().unwrap_or_else(|| prize.name.clone()),
            category_id: req.category_id.unwrap_or(prize.category_id),
            sort_key: req.sort_key.unwrap_or(prize.sort_key),
            image: req.image.clone().unwrap_or_else(|| prize.image.clone()),
            description: req
                .description
                .clone()
                .unwrap_or_else(|| prize.description.clone()),
            minimum_bid: round_money(req.minimum_bid.unwrap_or(prize.minimum_bid)),
            maximum_bid: req
                .maximum_bid
                .unwrap_or(prize.maximum_bid)
                .map(round_money),
            sum_donations: req.sum_donations.unwrap_or(prize.sum_donations),
            random_draw: req.random_draw.unwrap_or(prize.random_draw),
            ticket_draw: req.ticket_draw.unwrap_or(prize.ticket_draw),
            event_id: prize.event_id,
            start_run_id: req.start_run_id.unwrap_or(prize.start_run_id),
            end_run_id: req.end_run_id.unwrap_or(prize.end_run_id),
            start_time: req.start_time.unwrap_or(prize.start_time),
            end_time: req.end_time.unwrap_or(prize.end_time),
            max_winners: req.max_winners.unwrap_or(prize.max_winners),
            created_at: prize.created_at,
            updated_at: prize.updated_at,
        };
        check_prize(&self.pool, &candidate).await?;

        if candidate.name != prize.name {
            let existing = prizes::Entity::find()
                .filter(prizes::Column::Name.eq(candidate.name.clone()))
                .one(&self.pool)
                .await?;
            if existing.is_some() {
                return Err(AppError::ValidationError(format!(
                    "Prize '{}' already exists",
                    candidate.name
                )));
            }
        }

        let mut am = prize.into_active_model();
        am.name = Set(candidate.name);
        am.category_id = Set(candidate.category_id);
        am.sort_key = Set(candidate.sort_key);
        am.image = Set(candidate.image);
        am.description = Set(candidate.description);
        am.minimum_bid = Set(candidate.minimum_bid);
        am.maximum_bid = Set(candidate.maximum_bid);
        am.sum_donations = Set(candidate.sum_donations);
        am.random_draw = Set(candidate.random_draw);
        am.ticket_draw = Set(candidate.ticket_draw);
        am.start_run_id = Set(candidate.start_run_id);
        am.end_run_id = Set(candidate.end_run_id);
        am.start_time = Set(candidate.start_time);
        am.end_time = Set(candidate.end_time);
        am.max_winners = Set(candidate.max_winners);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(updated.into())
    }

    pub async fn get_prize(&self, id: i64) -> AppResult<PrizeResponse> {
        let prize = prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {id} not found")))?;
        Ok(prize.into())
    }

    pub async fn list_prizes(&self, event_id: i64) -> AppResult<Vec<PrizeResponse>> {
        let list = prizes::Entity::find()
            .filter(prizes::Column::EventId.eq(event_id))
            .order_by_asc(prizes::Column::SortKey)
            .order_by_asc(prizes::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 奖品的获奖记录
    pub async fn list_winners(&self, prize_id: i64) -> AppResult<Vec<PrizeWinnerResponse>> {
        let list = winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(prize_id))
            .order_by_asc(winners::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 创建奖品类别
    pub async fn create_category(
        &self,
        req: CreatePrizeCategoryRequest,
    ) -> AppResult<PrizeCategoryResponse> {
        let existing = categories::Entity::find()
            .filter(categories::Column::Name.eq(req.name.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "Prize category '{}' already exists",
                req.name
            )));
        }

        let model = categories::ActiveModel {
            name: Set(req.name),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    pub async fn list_categories(&self) -> AppResult<Vec<PrizeCategoryResponse>> {
        let list = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn base_prize() -> prizes::Model {
        prizes::Model {
            id: 1,
            name: "Game Cartridge".to_string(),
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
        }
    }

    fn run(id: i64, event_id: i64, sort_key: i32) -> runs::Model {
        let start = chrono::Utc.with_ymd_and_hms(2014, 1, 5, 12, 0, 0).unwrap();
        runs::Model {
            id,
            event_id,
            name: format!("Run {id}"),
            description: String::new(),
            sort_key,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            deprecated_runners: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_valid_prize_passes() {
        assert!(validate_prize(&base_prize(), None, None).is_empty());
    }

    #[test]
    fn test_partial_run_pair_rejected() {
        let mut prize = base_prize();
        prize.start_run_id = Some(1);
        let violations = validate_prize(&prize, Some(&run(1, 1, 0)), None);
        assert!(violations.iter().any(|v| v.contains("start run and end run")));
    }

    #[test]
    fn test_partial_time_pair_rejected() {
        let mut prize = base_prize();
        prize.start_time = Some(chrono::Utc.with_ymd_and_hms(2014, 1, 5, 12, 0, 0).unwrap());
        let violations = validate_prize(&prize, None, None);
        assert!(violations.iter().any(|v| v.contains("start time and end time")));
    }

    #[test]
    fn test_both_windows_rejected() {
        let mut prize = base_prize();
        prize.start_run_id = Some(1);
        prize.end_run_id = Some(2);
        prize.start_time = Some(chrono::Utc.with_ymd_and_hms(2014, 1, 5, 12, 0, 0).unwrap());
        prize.end_time = Some(chrono::Utc.with_ymd_and_hms(2014, 1, 5, 18, 0, 0).unwrap());
        let violations = validate_prize(&prize, Some(&run(1, 1, 0)), Some(&run(2, 1, 1)));
        assert!(violations.iter().any(|v| v.contains("both a run window and a time window")));
    }

    #[test]
    fn test_run_order_rejected() {
        let mut prize = base_prize();
        prize.start_run_id = Some(1);
        prize.end_run_id = Some(2);
        let violations = validate_prize(&prize, Some(&run(1, 1, 5)), Some(&run(2, 1, 2)));
        assert!(violations.iter().any(|v| v.contains("precede")));
    }

    #[test]
    fn test_run_event_mismatch_rejected() {
        let mut prize = base_prize();
        prize.start_run_id = Some(1);
        prize.end_run_id = Some(2);
        let violations = validate_prize(&prize, Some(&run(1, 9, 0)), Some(&run(2, 1, 1)));
        assert!(violations.iter().any(|v| v.contains("start run event")));
    }

    #[test]
    fn test_max_below_min_rejected() {
        let mut prize = base_prize();
        prize.sum_donations = true;
        prize.minimum_bid = dec("10.00");
        prize.maximum_bid = Some(dec("5.00"));
        let violations = validate_prize(&prize, None, None);
        assert!(violations.iter().any(|v| v.contains("lower than minimum")));
    }

    #[test]
    fn test_non_sum_mode_requires_equal_bounds() {
        let mut prize = base_prize();
        prize.sum_donations = false;
        prize.maximum_bid = Some(dec("20.00"));
        let violations = validate_prize(&prize, None, None);
        assert!(violations.iter().any(|v| v.contains("not summed")));

        // uncapped maximum is only meaningful in sum mode
        let mut prize = base_prize();
        prize.maximum_bid = None;
        let violations = validate_prize(&prize, None, None);
        assert!(violations.iter().any(|v| v.contains("not summed")));
    }

    #[test]
    fn test_sum_mode_allows_wider_maximum() {
        let mut prize = base_prize();
        prize.sum_donations = true;
        prize.maximum_bid = Some(dec("20.00"));
        assert!(validate_prize(&prize, None, None).is_empty());

        prize.maximum_bid = None;
        assert!(validate_prize(&prize, None, None).is_empty());
    }

    #[test]
    fn test_max_winners_must_be_positive() {
        let mut prize = base_prize();
        prize.max_winners = 0;
        let violations = validate_prize(&prize, None, None);
        assert!(violations.iter().any(|v| v.contains("Max winners")));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut prize = base_prize();
        prize.minimum_bid = dec("0.00");
        prize.max_winners = 0;
        prize.start_run_id = Some(1);
        let violations = validate_prize(&prize, None, None);
        assert!(violations.len() >= 3);
    }
}
