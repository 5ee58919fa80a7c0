use crate::entities::{event_entity as events, speedrun_entity as runs, speedrun_runners};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateEventRequest, CreateSpeedrunRequest, EventResponse, SpeedrunResponse,
    UpdateEventRequest, UpdateSpeedrunRequest,
};
use crate::utils::{require_positive, round_money};
use chrono::Utc;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::OnceLock;

/// 短标识必须是 URL 安全的 token
fn short_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\w+$").expect("static pattern"))
}

/// 加载活动并要求未锁定; 锁定活动的子实体增改一律拒绝
pub async fn load_unlocked_event<C: ConnectionTrait>(
    conn: &C,
    event_id: i64,
) -> AppResult<events::Model> {
    let event = events::Entity::find_by_id(event_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))?;
    if event.locked {
        return Err(AppError::ValidationError(format!(
            "Event '{}' is locked",
            event.short
        )));
    }
    Ok(event)
}

#[derive(Clone)]
pub struct EventService {
    pool: DatabaseConnection,
}

impl EventService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建活动
    pub async fn create_event(&self, req: CreateEventRequest) -> AppResult<EventResponse> {
        if !short_name_pattern().is_match(&req.short) {
            return Err(AppError::ValidationError(
                "Event short name must be a url-safe token".into(),
            ));
        }
        require_positive("Target amount", req.target_amount).map_err(AppError::ValidationError)?;

        let existing = events::Entity::find()
            .filter(events::Column::Short.eq(req.short.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "Event short name '{}' is already in use",
                req.short
            )));
        }

        let model = events::ActiveModel {
            short: Set(req.short),
            name: Set(req.name),
            receiver_name: Set(req.receiver_name),
            currency: Set(req.currency),
            target_amount: Set(round_money(req.target_amount)),
            scheduled_at: Set(req.scheduled_at),
            locked: Set(false),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// 更新活动; short 作为对外标识不可变更, locked 只能经由本管理接口切换
    pub async fn update_event(&self, id: i64, req: UpdateEventRequest) -> AppResult<EventResponse> {
        let event = events::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {id} not found")))?;

        if let Some(amount) = req.target_amount {
            require_positive("Target amount", amount).map_err(AppError::ValidationError)?;
        }

        let mut am = event.into_active_model();
        if let Some(v) = req.name {
            am.name = Set(v);
        }
        if let Some(v) = req.receiver_name {
            am.receiver_name = Set(v);
        }
        if let Some(v) = req.currency {
            am.currency = Set(v);
        }
        if let Some(v) = req.target_amount {
            am.target_amount = Set(round_money(v));
        }
        if let Some(v) = req.scheduled_at {
            am.scheduled_at = Set(v);
        }
        if let Some(v) = req.locked {
            am.locked = Set(v);
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(updated.into())
    }

    pub async fn get_event(&self, id: i64) -> AppResult<EventResponse> {
        let event = events::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {id} not found")))?;
        Ok(event.into())
    }

    /// 按计划时间倒序 (最新的活动在前)
    pub async fn list_events(&self) -> AppResult<Vec<EventResponse>> {
        let list = events::Entity::find()
            .order_by_desc(events::Column::ScheduledAt)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 创建比赛项目
    pub async fn create_speedrun(
        &self,
        event_id: i64,
        req: CreateSpeedrunRequest,
    ) -> AppResult<SpeedrunResponse> {
        load_unlocked_event(&self.pool, event_id).await?;

        if req.end_time < req.start_time {
            return Err(AppError::ValidationError(
                "Run end time must not be before start time".into(),
            ));
        }

        let existing = runs::Entity::find()
            .filter(runs::Column::EventId.eq(event_id))
            .filter(runs::Column::Name.eq(req.name.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "Run '{}' already exists for this event",
                req.name
            )));
        }

        let txn = self.pool.begin().await?;

        let run = runs::ActiveModel {
            event_id: Set(event_id),
            name: Set(req.name),
            description: Set(req.description),
            sort_key: Set(req.sort_key),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            deprecated_runners: Set(String::new()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for donor_id in req.runner_ids {
            speedrun_runners::ActiveModel {
                speedrun_id: Set(run.id),
                donor_id: Set(donor_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(run.into())
    }

    /// 更新比赛项目; runner_ids 提供时整体替换关联
    pub async fn update_speedrun(
        &self,
        id: i64,
        req: UpdateSpeedrunRequest,
    ) -> AppResult<SpeedrunResponse> {
        let run = runs::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Run {id} not found")))?;
        load_unlocked_event(&self.pool, run.event_id).await?;

        let start = req.start_time.unwrap_or(run.start_time);
        let end = req.end_time.unwrap_or(run.end_time);
        if end < start {
            return Err(AppError::ValidationError(
                "Run end time must not be before start time".into(),
            ));
        }

        if let Some(name) = &req.name
            && *name != run.name
        {
            let existing = runs::Entity::find()
                .filter(runs::Column::EventId.eq(run.event_id))
                .filter(runs::Column::Name.eq(name.clone()))
                .one(&self.pool)
                .await?;
            if existing.is_some() {
                return Err(AppError::ValidationError(format!(
                    "Run '{name}' already exists for this event"
                )));
            }
        }

        let txn = self.pool.begin().await?;

        let run_id = run.id;
        let mut am = run.into_active_model();
        if let Some(v) = req.name {
            am.name = Set(v);
        }
        if let Some(v) = req.description {
            am.description = Set(v);
        }
        if let Some(v) = req.sort_key {
            am.sort_key = Set(v);
        }
        am.start_time = Set(start);
        am.end_time = Set(end);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&txn).await?;

        if let Some(runner_ids) = req.runner_ids {
            speedrun_runners::Entity::delete_many()
                .filter(speedrun_runners::Column::SpeedrunId.eq(run_id))
                .exec(&txn)
                .await?;
            for donor_id in runner_ids {
                speedrun_runners::ActiveModel {
                    speedrun_id: Set(run_id),
                    donor_id: Set(donor_id),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        Ok(updated.into())
    }

    /// 按节目单顺序列出活动内的比赛项目
    pub async fn list_speedruns(&self, event_id: i64) -> AppResult<Vec<SpeedrunResponse>> {
        let list = runs::Entity::find()
            .filter(runs::Column::EventId.eq(event_id))
            .order_by_asc(runs::Column::SortKey)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_pattern() {
        assert!(short_name_pattern().is_match("agdq2014"));
        assert!(short_name_pattern().is_match("summer_24"));
        assert!(!short_name_pattern().is_match("agdq 2014"));
        assert!(!short_name_pattern().is_match("agdq-2014"));
        assert!(!short_name_pattern().is_match(""));
    }
}
