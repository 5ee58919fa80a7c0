use crate::entities::{
    BidState, bid_entity as bids, bid_suggestion_entity as suggestions,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BidResponse, BidSuggestionResponse, CreateBidRequest, UpdateBidRequest,
};
use crate::services::event_service::load_unlocked_event;
use crate::utils::{require_positive, round_money};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashSet;

/// 兄弟节点名称查重 (大小写不敏感), self_id 用于更新时排除自身
fn has_sibling_name_conflict(
    siblings: &[(i64, String)],
    self_id: Option<i64>,
    name: &str,
) -> bool {
    let lowered = name.to_lowercase();
    siblings
        .iter()
        .any(|(id, n)| Some(*id) != self_id && n.to_lowercase() == lowered)
}

/// HIDDEN -> OPENED 的状态迁移需要打 revealed_at
fn newly_revealed(old: BidState, new: BidState) -> bool {
    old == BidState::Hidden && new == BidState::Opened
}

/// 一次编辑后节点应有的目标字段 (根的权威字段 + 节点自身字段)
struct ResolvedFields {
    event_id: Option<i64>,
    speedrun_id: Option<i64>,
    state: BidState,
}

#[derive(Clone)]
pub struct BidService {
    pool: DatabaseConnection,
}

impl BidService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 沿 parent_id 上溯到根; 遍历有界并带环检测
    async fn resolve_root<C: ConnectionTrait>(
        &self,
        conn: &C,
        start: &bids::Model,
    ) -> AppResult<bids::Model> {
        let mut visited: HashSet<i64> = HashSet::new();
        visited.insert(start.id);
        let mut current = start.clone();
        while let Some(parent_id) = current.parent_id {
            if !visited.insert(parent_id) {
                return Err(AppError::InternalError(format!(
                    "Bid tree contains a cycle at bid {parent_id}"
                )));
            }
            current = bids::Entity::find_by_id(parent_id)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!("Bid {parent_id} referenced as parent is missing"))
                })?;
        }
        Ok(current)
    }

    /// 宽度优先收集整棵子树 (不含根自身)
    async fn collect_descendants<C: ConnectionTrait>(
        &self,
        conn: &C,
        root_id: i64,
    ) -> AppResult<Vec<bids::Model>> {
        let mut all: Vec<bids::Model> = Vec::new();
        let mut frontier = vec![root_id];
        let mut seen: HashSet<i64> = HashSet::new();
        seen.insert(root_id);
        while !frontier.is_empty() {
            let level = bids::Entity::find()
                .filter(bids::Column::ParentId.is_in(frontier.clone()))
                .all(conn)
                .await?;
            frontier = Vec::new();
            for node in level {
                if seen.insert(node.id) {
                    frontier.push(node.id);
                    all.push(node);
                }
            }
        }
        Ok(all)
    }

    async fn direct_children_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        bid_id: i64,
    ) -> AppResult<u64> {
        use sea_orm::PaginatorTrait;
        let count = bids::Entity::find()
            .filter(bids::Column::ParentId.eq(bid_id))
            .count(conn)
            .await?;
        Ok(count)
    }

    /// 同一 (event, speedrun, parent) 作用域下的兄弟节点 (id, name)
    async fn sibling_names<C: ConnectionTrait>(
        &self,
        conn: &C,
        fields: &ResolvedFields,
        parent_id: Option<i64>,
    ) -> AppResult<Vec<(i64, String)>> {
        let mut query = bids::Entity::find();
        query = match fields.event_id {
            Some(id) => query.filter(bids::Column::EventId.eq(id)),
            None => query.filter(bids::Column::EventId.is_null()),
        };
        query = match fields.speedrun_id {
            Some(id) => query.filter(bids::Column::SpeedrunId.eq(id)),
            None => query.filter(bids::Column::SpeedrunId.is_null()),
        };
        query = match parent_id {
            Some(id) => query.filter(bids::Column::ParentId.eq(id)),
            None => query.filter(bids::Column::ParentId.is_null()),
        };
        let rows = query.all(conn).await?;
        Ok(rows.into_iter().map(|b| (b.id, b.name)).collect())
    }

    /// 把根的权威字段写到全部后代; 与触发它的根编辑同属一个事务,
    /// 并发读者不会看到半新半旧的子树
    async fn propagate_root_fields<C: ConnectionTrait>(
        &self,
        txn: &C,
        root: &bids::Model,
    ) -> AppResult<()> {
        let descendants = self.collect_descendants(txn, root.id).await?;
        for node in descendants {
            let revealed = newly_revealed(node.state, root.state);
            let mut am = node.into_active_model();
            am.event_id = Set(root.event_id);
            am.speedrun_id = Set(root.speedrun_id);
            am.state = Set(root.state);
            if revealed {
                am.revealed_at = Set(Some(Utc::now()));
            }
            am.updated_at = Set(Some(Utc::now()));
            am.update(txn).await?;
        }
        Ok(())
    }

    fn check_goal(goal: Option<Decimal>) -> AppResult<Option<Decimal>> {
        match goal {
            Some(g) => {
                require_positive("Goal", g).map_err(AppError::ValidationError)?;
                Ok(Some(round_money(g)))
            }
            None => Ok(None),
        }
    }

    /// 创建竞价节点
    /// 子节点从根继承 event/speedrun/state; 根节点必须直接给出 event_id
    pub async fn create_bid(&self, req: CreateBidRequest) -> AppResult<BidResponse> {
        let goal = Self::check_goal(req.goal)?;

        let txn = self.pool.begin().await?;

        let (fields, parent_id) = match req.parent_id {
            Some(parent_id) => {
                let parent = bids::Entity::find_by_id(parent_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Parent bid {parent_id} not found")))?;
                if parent.is_target {
                    return Err(AppError::ValidationError(
                        "Parent bid is a target and cannot have children".into(),
                    ));
                }
                let root = self.resolve_root(&txn, &parent).await?;
                (
                    ResolvedFields {
                        event_id: root.event_id,
                        speedrun_id: root.speedrun_id,
                        state: root.state,
                    },
                    Some(parent_id),
                )
            }
            None => {
                let event_id = req.event_id.ok_or_else(|| {
                    AppError::ValidationError("Root bids must belong to an event".into())
                })?;
                (
                    ResolvedFields {
                        event_id: Some(event_id),
                        speedrun_id: req.speedrun_id,
                        state: req.state.unwrap_or(BidState::Opened),
                    },
                    None,
                )
            }
        };

        if let Some(event_id) = fields.event_id {
            load_unlocked_event(&txn, event_id).await?;
        }

        let siblings = self.sibling_names(&txn, &fields, parent_id).await?;
        if has_sibling_name_conflict(&siblings, None, &req.name) {
            return Err(AppError::ValidationError(
                "A bid with the same name already exists under the same event/run/parent".into(),
            ));
        }

        let model = bids::ActiveModel {
            event_id: Set(fields.event_id),
            speedrun_id: Set(fields.speedrun_id),
            parent_id: Set(parent_id),
            name: Set(req.name),
            state: Set(fields.state),
            description: Set(req.description),
            goal: Set(goal),
            is_target: Set(req.is_target),
            revealed_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model.into())
    }

    /// 更新竞价节点: 重命名 / 状态变更 / 换父 / 目标金额等统一入口。
    /// 根编辑把权威字段级联到全树, 子节点编辑从根拉取权威字段,
    /// 全部动作在一个事务里完成。
    pub async fn update_bid(&self, id: i64, req: UpdateBidRequest) -> AppResult<BidResponse> {
        let txn = self.pool.begin().await?;

        let bid = bids::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bid {id} not found")))?;

        let goal = match req.goal {
            Some(g) => Self::check_goal(Some(g))?,
            None => bid.goal,
        };

        // 换父: 禁止挂到自己或自己的子树之下, 新父不能是 target
        let new_parent_id = match req.parent_id {
            Some(requested) => {
                if let Some(parent_id) = requested {
                    if parent_id == bid.id {
                        return Err(AppError::ValidationError(
                            "A bid cannot be its own parent".into(),
                        ));
                    }
                    let descendants = self.collect_descendants(&txn, bid.id).await?;
                    if descendants.iter().any(|d| d.id == parent_id) {
                        return Err(AppError::ValidationError(
                            "Cannot reparent a bid beneath its own subtree".into(),
                        ));
                    }
                    let parent = bids::Entity::find_by_id(parent_id)
                        .one(&txn)
                        .await?
                        .ok_or_else(|| {
                            AppError::NotFound(format!("Parent bid {parent_id} not found"))
                        })?;
                    if parent.is_target {
                        return Err(AppError::ValidationError(
                            "Parent bid is a target and cannot have children".into(),
                        ));
                    }
                }
                requested
            }
            None => bid.parent_id,
        };

        let is_target = req.is_target.unwrap_or(bid.is_target);
        if is_target {
            let children = self.direct_children_count(&txn, bid.id).await?;
            if children != 0 {
                return Err(AppError::ValidationError(
                    "Target bids cannot have children".into(),
                ));
            }
        }

        // 权威字段解析: 根用请求值, 子节点从根拉取
        let fields = match new_parent_id {
            Some(parent_id) => {
                let parent = bids::Entity::find_by_id(parent_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Parent bid {parent_id} not found"))
                    })?;
                let root = self.resolve_root(&txn, &parent).await?;
                ResolvedFields {
                    event_id: root.event_id,
                    speedrun_id: root.speedrun_id,
                    state: root.state,
                }
            }
            None => ResolvedFields {
                event_id: req.event_id.or(bid.event_id),
                speedrun_id: match req.speedrun_id {
                    Some(v) => v,
                    None => bid.speedrun_id,
                },
                state: req.state.unwrap_or(bid.state),
            },
        };

        if let Some(event_id) = fields.event_id {
            load_unlocked_event(&txn, event_id).await?;
        }

        let name = req.name.unwrap_or_else(|| bid.name.clone());
        let siblings = self.sibling_names(&txn, &fields, new_parent_id).await?;
        if has_sibling_name_conflict(&siblings, Some(bid.id), &name) {
            return Err(AppError::ValidationError(
                "A bid with the same name already exists under the same event/run/parent".into(),
            ));
        }

        let revealed = newly_revealed(bid.state, fields.state);
        let is_root_after = new_parent_id.is_none();
        let parent_changed = new_parent_id != bid.parent_id;

        let mut am = bid.clone().into_active_model();
        am.event_id = Set(fields.event_id);
        am.speedrun_id = Set(fields.speedrun_id);
        am.parent_id = Set(new_parent_id);
        am.name = Set(name);
        am.state = Set(fields.state);
        if let Some(v) = req.description {
            am.description = Set(v);
        }
        am.goal = Set(goal);
        am.is_target = Set(is_target);
        if revealed {
            am.revealed_at = Set(Some(Utc::now()));
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&txn).await?;

        // 根编辑把权威字段写到全部后代; 带子树换父时,
        // 移动过来的整棵子树同样要从新根拉取
        if is_root_after {
            self.propagate_root_fields(&txn, &updated).await?;
        } else if parent_changed {
            let root = self.resolve_root(&txn, &updated).await?;
            self.propagate_root_fields(&txn, &root).await?;
        }

        txn.commit().await?;
        Ok(updated.into())
    }

    /// 状态变更 (应用到根时级联整棵子树)
    pub async fn set_bid_state(&self, id: i64, state: BidState) -> AppResult<BidResponse> {
        self.update_bid(
            id,
            UpdateBidRequest {
                state: Some(state),
                ..empty_update()
            },
        )
        .await
    }

    /// 重命名 (同一作用域下大小写不敏感地查重)
    pub async fn rename_bid(&self, id: i64, name: String) -> AppResult<BidResponse> {
        self.update_bid(
            id,
            UpdateBidRequest {
                name: Some(name),
                ..empty_update()
            },
        )
        .await
    }

    /// 换父 (None 表示提升为根); 移动后从新根拉取权威字段
    pub async fn reparent_bid(&self, id: i64, parent_id: Option<i64>) -> AppResult<BidResponse> {
        self.update_bid(
            id,
            UpdateBidRequest {
                parent_id: Some(parent_id),
                ..empty_update()
            },
        )
        .await
    }

    pub async fn get_bid(&self, id: i64) -> AppResult<BidResponse> {
        let bid = bids::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bid {id} not found")))?;
        Ok(bid.into())
    }

    /// 列出活动内的竞价节点
    pub async fn list_bids(&self, event_id: i64) -> AppResult<Vec<BidResponse>> {
        let list = bids::Entity::find()
            .filter(bids::Column::EventId.eq(event_id))
            .order_by_asc(bids::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 提交选项建议; 同一活动内建议名不允许大小写不敏感地重复
    pub async fn add_suggestion(
        &self,
        bid_id: i64,
        name: String,
    ) -> AppResult<BidSuggestionResponse> {
        let bid = bids::Entity::find_by_id(bid_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bid {bid_id} not found")))?;

        let event_id = bid.event_id.ok_or_else(|| {
            AppError::ValidationError("Cannot suggest options for a bid without an event".into())
        })?;

        // 活动内已有建议 (含挂在 run 级 bid 下的, 它们的 event_id 同样被反范式化)
        let event_bids = bids::Entity::find()
            .filter(bids::Column::EventId.eq(event_id))
            .all(&self.pool)
            .await?;
        let bid_ids: Vec<i64> = event_bids.iter().map(|b| b.id).collect();
        let existing = suggestions::Entity::find()
            .filter(suggestions::Column::BidId.is_in(bid_ids))
            .all(&self.pool)
            .await?;
        let lowered = name.to_lowercase();
        if existing.iter().any(|s| s.name.to_lowercase() == lowered) {
            return Err(AppError::ValidationError(
                "A suggestion with the same name already exists within this event".into(),
            ));
        }

        let model = suggestions::ActiveModel {
            bid_id: Set(bid_id),
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    pub async fn list_suggestions(&self, bid_id: i64) -> AppResult<Vec<BidSuggestionResponse>> {
        let list = suggestions::Entity::find()
            .filter(suggestions::Column::BidId.eq(bid_id))
            .order_by_asc(suggestions::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

fn empty_update() -> UpdateBidRequest {
    UpdateBidRequest {
        name: None,
        state: None,
        description: None,
        goal: None,
        is_target: None,
        parent_id: None,
        event_id: None,
        speedrun_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_name_conflict_is_case_insensitive() {
        let siblings = vec![(1, "OptionA".to_string()), (2, "OptionB".to_string())];
        assert!(has_sibling_name_conflict(&siblings, None, "optiona"));
        assert!(has_sibling_name_conflict(&siblings, None, "OPTIONB"));
        assert!(!has_sibling_name_conflict(&siblings, None, "OptionC"));
    }

    #[test]
    fn test_sibling_name_conflict_excludes_self() {
        let siblings = vec![(1, "OptionA".to_string())];
        // renaming bid 1 to its own name is not a conflict
        assert!(!has_sibling_name_conflict(&siblings, Some(1), "OptionA"));
        assert!(has_sibling_name_conflict(&siblings, Some(2), "OptionA"));
    }

    #[test]
    fn test_newly_revealed_transitions() {
        assert!(newly_revealed(BidState::Hidden, BidState::Opened));
        assert!(!newly_revealed(BidState::Opened, BidState::Opened));
        assert!(!newly_revealed(BidState::Hidden, BidState::Closed));
        assert!(!newly_revealed(BidState::Closed, BidState::Opened));
    }
}
