use crate::entities::{
    DonationDomain, TransactionState, bid_entity as bids, donation_bid_entity as donation_bids,
    donation_entity as donations, donor_entity as donors, prize_entity as prizes,
    prize_ticket_entity as tickets,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateDonationBidRequest, CreateDonationRequest, CreatePrizeTicketRequest, DonationBidResponse,
    DonationQuery, DonationResponse, PaginatedResponse, PaginationParams, PrizeTicketResponse,
    UpdateDonationRequest,
};
use crate::services::event_service::load_unlocked_event;
use crate::utils::{require_non_negative, require_positive, round_money};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 分配 / 奖券追加后总额不得超过捐赠金额
fn check_allocation_total(
    donation_amount: Decimal,
    existing: &[Decimal],
    additional: Decimal,
    kind: &str,
) -> Result<(), String> {
    let total: Decimal = existing.iter().copied().sum::<Decimal>() + additional;
    if total > donation_amount {
        return Err(format!(
            "{kind} total is greater than donation amount: {total} > {donation_amount}"
        ));
    }
    Ok(())
}

/// PENDING 之外的交易状态必须已关联 donor
fn check_donor_required(
    state: TransactionState,
    donor_id: Option<i64>,
) -> Result<(), String> {
    if state != TransactionState::Pending && donor_id.is_none() {
        return Err("Donation must have a donor when in a non-pending state".into());
    }
    Ok(())
}

#[derive(Clone)]
pub struct DonationService {
    pool: DatabaseConnection,
}

impl DonationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建捐赠
    /// LOCAL 渠道且有 donor 时, 缺省 domain_id 由接收时间与邮箱拼接生成
    /// (渠道通知重放时天然去重); 其余渠道缺省生成随机标识
    pub async fn create_donation(&self, req: CreateDonationRequest) -> AppResult<DonationResponse> {
        load_unlocked_event(&self.pool, req.event_id).await?;

        require_positive("Donation amount", req.amount).map_err(AppError::ValidationError)?;
        let fee = req.fee.unwrap_or(Decimal::ZERO);
        require_non_negative("Donation fee", fee).map_err(AppError::ValidationError)?;

        let state = req.transaction_state.unwrap_or(TransactionState::Pending);
        check_donor_required(state, req.donor_id).map_err(AppError::ValidationError)?;

        if let Some(donor_id) = req.donor_id {
            let exists = donors::Entity::find_by_id(donor_id).one(&self.pool).await?;
            if exists.is_none() {
                return Err(AppError::NotFound(format!("Donor {donor_id} not found")));
            }
        }

        let domain = req.domain.unwrap_or(DonationDomain::Local);
        let domain_id = match req.domain_id {
            Some(id) if !id.is_empty() => id,
            _ => match (domain, req.donor_id) {
                (DonationDomain::Local, Some(donor_id)) => {
                    let donor = donors::Entity::find_by_id(donor_id)
                        .one(&self.pool)
                        .await?
                        .ok_or_else(|| AppError::NotFound(format!("Donor {donor_id} not found")))?;
                    format!("{}{}", req.time_received.timestamp(), donor.email)
                }
                _ => uuid::Uuid::new_v4().to_string(),
            },
        };

        let existing = donations::Entity::find()
            .filter(donations::Column::DomainId.eq(domain_id.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "A donation with domain id '{domain_id}' already exists"
            )));
        }

        let model = donations::ActiveModel {
            donor_id: Set(req.donor_id),
            event_id: Set(req.event_id),
            domain: Set(domain),
            domain_id: Set(domain_id),
            transaction_state: Set(state),
            amount: Set(round_money(req.amount)),
            fee: Set(round_money(fee)),
            currency: Set(req.currency),
            time_received: Set(req.time_received),
            comment: Set(req.comment),
            test_donation: Set(req.test_donation),
            requested_visibility: Set(req
                .requested_visibility
                .unwrap_or(crate::entities::RequestedVisibility::Curr)),
            requested_alias: Set(req.requested_alias),
            requested_email: Set(req.requested_email),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// 状态流转 / 审核字段更新
    pub async fn update_donation(
        &self,
        id: i64,
        req: UpdateDonationRequest,
    ) -> AppResult<DonationResponse> {
        let donation = donations::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donation {id} not found")))?;
        load_unlocked_event(&self.pool, donation.event_id).await?;

        let state = req.transaction_state.unwrap_or(donation.transaction_state);
        let donor_id = req.donor_id.or(donation.donor_id);
        check_donor_required(state, donor_id).map_err(AppError::ValidationError)?;

        let mut am = donation.into_active_model();
        am.donor_id = Set(donor_id);
        am.transaction_state = Set(state);
        if let Some(v) = req.bid_state {
            am.bid_state = Set(v);
        }
        if let Some(v) = req.read_state {
            am.read_state = Set(v);
        }
        if let Some(v) = req.comment_state {
            am.comment_state = Set(v);
        }
        if let Some(v) = req.mod_comment {
            am.mod_comment = Set(v);
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(updated.into())
    }

    pub async fn get_donation(&self, id: i64) -> AppResult<DonationResponse> {
        let donation = donations::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donation {id} not found")))?;
        Ok(donation.into())
    }

    /// 分页列出捐赠 (倒序)
    pub async fn list_donations(
        &self,
        query: &DonationQuery,
    ) -> AppResult<PaginatedResponse<DonationResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = donations::Entity::find();
        if let Some(event_id) = query.event_id {
            base_query = base_query.filter(donations::Column::EventId.eq(event_id));
        }
        if let Some(state) = query.transaction_state {
            base_query = base_query.filter(donations::Column::TransactionState.eq(state));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by(donations::Column::TimeReceived, Order::Desc)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    /// 在叶子 bid 上分配金额
    /// 叶子校验与总额校验都在插入事务内复查, 并发分配不会超出捐赠金额
    pub async fn add_donation_bid(
        &self,
        donation_id: i64,
        req: CreateDonationBidRequest,
    ) -> AppResult<DonationBidResponse> {
        require_positive("Bid amount", req.amount).map_err(AppError::ValidationError)?;

        let txn = self.pool.begin().await?;

        let donation = donations::Entity::find_by_id(donation_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donation {donation_id} not found")))?;

        let bid = bids::Entity::find_by_id(req.bid_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bid {} not found", req.bid_id)))?;

        // 提交时点的叶子校验
        let children = bids::Entity::find()
            .filter(bids::Column::ParentId.eq(bid.id))
            .count(&txn)
            .await?;
        if children != 0 {
            return Err(AppError::ValidationError(
                "Target bid must be a leaf node".into(),
            ));
        }

        let existing: Vec<Decimal> = donation_bids::Entity::find()
            .filter(donation_bids::Column::DonationId.eq(donation_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|b| b.amount)
            .collect();
        check_allocation_total(donation.amount, &existing, req.amount, "Bid")
            .map_err(AppError::ValidationError)?;

        let model = donation_bids::ActiveModel {
            donation_id: Set(donation_id),
            bid_id: Set(req.bid_id),
            amount: Set(round_money(req.amount)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model.into())
    }

    /// 为 ticket_draw 奖品购买奖券
    pub async fn add_prize_ticket(
        &self,
        donation_id: i64,
        req: CreatePrizeTicketRequest,
    ) -> AppResult<PrizeTicketResponse> {
        require_positive("Ticket amount", req.amount).map_err(AppError::ValidationError)?;

        let txn = self.pool.begin().await?;

        let donation = donations::Entity::find_by_id(donation_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donation {donation_id} not found")))?;

        let prize = prizes::Entity::find_by_id(req.prize_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {} not found", req.prize_id)))?;
        if !prize.ticket_draw {
            return Err(AppError::ValidationError(format!(
                "Prize '{}' is not a ticket-draw prize",
                prize.name
            )));
        }

        let existing: Vec<Decimal> = tickets::Entity::find()
            .filter(tickets::Column::DonationId.eq(donation_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|t| t.amount)
            .collect();
        check_allocation_total(donation.amount, &existing, req.amount, "Prize ticket")
            .map_err(AppError::ValidationError)?;

        let model = tickets::ActiveModel {
            prize_id: Set(req.prize_id),
            donation_id: Set(donation_id),
            amount: Set(round_money(req.amount)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_allocation_total_within_amount() {
        let existing = vec![dec("3.00"), dec("4.00")];
        assert!(check_allocation_total(dec("10.00"), &existing, dec("3.00"), "Bid").is_ok());
    }

    #[test]
    fn test_allocation_total_exceeds_amount() {
        // 10.00 donation with 12.00 allocated across bids must be rejected
        let existing = vec![dec("7.00")];
        let err = check_allocation_total(dec("10.00"), &existing, dec("5.00"), "Bid");
        assert!(err.is_err());
    }

    #[test]
    fn test_allocation_total_boundary_is_allowed() {
        let existing = vec![dec("5.00")];
        assert!(check_allocation_total(dec("10.00"), &existing, dec("5.00"), "Bid").is_ok());
    }

    #[test]
    fn test_donor_required_when_not_pending() {
        assert!(check_donor_required(TransactionState::Pending, None).is_ok());
        assert!(check_donor_required(TransactionState::Completed, None).is_err());
        assert!(check_donor_required(TransactionState::Completed, Some(1)).is_ok());
        assert!(check_donor_required(TransactionState::Cancelled, None).is_err());
    }
}
