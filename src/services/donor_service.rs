use crate::entities::{DonorVisibility, donor_entity as donors};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateDonorRequest, DonorResponse, PaginatedResponse, PaginationParams, UpdateDonorRequest,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// 空白别名视为未设置
fn normalize_alias(alias: Option<String>) -> Option<String> {
    alias.filter(|a| !a.trim().is_empty())
}

/// ALIAS 展示模式要求有别名可用
fn check_visibility(visibility: DonorVisibility, alias: &Option<String>) -> Result<(), String> {
    if visibility == DonorVisibility::Alias && alias.is_none() {
        return Err("Cannot use alias-only visibility without an alias".into());
    }
    Ok(())
}

#[derive(Clone)]
pub struct DonorService {
    pool: DatabaseConnection,
}

impl DonorService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建捐赠者
    pub async fn create_donor(&self, req: CreateDonorRequest) -> AppResult<DonorResponse> {
        let alias = normalize_alias(req.alias);
        let visibility = req.visibility.unwrap_or(DonorVisibility::First);
        check_visibility(visibility, &alias).map_err(AppError::ValidationError)?;

        let existing = donors::Entity::find()
            .filter(donors::Column::Email.eq(req.email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "Donor with email '{}' already exists",
                req.email
            )));
        }

        let model = donors::ActiveModel {
            email: Set(req.email),
            alias: Set(alias),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            visibility: Set(visibility),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// 更新捐赠者
    pub async fn update_donor(&self, id: i64, req: UpdateDonorRequest) -> AppResult<DonorResponse> {
        let donor = donors::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donor {id} not found")))?;

        let alias = match req.alias {
            Some(a) => normalize_alias(Some(a)),
            None => donor.alias.clone(),
        };
        let visibility = req.visibility.unwrap_or(donor.visibility);
        check_visibility(visibility, &alias).map_err(AppError::ValidationError)?;

        let mut am = donor.into_active_model();
        if let Some(v) = req.email {
            am.email = Set(v);
        }
        am.alias = Set(alias);
        if let Some(v) = req.first_name {
            am.first_name = Set(v);
        }
        if let Some(v) = req.last_name {
            am.last_name = Set(v);
        }
        am.visibility = Set(visibility);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(updated.into())
    }

    pub async fn get_donor(&self, id: i64) -> AppResult<DonorResponse> {
        let donor = donors::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donor {id} not found")))?;
        Ok(donor.into())
    }

    /// 分页列出捐赠者
    pub async fn list_donors(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<DonorResponse>> {
        let base_query = donors::Entity::find();

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by_asc(donors::Column::LastName)
            .order_by_asc(donors::Column::FirstName)
            .order_by_asc(donors::Column::Email)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            params,
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_alias() {
        assert_eq!(normalize_alias(None), None);
        assert_eq!(normalize_alias(Some("".into())), None);
        assert_eq!(normalize_alias(Some("   ".into())), None);
        assert_eq!(normalize_alias(Some("jd".into())), Some("jd".to_string()));
    }

    #[test]
    fn test_alias_visibility_requires_alias() {
        assert!(check_visibility(DonorVisibility::Alias, &None).is_err());
        assert!(check_visibility(DonorVisibility::Alias, &Some("jd".into())).is_ok());
        assert!(check_visibility(DonorVisibility::Anon, &None).is_ok());
    }
}
