use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 捐赠者名称展示模式
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum DonorVisibility {
    /// 完整显示姓名与别名
    #[sea_orm(string_value = "FULL")]
    Full,
    /// 姓氏缩写为首字母
    #[sea_orm(string_value = "FIRST")]
    First,
    /// 仅显示别名 (要求别名非空)
    #[sea_orm(string_value = "ALIAS")]
    Alias,
    /// 匿名
    #[sea_orm(string_value = "ANON")]
    Anon,
}

/// 捐赠者实体
/// - email 全局唯一; alias 可空, 非空时唯一
/// - visibility 为 ALIAS 时 alias 必须非空 (服务层校验)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "donors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub alias: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub visibility: DonorVisibility,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 按 visibility 渲染对外展示的名称
    pub fn visible_name(&self) -> String {
        match self.visibility {
            DonorVisibility::Anon => "(Anonymous)".to_string(),
            DonorVisibility::Alias => self.alias.clone().unwrap_or_else(|| "(No Name)".to_string()),
            DonorVisibility::Full | DonorVisibility::First => {
                if self.last_name.is_empty() && self.first_name.is_empty() {
                    return self.alias.clone().unwrap_or_else(|| "(No Name)".to_string());
                }
                let last_name = match self.visibility {
                    DonorVisibility::First => {
                        let initial: String = self.last_name.chars().take(1).collect();
                        format!("{initial}...")
                    }
                    _ => self.last_name.clone(),
                };
                match &self.alias {
                    Some(alias) => format!("{}, {} ({})", last_name, self.first_name, alias),
                    None => format!("{}, {}", last_name, self.first_name),
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn donor(first: &str, last: &str, alias: Option<&str>, visibility: DonorVisibility) -> Model {
        Model {
            id: 1,
            email: "donor@example.com".to_string(),
            alias: alias.map(str::to_string),
            first_name: first.to_string(),
            last_name: last.to_string(),
            visibility,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_visible_name_anonymous() {
        let d = donor("Jane", "Doe", Some("jd"), DonorVisibility::Anon);
        assert_eq!(d.visible_name(), "(Anonymous)");
    }

    #[test]
    fn test_visible_name_alias_only() {
        let d = donor("Jane", "Doe", Some("jd"), DonorVisibility::Alias);
        assert_eq!(d.visible_name(), "jd");
    }

    #[test]
    fn test_visible_name_first_initial() {
        let d = donor("Jane", "Doe", None, DonorVisibility::First);
        assert_eq!(d.visible_name(), "D..., Jane");
    }

    #[test]
    fn test_visible_name_full_with_alias() {
        let d = donor("Jane", "Doe", Some("jd"), DonorVisibility::Full);
        assert_eq!(d.visible_name(), "Doe, Jane (jd)");
    }

    #[test]
    fn test_visible_name_no_names_falls_back_to_alias() {
        let d = donor("", "", Some("jd"), DonorVisibility::Full);
        assert_eq!(d.visible_name(), "jd");
        let d = donor("", "", None, DonorVisibility::First);
        assert_eq!(d.visible_name(), "(No Name)");
    }
}
