use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveIden)]
enum Events {
    Table,
    Locked,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 为 events 增加 locked 标记:
/// 锁定的活动拒绝其子实体 (run/bid/donation/prize) 的常规增改。
/// 回填策略: 除计划时间最晚的活动外全部锁定。
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Events::Table)
                    .add_column(
                        ColumnDef::new(Events::Locked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        let conn = manager.get_connection();
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            "UPDATE events SET locked = TRUE".to_owned(),
        ))
        .await?;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            "UPDATE events SET locked = FALSE WHERE id = \
             (SELECT id FROM events ORDER BY scheduled_at DESC, id DESC LIMIT 1)"
                .to_owned(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Events::Table)
                    .drop_column(Events::Locked)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
