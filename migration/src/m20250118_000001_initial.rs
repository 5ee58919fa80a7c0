use sea_orm_migration::prelude::*;

/// Events (马拉松活动)
#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Short,
    Name,
    ReceiverName,
    Currency,
    TargetAmount,
    ScheduledAt,
    CreatedAt,
    UpdatedAt,
}

/// Speed Runs (活动内按顺序排列的比赛项目)
#[derive(DeriveIden)]
enum Speedruns {
    Table,
    Id,
    EventId,
    Name,
    Description,
    SortKey,
    StartTime,
    EndTime,
    DeprecatedRunners,
    CreatedAt,
    UpdatedAt,
}

/// Speedrun Runners (run 与 donor 的多对多关联)
#[derive(DeriveIden)]
enum SpeedrunRunners {
    Table,
    Id,
    SpeedrunId,
    DonorId,
}

/// Donors (捐赠者)
#[derive(DeriveIden)]
enum Donors {
    Table,
    Id,
    Email,
    Alias,
    FirstName,
    LastName,
    Visibility,
    CreatedAt,
    UpdatedAt,
}

/// Bids (树形竞价节点: event/speedrun/state 由根节点反范式化到全树)
#[derive(DeriveIden)]
enum Bids {
    Table,
    Id,
    EventId,
    SpeedrunId,
    ParentId,
    Name,
    State,
    Description,
    Goal,
    IsTarget,
    RevealedAt,
    CreatedAt,
    UpdatedAt,
}

/// Bid Suggestions (用户提交的选项建议)
#[derive(DeriveIden)]
enum BidSuggestions {
    Table,
    Id,
    BidId,
    Name,
    CreatedAt,
}

/// Donations (捐赠记录)
#[derive(DeriveIden)]
enum Donations {
    Table,
    Id,
    DonorId,
    EventId,
    Domain,
    DomainId,
    TransactionState,
    BidState,
    ReadState,
    CommentState,
    Amount,
    Fee,
    Currency,
    TimeReceived,
    Comment,
    ModComment,
    TestDonation,
    RequestedVisibility,
    RequestedAlias,
    RequestedEmail,
    CreatedAt,
    UpdatedAt,
}

/// Donation Bids (捐赠金额在叶子 bid 上的分配)
#[derive(DeriveIden)]
enum DonationBids {
    Table,
    Id,
    DonationId,
    BidId,
    Amount,
}

/// Prize Categories (奖品类别)
#[derive(DeriveIden)]
enum PrizeCategories {
    Table,
    Id,
    Name,
}

/// Prizes (奖品配置)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    CategoryId,
    SortKey,
    Image,
    Description,
    MinimumBid,
    MaximumBid,
    SumDonations,
    RandomDraw,
    TicketDraw,
    EventId,
    StartRunId,
    EndRunId,
    StartTime,
    EndTime,
    MaxWinners,
    CreatedAt,
    UpdatedAt,
}

/// Prize Tickets (奖券: 捐赠对某个奖品的投入金额)
#[derive(DeriveIden)]
enum PrizeTickets {
    Table,
    Id,
    PrizeId,
    DonationId,
    Amount,
}

/// Prize Winners (奖品与获奖者的关联表)
#[derive(DeriveIden)]
enum PrizeWinners {
    Table,
    Id,
    PrizeId,
    WinnerId,
    EmailSent,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始表结构:
/// - 金额统一使用 DECIMAL(20,2)
/// - 状态枚举以字符串列存储 (HIDDEN/OPENED/CLOSED, PENDING/COMPLETED/... 等)
/// - bids 树通过 parent_id 自引用, event/speedrun/state 冗余存储在每个节点上
///   以便查询, 一致性由服务层在事务内维护
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 活动表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Short).string_len(64).not_null())
                    .col(ColumnDef::new(Events::Name).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Events::ReceiverName)
                            .string_len(128)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Events::Currency)
                            .string_len(8)
                            .not_null()
                            .default("USD"),
                    )
                    .col(
                        ColumnDef::new(Events::TargetAmount)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // short 作为 URL 标识必须唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_short_unique")
                    .table(Events::Table)
                    .col(Events::Short)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 比赛项目表
        manager
            .create_table(
                Table::create()
                    .table(Speedruns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Speedruns::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Speedruns::EventId).big_integer().not_null())
                    .col(ColumnDef::new(Speedruns::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Speedruns::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Speedruns::SortKey).integer().not_null())
                    .col(
                        ColumnDef::new(Speedruns::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Speedruns::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Speedruns::DeprecatedRunners)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Speedruns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Speedruns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一活动下 run 名称唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_speedruns_event_name_unique")
                    .table(Speedruns::Table)
                    .col(Speedruns::EventId)
                    .col(Speedruns::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_speedruns_event_sort")
                    .table(Speedruns::Table)
                    .col(Speedruns::EventId)
                    .col(Speedruns::SortKey)
                    .to_owned(),
            )
            .await?;

        // run 与 donor 的关联表
        manager
            .create_table(
                Table::create()
                    .table(SpeedrunRunners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpeedrunRunners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SpeedrunRunners::SpeedrunId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpeedrunRunners::DonorId)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_speedrun_runners_unique")
                    .table(SpeedrunRunners::Table)
                    .col(SpeedrunRunners::SpeedrunId)
                    .col(SpeedrunRunners::DonorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 捐赠者表
        manager
            .create_table(
                Table::create()
                    .table(Donors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donors::Email).string_len(128).not_null())
                    .col(ColumnDef::new(Donors::Alias).string_len(32).null())
                    .col(
                        ColumnDef::new(Donors::FirstName)
                            .string_len(32)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Donors::LastName)
                            .string_len(32)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Donors::Visibility)
                            .string_len(32)
                            .not_null()
                            .default("FIRST"),
                    )
                    .col(
                        ColumnDef::new(Donors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Donors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donors_email_unique")
                    .table(Donors::Table)
                    .col(Donors::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // alias 允许 NULL, 非 NULL 时唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donors_alias_unique")
                    .table(Donors::Table)
                    .col(Donors::Alias)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 竞价树表
        manager
            .create_table(
                Table::create()
                    .table(Bids::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bids::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bids::EventId).big_integer().null())
                    .col(ColumnDef::new(Bids::SpeedrunId).big_integer().null())
                    .col(ColumnDef::new(Bids::ParentId).big_integer().null())
                    .col(ColumnDef::new(Bids::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Bids::State)
                            .string_len(32)
                            .not_null()
                            .default("OPENED"),
                    )
                    .col(ColumnDef::new(Bids::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Bids::Goal).decimal_len(20, 2).null())
                    .col(
                        ColumnDef::new(Bids::IsTarget)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Bids::RevealedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Bids::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Bids::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 兄弟节点查重 / 子树遍历都按这些列过滤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bids_scope")
                    .table(Bids::Table)
                    .col(Bids::EventId)
                    .col(Bids::SpeedrunId)
                    .col(Bids::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bids_parent")
                    .table(Bids::Table)
                    .col(Bids::ParentId)
                    .to_owned(),
            )
            .await?;

        // 选项建议表
        manager
            .create_table(
                Table::create()
                    .table(BidSuggestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BidSuggestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BidSuggestions::BidId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BidSuggestions::Name)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BidSuggestions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 捐赠表
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donations::DonorId).big_integer().null())
                    .col(ColumnDef::new(Donations::EventId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Donations::Domain)
                            .string_len(32)
                            .not_null()
                            .default("LOCAL"),
                    )
                    .col(ColumnDef::new(Donations::DomainId).string_len(160).not_null())
                    .col(
                        ColumnDef::new(Donations::TransactionState)
                            .string_len(64)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Donations::BidState)
                            .string_len(32)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Donations::ReadState)
                            .string_len(32)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Donations::CommentState)
                            .string_len(32)
                            .not_null()
                            .default("ABSENT"),
                    )
                    .col(ColumnDef::new(Donations::Amount).decimal_len(20, 2).not_null())
                    .col(
                        ColumnDef::new(Donations::Fee)
                            .decimal_len(20, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Donations::Currency).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Donations::TimeReceived)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donations::Comment).text().not_null().default(""))
                    .col(ColumnDef::new(Donations::ModComment).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Donations::TestDonation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Donations::RequestedVisibility)
                            .string_len(32)
                            .not_null()
                            .default("CURR"),
                    )
                    .col(ColumnDef::new(Donations::RequestedAlias).string_len(32).null())
                    .col(ColumnDef::new(Donations::RequestedEmail).string_len(128).null())
                    .col(
                        ColumnDef::new(Donations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Donations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donations_domain_id_unique")
                    .table(Donations::Table)
                    .col(Donations::DomainId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 抽奖资格查询按 (event, state, time_received) 过滤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donations_event_state_time")
                    .table(Donations::Table)
                    .col(Donations::EventId)
                    .col(Donations::TransactionState)
                    .col(Donations::TimeReceived)
                    .to_owned(),
            )
            .await?;

        // 竞价分配表
        manager
            .create_table(
                Table::create()
                    .table(DonationBids::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DonationBids::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DonationBids::DonationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DonationBids::BidId).big_integer().not_null())
                    .col(
                        ColumnDef::new(DonationBids::Amount)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donation_bids_donation")
                    .table(DonationBids::Table)
                    .col(DonationBids::DonationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donation_bids_bid")
                    .table(DonationBids::Table)
                    .col(DonationBids::BidId)
                    .to_owned(),
            )
            .await?;

        // 奖品类别表
        manager
            .create_table(
                Table::create()
                    .table(PrizeCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrizeCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PrizeCategories::Name)
                            .string_len(64)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prize_categories_name_unique")
                    .table(PrizeCategories::Table)
                    .col(PrizeCategories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Name).string_len(64).not_null())
                    .col(ColumnDef::new(Prizes::CategoryId).big_integer().null())
                    .col(ColumnDef::new(Prizes::SortKey).integer().not_null().default(0))
                    .col(ColumnDef::new(Prizes::Image).string_len(1024).null())
                    .col(ColumnDef::new(Prizes::Description).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Prizes::MinimumBid)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Prizes::MaximumBid).decimal_len(20, 2).null())
                    .col(ColumnDef::new(Prizes::SumDonations).boolean().not_null())
                    .col(
                        ColumnDef::new(Prizes::RandomDraw)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Prizes::TicketDraw)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Prizes::EventId).big_integer().not_null())
                    .col(ColumnDef::new(Prizes::StartRunId).big_integer().null())
                    .col(ColumnDef::new(Prizes::EndRunId).big_integer().null())
                    .col(ColumnDef::new(Prizes::StartTime).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Prizes::EndTime).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Prizes::MaxWinners)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_name_unique")
                    .table(Prizes::Table)
                    .col(Prizes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_event")
                    .table(Prizes::Table)
                    .col(Prizes::EventId)
                    .to_owned(),
            )
            .await?;

        // 奖券表
        manager
            .create_table(
                Table::create()
                    .table(PrizeTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrizeTickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrizeTickets::PrizeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PrizeTickets::DonationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PrizeTickets::Amount)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prize_tickets_prize_donation")
                    .table(PrizeTickets::Table)
                    .col(PrizeTickets::PrizeId)
                    .col(PrizeTickets::DonationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prize_tickets_donation")
                    .table(PrizeTickets::Table)
                    .col(PrizeTickets::DonationId)
                    .to_owned(),
            )
            .await?;

        // 获奖关联表
        manager
            .create_table(
                Table::create()
                    .table(PrizeWinners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrizeWinners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrizeWinners::PrizeId).big_integer().not_null())
                    .col(ColumnDef::new(PrizeWinners::WinnerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PrizeWinners::EmailSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PrizeWinners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一奖品不能重复记录同一获奖者
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prize_winners_unique")
                    .table(PrizeWinners::Table)
                    .col(PrizeWinners::PrizeId)
                    .col(PrizeWinners::WinnerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prize_winners_winner")
                    .table(PrizeWinners::Table)
                    .col(PrizeWinners::WinnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrizeWinners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PrizeTickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PrizeCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DonationBids::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BidSuggestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bids::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Donors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SpeedrunRunners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Speedruns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        Ok(())
    }
}
