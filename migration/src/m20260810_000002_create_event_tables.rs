use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create officers table
        manager
            .create_table(
                Table::create()
                    .table(Officers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Officers::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Officers::UserId).string().not_null())
                    .col(ColumnDef::new(Officers::OrgId).string().not_null())
                    .col(ColumnDef::new(Officers::Position).string().not_null())
                    .col(ColumnDef::new(Officers::StartTerm).big_integer().not_null())
                    .col(ColumnDef::new(Officers::EndTerm).big_integer().not_null())
                    .col(ColumnDef::new(Officers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Officers::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // One officer record per (user, organization) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_officers_user_org")
                    .table(Officers::Table)
                    .col(Officers::UserId)
                    .col(Officers::OrgId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create school_events table
        manager
            .create_table(
                Table::create()
                    .table(SchoolEvents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SchoolEvents::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(SchoolEvents::Title).string().not_null())
                    .col(ColumnDef::new(SchoolEvents::Description).string())
                    .col(ColumnDef::new(SchoolEvents::Date).big_integer().not_null())
                    .col(ColumnDef::new(SchoolEvents::Venue).string().not_null())
                    .col(ColumnDef::new(SchoolEvents::OrganizedBy).string().not_null())
                    .col(ColumnDef::new(SchoolEvents::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(SchoolEvents::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_school_events_date")
                    .table(SchoolEvents::Table)
                    .col(SchoolEvents::Date)
                    .to_owned(),
            )
            .await?;

        // Create calendar_entries table
        manager
            .create_table(
                Table::create()
                    .table(CalendarEntries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CalendarEntries::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(CalendarEntries::EventId).string().not_null())
                    .col(ColumnDef::new(CalendarEntries::CreatedBy).string().not_null())
                    .col(ColumnDef::new(CalendarEntries::DateAdded).big_integer().not_null())
                    .col(ColumnDef::new(CalendarEntries::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(CalendarEntries::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // One calendar entry per (user, event) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_calendar_entries_user_event")
                    .table(CalendarEntries::Table)
                    .col(CalendarEntries::CreatedBy)
                    .col(CalendarEntries::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create event_notifications table
        manager
            .create_table(
                Table::create()
                    .table(EventNotifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventNotifications::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(EventNotifications::EventId).string().not_null())
                    .col(ColumnDef::new(EventNotifications::RecipientId).string().not_null())
                    .col(ColumnDef::new(EventNotifications::Message).string().not_null())
                    .col(ColumnDef::new(EventNotifications::SentAt).big_integer().not_null())
                    .col(ColumnDef::new(EventNotifications::Status).string().not_null())
                    .col(ColumnDef::new(EventNotifications::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(EventNotifications::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_notifications_event_id")
                    .table(EventNotifications::Table)
                    .col(EventNotifications::EventId)
                    .to_owned(),
            )
            .await?;

        // Create reports table
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reports::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Reports::OrgId).string().not_null())
                    .col(ColumnDef::new(Reports::SubmittedBy).string().not_null())
                    .col(ColumnDef::new(Reports::ReportType).string().not_null())
                    .col(ColumnDef::new(Reports::FilePaths).string().not_null())
                    .col(ColumnDef::new(Reports::Status).string().not_null())
                    .col(ColumnDef::new(Reports::SubmittedDate).big_integer().not_null())
                    .col(ColumnDef::new(Reports::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Reports::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_org_id")
                    .table(Reports::Table)
                    .col(Reports::OrgId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventNotifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CalendarEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Officers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Officers {
    Table,
    Id,
    UserId,
    OrgId,
    Position,
    StartTerm,
    EndTerm,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SchoolEvents {
    Table,
    Id,
    Title,
    Description,
    Date,
    Venue,
    OrganizedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CalendarEntries {
    Table,
    Id,
    EventId,
    CreatedBy,
    DateAdded,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum EventNotifications {
    Table,
    Id,
    EventId,
    RecipientId,
    Message,
    SentAt,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reports {
    Table,
    Id,
    OrgId,
    SubmittedBy,
    ReportType,
    FilePaths,
    Status,
    SubmittedDate,
    CreatedAt,
    UpdatedAt,
}
