pub use sea_orm_migration::prelude::*;

mod m20260810_000001_create_account_tables;
mod m20260810_000002_create_event_tables;
mod m20260810_000003_create_otp_audit_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_account_tables::Migration),
            Box::new(m20260810_000002_create_event_tables::Migration),
            Box::new(m20260810_000003_create_otp_audit_tables::Migration),
        ]
    }
}
