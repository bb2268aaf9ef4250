pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_records_tables;
mod m20250305_000001_create_announcements;
mod m20250310_000001_unique_shared_grades;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_records_tables::Migration),
            Box::new(m20250305_000001_create_announcements::Migration),
            Box::new(m20250310_000001_unique_shared_grades::Migration),
        ]
    }
}
