use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // student_id 为 NULL 的共享行每科最多一行
        match manager.get_database_backend() {
            // MySQL 没有部分索引，用生成列代替；非共享行该列为 NULL，不参与唯一约束
            DbBackend::MySql => {
                db.execute_unprepared(
                    "ALTER TABLE grades ADD COLUMN shared_subject_id BIGINT \
                     GENERATED ALWAYS AS (IF(student_id IS NULL, subject_id, NULL)) STORED",
                )
                .await?;
                db.execute_unprepared(
                    "CREATE UNIQUE INDEX idx_grades_shared_subject ON grades (shared_subject_id)",
                )
                .await?;
            }
            _ => {
                db.execute_unprepared(
                    "CREATE UNIQUE INDEX IF NOT EXISTS idx_grades_shared_subject \
                     ON grades (subject_id) WHERE student_id IS NULL",
                )
                .await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        match manager.get_database_backend() {
            DbBackend::MySql => {
                db.execute_unprepared("DROP INDEX idx_grades_shared_subject ON grades")
                    .await?;
                db.execute_unprepared("ALTER TABLE grades DROP COLUMN shared_subject_id")
                    .await?;
            }
            _ => {
                db.execute_unprepared("DROP INDEX IF EXISTS idx_grades_shared_subject")
                    .await?;
            }
        }

        Ok(())
    }
}
