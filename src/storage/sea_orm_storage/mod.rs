//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod accounts;
mod announcements;
mod catalog;
mod grades;
mod reads;
mod students;

#[cfg(test)]
mod tests;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, ScholarError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| ScholarError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ScholarError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| ScholarError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| ScholarError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ScholarError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    accounts::{
        entities::{Account, AccountRole, Caller},
        requests::{AccountListQuery, CreateAccountRequest},
    },
    announcements::entities::{
        AnnouncementCategory, AnnouncementPatch, AnnouncementView, NewAnnouncement,
    },
    catalog::{
        entities::{Course, Subject, Teacher},
        requests::{CreateCourseRequest, CreateSubjectRequest, CreateTeacherRequest},
    },
    grades::entities::{Grade, GradeEntry},
    students::{entities::Student, requests::CreateStudentRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_account(&self, account: CreateAccountRequest) -> Result<Account> {
        self.create_account_impl(account).await
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.get_account_by_email_impl(email).await
    }

    async fn list_accounts(&self, query: AccountListQuery) -> Result<Vec<Account>> {
        self.list_accounts_impl(query).await
    }

    async fn update_account_role(&self, id: i64, role: AccountRole) -> Result<Option<Account>> {
        self.update_account_role_impl(id, role).await
    }

    async fn delete_account(&self, id: i64) -> Result<bool> {
        self.delete_account_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_accounts(&self) -> Result<u64> {
        self.count_accounts_impl().await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.list_students_impl().await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_account(&self, account_id: i64) -> Result<Option<Student>> {
        self.get_student_by_account_impl(account_id).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn claim_student(&self, account_id: i64, enrollment_code: &str) -> Result<Student> {
        self.claim_student_impl(account_id, enrollment_code).await
    }

    // 课程 / 教师 / 科目
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.list_teachers_impl().await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 成绩模块
    async fn upsert_grades(&self, student_id: Option<i64>, entries: &[GradeEntry]) -> Result<()> {
        self.upsert_grades_impl(student_id, entries).await
    }

    async fn list_grades(&self, student_id: Option<i64>) -> Result<Vec<Grade>> {
        self.list_grades_impl(student_id).await
    }

    // 公告模块
    async fn create_announcement(
        &self,
        author_id: i64,
        announcement: NewAnnouncement,
    ) -> Result<AnnouncementView> {
        self.create_announcement_impl(author_id, announcement).await
    }

    async fn update_announcement(
        &self,
        caller: &Caller,
        id: i64,
        patch: AnnouncementPatch,
    ) -> Result<AnnouncementView> {
        self.update_announcement_impl(caller, id, patch).await
    }

    async fn delete_announcement(&self, caller: &Caller, id: i64) -> Result<()> {
        self.delete_announcement_impl(caller, id).await
    }

    async fn get_announcement(
        &self,
        account_id: i64,
        id: i64,
    ) -> Result<Option<AnnouncementView>> {
        self.get_announcement_impl(account_id, id).await
    }

    async fn list_announcements(
        &self,
        account_id: i64,
        category: Option<AnnouncementCategory>,
    ) -> Result<Vec<AnnouncementView>> {
        self.list_announcements_impl(account_id, category).await
    }

    // 已读回执模块
    async fn mark_announcement_read(&self, account_id: i64, announcement_id: i64) -> Result<()> {
        self.mark_announcement_read_impl(account_id, announcement_id)
            .await
    }

    async fn mark_all_announcements_read(&self, account_id: i64) -> Result<i64> {
        self.mark_all_announcements_read_impl(account_id).await
    }

    async fn count_unread_announcements(&self, account_id: i64) -> Result<i64> {
        self.count_unread_announcements_impl(account_id).await
    }
}
