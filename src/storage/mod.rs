use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号（密码已哈希）
    async fn create_account(&self, account: CreateAccountRequest) -> Result<Account>;
    // 通过ID获取账号
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    // 通过邮箱获取账号
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    // 列出账号
    async fn list_accounts(&self, query: AccountListQuery) -> Result<Vec<Account>>;
    // 修改账号角色
    async fn update_account_role(&self, id: i64, role: AccountRole) -> Result<Option<Account>>;
    // 删除账号
    async fn delete_account(&self, id: i64) -> Result<bool>;
    // 更新最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计账号数量
    async fn count_accounts(&self) -> Result<u64>;

    /// 学生档案方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 获取账号认领的学生档案
    async fn get_student_by_account(&self, account_id: i64) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 账号通过学号认领学生档案
    async fn claim_student(&self, account_id: i64, enrollment_code: &str) -> Result<Student>;

    /// 课程 / 教师 / 科目
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 成绩账本
    // 在单个事务中批量写入成绩，`student_id` 为空时写入共享行
    async fn upsert_grades(&self, student_id: Option<i64>, entries: &[GradeEntry]) -> Result<()>;
    // 读取某个学生的成绩，或全部共享行
    async fn list_grades(&self, student_id: Option<i64>) -> Result<Vec<Grade>>;

    /// 公告
    async fn create_announcement(
        &self,
        author_id: i64,
        announcement: NewAnnouncement,
    ) -> Result<AnnouncementView>;
    // 事务内校验权限后修改
    async fn update_announcement(
        &self,
        caller: &Caller,
        id: i64,
        patch: AnnouncementPatch,
    ) -> Result<AnnouncementView>;
    async fn delete_announcement(&self, caller: &Caller, id: i64) -> Result<()>;
    async fn get_announcement(&self, account_id: i64, id: i64)
    -> Result<Option<AnnouncementView>>;
    async fn list_announcements(
        &self,
        account_id: i64,
        category: Option<AnnouncementCategory>,
    ) -> Result<Vec<AnnouncementView>>;

    /// 已读回执
    async fn mark_announcement_read(&self, account_id: i64, announcement_id: i64) -> Result<()>;
    // 返回本次新标记的数量
    async fn mark_all_announcements_read(&self, account_id: i64) -> Result<i64>;
    async fn count_unread_announcements(&self, account_id: i64) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
