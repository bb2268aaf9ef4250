//! 数据模型定义
//!
//! - `entities`: 业务实体
//! - `requests`: HTTP 请求体 / 查询参数
//! - `responses`: HTTP 响应体

pub mod accounts;
pub mod announcements;
pub mod auth;
pub mod catalog;
pub mod common;
pub mod grades;
pub mod students;
pub mod system;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    RateLimitExceeded = 1029,

    // 认证与账号 2xxx
    AuthFailed = 2000,
    RegisterFailed = 2001,
    AccountEmailAlreadyExists = 2002,
    AccountEmailInvalid = 2003,
    AccountPasswordInvalid = 2004,
    AccountNotFound = 2005,
    AccountUpdateFailed = 2006,
    CanNotDeleteCurrentAccount = 2007,

    // 学生 3xxx
    StudentNotFound = 3000,
    StudentEnrollmentCodeExists = 3001,
    StudentAlreadyLinked = 3002,
    AccountAlreadyLinked = 3003,
    StudentInvalid = 3004,

    // 课程 / 教师 / 科目 35xx
    CourseNotFound = 3500,
    TeacherNotFound = 3501,
    SubjectNotFound = 3502,
    CatalogInvalid = 3503,

    // 成绩 4xxx
    GradeScoreInvalid = 4000,
    GradeScopeDenied = 4001,
    GradeWriteFailed = 4002,

    // 公告 5xxx
    AnnouncementNotFound = 5000,
    AnnouncementInvalid = 5001,
    AnnouncementPermissionDenied = 5002,
}

impl ErrorCode {
    /// 按错误分类选择默认业务码
    pub fn from_error(err: &crate::errors::ScholarError) -> Self {
        use crate::errors::ScholarError;
        match err {
            ScholarError::Validation(_) => ErrorCode::BadRequest,
            ScholarError::Authentication(_) => ErrorCode::Unauthorized,
            ScholarError::Authorization(_) => ErrorCode::Forbidden,
            ScholarError::NotFound(_) => ErrorCode::NotFound,
            ScholarError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }
}
