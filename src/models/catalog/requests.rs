use super::entities::Shift;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub shift: Shift,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct CreateTeacherRequest {
    pub name: String,
    pub title: String,
    pub teaching_time: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    /// 学时，1..=999
    pub credit_hours: i32,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
}
