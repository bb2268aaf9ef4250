use super::entities::{Course, Subject, Teacher};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct TeacherListResponse {
    pub items: Vec<Teacher>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}
