use super::entities::Student;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
}
