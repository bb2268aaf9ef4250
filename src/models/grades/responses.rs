use super::entities::{BulletinRow, Grade};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct BulletinResponse {
    pub items: Vec<BulletinRow>,
}
