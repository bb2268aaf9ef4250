use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    // 学号，全局唯一
    pub enrollment_code: String,
    pub course_name: String,
    // 认领该档案的账号，只能设置一次
    pub account_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
