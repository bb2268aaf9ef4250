use serde::Serialize;
use ts_rs::TS;

// 存活检查
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub uptime_seconds: i64,
}
