use super::entities::AnnouncementView;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct AnnouncementListResponse {
    pub items: Vec<AnnouncementView>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct MarkAllReadResponse {
    /// 本次新标记为已读的公告数量
    pub marked: i64,
}

/// 公告校验失败的字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct AnnouncementFieldError {
    pub field: String,
    pub message: String,
}
