use super::entities::AnnouncementCategory;
use serde::Deserialize;
use ts_rs::TS;

/// 创建公告请求。分类和优先级以字符串接收，由校验步骤报告具体字段
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub body: String,
    pub category: String,
    pub priority: Option<String>,
}

/// 修改公告请求，只校验提供的字段
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

/// 公告列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct AnnouncementListQuery {
    pub category: Option<AnnouncementCategory>,
    #[serde(default)]
    pub unread_only: bool,
}
