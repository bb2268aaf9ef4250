use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::entities::AccountRole;

// 公告分类
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub enum AnnouncementCategory {
    Institutional, // 机构公告
    Reminder,      // 提醒
    Notice,        // 通知
}

impl<'de> Deserialize<'de> for AnnouncementCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AnnouncementCategory>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的公告分类: '{s}'. 支持的分类: institutional, reminder, notice"
            ))
        })
    }
}

impl std::fmt::Display for AnnouncementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnouncementCategory::Institutional => write!(f, "institutional"),
            AnnouncementCategory::Reminder => write!(f, "reminder"),
            AnnouncementCategory::Notice => write!(f, "notice"),
        }
    }
}

impl std::str::FromStr for AnnouncementCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "institutional" => Ok(AnnouncementCategory::Institutional),
            "reminder" => Ok(AnnouncementCategory::Reminder),
            "notice" => Ok(AnnouncementCategory::Notice),
            _ => Err(format!("Invalid announcement category: {s}")),
        }
    }
}

// 公告优先级
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub enum AnnouncementPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl<'de> Deserialize<'de> for AnnouncementPriority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AnnouncementPriority>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的公告优先级: '{s}'. 支持的优先级: low, normal, high, urgent"
            ))
        })
    }
}

impl std::fmt::Display for AnnouncementPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnouncementPriority::Low => write!(f, "low"),
            AnnouncementPriority::Normal => write!(f, "normal"),
            AnnouncementPriority::High => write!(f, "high"),
            AnnouncementPriority::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for AnnouncementPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AnnouncementPriority::Low),
            "normal" => Ok(AnnouncementPriority::Normal),
            "high" => Ok(AnnouncementPriority::High),
            "urgent" => Ok(AnnouncementPriority::Urgent),
            _ => Err(format!("Invalid announcement priority: {s}")),
        }
    }
}

/// 公告作者摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
}

/// 带调用者已读状态的公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/announcement.ts")]
pub struct AnnouncementView {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub category: AnnouncementCategory,
    pub priority: AnnouncementPriority,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub author: AuthorSummary,
    pub read: bool,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 校验通过的新公告
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
    pub category: AnnouncementCategory,
    pub priority: AnnouncementPriority,
}

/// 校验通过的公告修改，`None` 表示保持原值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<AnnouncementCategory>,
    pub priority: Option<AnnouncementPriority>,
}
