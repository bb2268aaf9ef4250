use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程班次
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl<'de> Deserialize<'de> for Shift {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Shift>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的班次: '{s}'. 支持的班次: morning, afternoon, evening"
            ))
        })
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shift::Morning => write!(f, "morning"),
            Shift::Afternoon => write!(f, "afternoon"),
            Shift::Evening => write!(f, "evening"),
        }
    }
}

impl std::str::FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Shift::Morning),
            "afternoon" => Ok(Shift::Afternoon),
            "evening" => Ok(Shift::Evening),
            _ => Err(format!("Invalid shift: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub shift: Shift,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    // 学位/职称
    pub title: String,
    // 授课时间（自由文本）
    pub teaching_time: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/catalog.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub credit_hours: i32,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
