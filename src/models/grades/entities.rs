use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 成绩行。`student_id` 为空表示共享（模板）行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub subject_id: i64,
    pub student_id: Option<i64>,
    pub n1: f64,
    pub n2: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 成绩行的寻址方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeKey {
    PerStudent { subject_id: i64, student_id: i64 },
    Shared { subject_id: i64 },
}

impl GradeKey {
    pub fn new(subject_id: i64, student_id: Option<i64>) -> Self {
        match student_id {
            Some(student_id) => GradeKey::PerStudent {
                subject_id,
                student_id,
            },
            None => GradeKey::Shared { subject_id },
        }
    }
}

/// 已校验的成绩条目，分数保证在 [0, 10] 内
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeEntry {
    pub subject_id: i64,
    pub n1: f64,
    pub n2: f64,
}

// 成绩单状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub enum BulletinStatus {
    Passed,     // 通过
    MakeupExam, // 补考
    Failed,     // 不及格
}

/// 成绩单行
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct BulletinRow {
    pub subject_id: i64,
    pub subject_name: String,
    pub n1: f64,
    pub n2: f64,
    pub average: f64,
    pub status: BulletinStatus,
}

// 分数被拒绝的原因
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub enum ScoreRejection {
    NotANumber,
    NotFinite,
    OutOfRange,
}

impl std::fmt::Display for ScoreRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreRejection::NotANumber => write!(f, "not_a_number"),
            ScoreRejection::NotFinite => write!(f, "not_finite"),
            ScoreRejection::OutOfRange => write!(f, "out_of_range"),
        }
    }
}

/// 批量成绩中第一个非法分数的位置
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct GradeViolation {
    pub index: usize,
    pub field: String,
    pub reason: ScoreRejection,
}

impl std::fmt::Display for GradeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entries[{}].{}: {}", self.index, self.field, self.reason)
    }
}
