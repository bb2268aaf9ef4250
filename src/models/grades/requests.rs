use crate::models::common::deserialize_optional_id;
use serde::Deserialize;
use ts_rs::TS;

/// 单个成绩条目，分数保持原始 JSON 值，由校验步骤解析
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct GradeEntryInput {
    pub subject_id: i64,
    #[serde(default)]
    pub n1: Option<serde_json::Value>,
    #[serde(default)]
    pub n2: Option<serde_json::Value>,
}

/// 批量录入成绩，`studentId` 缺省时写入共享行
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct GradeBatchRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub student_id: Option<i64>,
    pub entries: Vec<GradeEntryInput>,
}

/// 成绩 / 成绩单查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct GradeQuery {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub student_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(qs: &str) -> GradeQuery {
        actix_web::web::Query::<GradeQuery>::from_query(qs)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_query_student_id_blank_means_absent() {
        assert_eq!(query("").student_id, None);
        assert_eq!(query("studentId=").student_id, None);
        assert_eq!(query("studentId=12").student_id, Some(12));
    }

    #[test]
    fn test_query_student_id_rejects_garbage() {
        assert!(actix_web::web::Query::<GradeQuery>::from_query("studentId=abc").is_err());
    }

    #[test]
    fn test_batch_student_id_accepts_empty_string() {
        let batch: GradeBatchRequest =
            serde_json::from_str(r#"{"studentId": "", "entries": []}"#).unwrap();
        assert_eq!(batch.student_id, None);
    }
}
