//! 成绩分数解析与校验
//!
//! 整批条目在写入前全部解析，任一分数非法则拒绝整批。

use serde_json::Value;

use crate::models::grades::entities::{GradeEntry, GradeViolation, ScoreRejection};
use crate::models::grades::requests::GradeEntryInput;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// 解析单个分数
///
/// - 缺失、`null`、空字符串视为 0
/// - 数字或数字字符串（允许逗号小数点）按数值处理
/// - 其他字符串为 `not_a_number`，`NaN`/`inf` 为 `not_finite`
pub fn parse_score(raw: Option<&Value>) -> Result<f64, ScoreRejection> {
    let value = match raw {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().ok_or(ScoreRejection::NotANumber)?,
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.replace(',', ".")
                    .parse::<f64>()
                    .map_err(|_| ScoreRejection::NotANumber)?
            }
        }
        Some(_) => return Err(ScoreRejection::NotANumber),
    };

    if !value.is_finite() {
        return Err(ScoreRejection::NotFinite);
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        return Err(ScoreRejection::OutOfRange);
    }
    Ok(value)
}

/// 校验整批条目，返回第一个违规位置
pub fn validate_entries(entries: &[GradeEntryInput]) -> Result<Vec<GradeEntry>, GradeViolation> {
    entries
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let violation = |field: &str, reason| GradeViolation {
                index,
                field: field.to_string(),
                reason,
            };
            let n1 = parse_score(input.n1.as_ref()).map_err(|r| violation("n1", r))?;
            let n2 = parse_score(input.n2.as_ref()).map_err(|r| violation("n2", r))?;
            Ok(GradeEntry {
                subject_id: input.subject_id,
                n1,
                n2,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(subject_id: i64, n1: Value, n2: Value) -> GradeEntryInput {
        GradeEntryInput {
            subject_id,
            n1: Some(n1),
            n2: Some(n2),
        }
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(parse_score(Some(&json!(7.5))), Ok(7.5));
        assert_eq!(parse_score(Some(&json!("6.25"))), Ok(6.25));
        assert_eq!(parse_score(Some(&json!(" 8 "))), Ok(8.0));
        assert_eq!(parse_score(Some(&json!("7,5"))), Ok(7.5));
    }

    #[test]
    fn test_missing_scores_default_to_zero() {
        assert_eq!(parse_score(None), Ok(0.0));
        assert_eq!(parse_score(Some(&Value::Null)), Ok(0.0));
        assert_eq!(parse_score(Some(&json!(""))), Ok(0.0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(parse_score(Some(&json!(0))), Ok(0.0));
        assert_eq!(parse_score(Some(&json!(10))), Ok(10.0));
        assert_eq!(
            parse_score(Some(&json!(10.01))),
            Err(ScoreRejection::OutOfRange)
        );
        assert_eq!(
            parse_score(Some(&json!(-0.5))),
            Err(ScoreRejection::OutOfRange)
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(
            parse_score(Some(&json!("abc"))),
            Err(ScoreRejection::NotANumber)
        );
        assert_eq!(
            parse_score(Some(&json!(true))),
            Err(ScoreRejection::NotANumber)
        );
        assert_eq!(
            parse_score(Some(&json!([1]))),
            Err(ScoreRejection::NotANumber)
        );
        assert_eq!(
            parse_score(Some(&json!("NaN"))),
            Err(ScoreRejection::NotFinite)
        );
        assert_eq!(
            parse_score(Some(&json!("inf"))),
            Err(ScoreRejection::NotFinite)
        );
    }

    #[test]
    fn test_batch_reports_first_violation() {
        let entries = vec![
            input(1, json!(5), json!(6)),
            input(2, json!(7), json!(11)),
            input(3, json!("x"), json!(1)),
        ];

        let violation = validate_entries(&entries).unwrap_err();
        assert_eq!(violation.index, 1);
        assert_eq!(violation.field, "n2");
        assert_eq!(violation.reason, ScoreRejection::OutOfRange);
        assert_eq!(violation.to_string(), "entries[1].n2: out_of_range");
    }

    #[test]
    fn test_valid_batch() {
        let entries = vec![
            input(1, json!(5), json!("6.5")),
            GradeEntryInput {
                subject_id: 2,
                n1: None,
                n2: Some(json!(9)),
            },
        ];

        let parsed = validate_entries(&entries).unwrap();
        assert_eq!(
            parsed,
            vec![
                GradeEntry {
                    subject_id: 1,
                    n1: 5.0,
                    n2: 6.5
                },
                GradeEntry {
                    subject_id: 2,
                    n1: 0.0,
                    n2: 9.0
                },
            ]
        );
    }
}
