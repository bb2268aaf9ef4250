//! 成绩单编译
//!
//! 纯函数：科目列表 + 成绩行 → 每科的平均分与状态。

use std::collections::HashMap;

use crate::models::catalog::entities::Subject;
use crate::models::grades::entities::{BulletinRow, BulletinStatus, Grade};

pub const PASSING_AVERAGE: f64 = 6.0;
pub const MAKEUP_AVERAGE: f64 = 4.0;

/// 四舍五入到一位小数（.x5 向上）
pub fn round_half_up_1(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

pub fn average(n1: f64, n2: f64) -> f64 {
    round_half_up_1((n1 + n2) / 2.0)
}

pub fn status_for(average: f64) -> BulletinStatus {
    if average >= PASSING_AVERAGE {
        BulletinStatus::Passed
    } else if average >= MAKEUP_AVERAGE {
        BulletinStatus::MakeupExam
    } else {
        BulletinStatus::Failed
    }
}

/// 按科目顺序输出成绩单，缺少成绩的科目记 0 分，未知科目的成绩被忽略
pub fn compile(subjects: &[Subject], grades: &[Grade]) -> Vec<BulletinRow> {
    let by_subject: HashMap<i64, &Grade> = grades.iter().map(|g| (g.subject_id, g)).collect();

    subjects
        .iter()
        .map(|subject| {
            let (n1, n2) = by_subject
                .get(&subject.id)
                .map_or((0.0, 0.0), |g| (g.n1, g.n2));
            let average = average(n1, n2);
            BulletinRow {
                subject_id: subject.id,
                subject_name: subject.name.clone(),
                n1,
                n2,
                average,
                status: status_for(average),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn subject(id: i64, name: &str) -> Subject {
        Subject {
            id,
            name: name.to_string(),
            credit_hours: 60,
            course_id: None,
            teacher_id: None,
            created_at: Utc::now(),
        }
    }

    fn grade(subject_id: i64, n1: f64, n2: f64) -> Grade {
        Grade {
            id: subject_id * 10,
            subject_id,
            student_id: Some(1),
            n1,
            n2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(average(7.0, 6.05), 6.5);
        assert_eq!(average(10.0, 10.0), 10.0);
        assert_eq!(average(0.0, 0.0), 0.0);
        assert_eq!(average(5.0, 6.0), 5.5);
        assert_eq!(average(3.0, 4.5), 3.8);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(status_for(6.0), BulletinStatus::Passed);
        assert_eq!(status_for(10.0), BulletinStatus::Passed);
        assert_eq!(status_for(5.9), BulletinStatus::MakeupExam);
        assert_eq!(status_for(4.0), BulletinStatus::MakeupExam);
        assert_eq!(status_for(3.9), BulletinStatus::Failed);
        assert_eq!(status_for(0.0), BulletinStatus::Failed);
    }

    #[test]
    fn test_compile_follows_subject_order() {
        let subjects = vec![subject(2, "Physics"), subject(1, "Algebra"), subject(3, "Art")];
        let grades = vec![grade(1, 8.0, 9.0), grade(2, 4.0, 5.0), grade(99, 10.0, 10.0)];

        let rows = compile(&subjects, &grades);

        assert_eq!(
            rows.iter().map(|r| r.subject_id).collect::<Vec<_>>(),
            vec![2, 1, 3]
        );
        assert_eq!(rows[0].average, 4.5);
        assert_eq!(rows[0].status, BulletinStatus::MakeupExam);
        assert_eq!(rows[1].average, 8.5);
        assert_eq!(rows[1].status, BulletinStatus::Passed);
        assert_eq!((rows[2].n1, rows[2].n2), (0.0, 0.0));
        assert_eq!(rows[2].status, BulletinStatus::Failed);
    }

    #[test]
    fn test_compile_empty_inputs() {
        assert!(compile(&[], &[grade(1, 5.0, 5.0)]).is_empty());
        let rows = compile(&[subject(1, "Algebra")], &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].average, 0.0);
    }
}
