//! 授权策略
//!
//! 纯函数：只依据角色与归属关系判断，不读取请求或存储。

use crate::models::accounts::entities::AccountRole;

fn is_staff(role: AccountRole) -> bool {
    matches!(role, AccountRole::Manager | AccountRole::Admin)
}

pub fn can_see_all_students(role: AccountRole) -> bool {
    is_staff(role)
}

pub fn can_create_announcement(role: AccountRole) -> bool {
    is_staff(role)
}

/// 管理员可管理任意公告；作者只有在当前角色仍可发布时才能管理自己的公告
pub fn can_manage_announcement(role: AccountRole, is_author: bool) -> bool {
    role == AccountRole::Admin || (is_author && can_create_announcement(role))
}

pub fn can_record_grades(role: AccountRole) -> bool {
    is_staff(role)
}

pub fn can_manage_catalog(role: AccountRole) -> bool {
    is_staff(role)
}

/// 调用者可见的学生范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentScope {
    Own,
    All,
}

pub fn effective_student_scope(role: AccountRole) -> StudentScope {
    if can_see_all_students(role) {
        StudentScope::All
    } else {
        StudentScope::Own
    }
}

/// 成绩读取目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeTarget {
    Student(i64),
    Shared,
    /// 未认领学生档案，结果为空
    Nothing,
    Denied,
}

pub fn resolve_grade_target(
    scope: StudentScope,
    requested: Option<i64>,
    linked: Option<i64>,
) -> GradeTarget {
    match scope {
        StudentScope::All => requested.map_or(GradeTarget::Shared, GradeTarget::Student),
        StudentScope::Own => match (linked, requested) {
            (None, _) => GradeTarget::Nothing,
            (Some(own), None) => GradeTarget::Student(own),
            (Some(own), Some(req)) if req == own => GradeTarget::Student(own),
            (Some(_), Some(_)) => GradeTarget::Denied,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_capabilities() {
        for role in [AccountRole::Manager, AccountRole::Admin] {
            assert!(can_see_all_students(role));
            assert!(can_create_announcement(role));
            assert!(can_record_grades(role));
            assert!(can_manage_catalog(role));
        }
        assert!(!can_see_all_students(AccountRole::User));
        assert!(!can_create_announcement(AccountRole::User));
        assert!(!can_record_grades(AccountRole::User));
        assert!(!can_manage_catalog(AccountRole::User));
    }

    #[test]
    fn test_manage_announcement_boundary() {
        assert!(can_manage_announcement(AccountRole::Admin, false));
        assert!(can_manage_announcement(AccountRole::Admin, true));
        assert!(can_manage_announcement(AccountRole::Manager, true));
        assert!(!can_manage_announcement(AccountRole::Manager, false));
        assert!(!can_manage_announcement(AccountRole::User, false));
    }

    #[test]
    fn test_demoted_author_is_denied() {
        assert!(!can_manage_announcement(AccountRole::User, true));
    }

    #[test]
    fn test_scope_by_role() {
        assert_eq!(effective_student_scope(AccountRole::User), StudentScope::Own);
        assert_eq!(
            effective_student_scope(AccountRole::Manager),
            StudentScope::All
        );
        assert_eq!(effective_student_scope(AccountRole::Admin), StudentScope::All);
    }

    #[test]
    fn test_resolve_target_for_staff() {
        assert_eq!(
            resolve_grade_target(StudentScope::All, Some(3), None),
            GradeTarget::Student(3)
        );
        assert_eq!(
            resolve_grade_target(StudentScope::All, None, Some(9)),
            GradeTarget::Shared
        );
    }

    #[test]
    fn test_resolve_target_for_user() {
        assert_eq!(
            resolve_grade_target(StudentScope::Own, None, Some(5)),
            GradeTarget::Student(5)
        );
        assert_eq!(
            resolve_grade_target(StudentScope::Own, Some(5), Some(5)),
            GradeTarget::Student(5)
        );
        assert_eq!(
            resolve_grade_target(StudentScope::Own, Some(6), Some(5)),
            GradeTarget::Denied
        );
        assert_eq!(
            resolve_grade_target(StudentScope::Own, Some(6), None),
            GradeTarget::Nothing
        );
        assert_eq!(
            resolve_grade_target(StudentScope::Own, None, None),
            GradeTarget::Nothing
        );
    }
}
