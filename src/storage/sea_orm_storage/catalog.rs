use super::SeaOrmStorage;
use crate::entity::prelude::{
    CourseActiveModel, Courses, SubjectActiveModel, Subjects, TeacherActiveModel, Teachers,
};
use crate::entity::{courses, subjects, teachers};
use crate::errors::{Result, ScholarError};
use crate::models::catalog::{
    entities::{Course, Subject, Teacher},
    requests::{CreateCourseRequest, CreateSubjectRequest, CreateTeacherRequest},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    // 课程

    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let model = CourseActiveModel {
            name: Set(req.name),
            shift: Set(req.shift.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_asc(courses::Column::Name)
            .order_by_asc(courses::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 教师

    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let model = TeacherActiveModel {
            name: Set(req.name),
            title: Set(req.title),
            teaching_time: Set(req.teaching_time),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let teachers = Teachers::find()
            .order_by_asc(teachers::Column::Name)
            .order_by_asc(teachers::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(teachers.into_iter().map(|m| m.into_teacher()).collect())
    }

    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 科目

    /// 创建科目，引用的课程和教师必须存在
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        if let Some(course_id) = req.course_id {
            let course = Courses::find_by_id(course_id)
                .one(&self.db)
                .await
                .map_err(|e| ScholarError::database_operation(format!("查询课程失败: {e}")))?;
            if course.is_none() {
                return Err(ScholarError::not_found(format!("课程 {course_id} 不存在")));
            }
        }

        if let Some(teacher_id) = req.teacher_id {
            let teacher = Teachers::find_by_id(teacher_id)
                .one(&self.db)
                .await
                .map_err(|e| ScholarError::database_operation(format!("查询教师失败: {e}")))?;
            if teacher.is_none() {
                return Err(ScholarError::not_found(format!("教师 {teacher_id} 不存在")));
            }
        }

        let model = SubjectActiveModel {
            name: Set(req.name),
            credit_hours: Set(req.credit_hours),
            course_id: Set(req.course_id),
            teacher_id: Set(req.teacher_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 按创建顺序列出科目，成绩单按此顺序输出
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(subjects::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 删除科目，成绩行保留
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
