//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体读写数据，再转换为 models 中的业务实体。

pub mod prelude;

pub mod accounts;
pub mod announcement_reads;
pub mod announcements;
pub mod courses;
pub mod grades;
pub mod students;
pub mod subjects;
pub mod teachers;
