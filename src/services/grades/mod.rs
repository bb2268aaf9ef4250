//! 成绩账本与成绩单
//!
//! - `validate`: 分数解析，整批校验
//! - `bulletin`: 纯函数的成绩单编译
//! - `list` / `batch` / `report`: HTTP 处理

pub mod batch;
pub mod bulletin;
pub mod list;
pub mod report;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::accounts::entities::Caller;
use crate::models::grades::requests::{GradeBatchRequest, GradeQuery};
use crate::policy::{GradeTarget, StudentScope, effective_student_scope, resolve_grade_target};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_grades(&self, request: &HttpRequest, query: GradeQuery) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    pub async fn record_batch(
        &self,
        request: &HttpRequest,
        batch: GradeBatchRequest,
    ) -> ActixResult<HttpResponse> {
        batch::record_batch(self, request, batch).await
    }

    pub async fn bulletin(&self, request: &HttpRequest, query: GradeQuery) -> ActixResult<HttpResponse> {
        report::bulletin(self, request, query).await
    }
}

/// 按调用者角色与已认领档案决定读取目标；普通账号才需要查询认领关系
pub(crate) async fn resolve_target(
    storage: &Arc<dyn Storage>,
    caller: &Caller,
    requested: Option<i64>,
) -> Result<GradeTarget> {
    let scope = effective_student_scope(caller.role);
    let linked = match scope {
        StudentScope::All => None,
        StudentScope::Own => storage
            .get_student_by_account(caller.account_id)
            .await?
            .map(|student| student.id),
    };
    Ok(resolve_grade_target(scope, requested, linked))
}
