pub mod claim;
pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{ClaimStudentRequest, CreateStudentRequest};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_students(self, request).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        create: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, create).await
    }

    pub async fn delete_student(&self, request: &HttpRequest, student_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }

    pub async fn claim_student(
        &self,
        request: &HttpRequest,
        claim: ClaimStudentRequest,
    ) -> ActixResult<HttpResponse> {
        claim::claim_student(self, request, claim).await
    }
}
