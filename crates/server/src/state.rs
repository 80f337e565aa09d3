use std::sync::Arc;

use service::student::{repo::seaorm::SeaOrmStudentRepository, StudentRepository, StudentService};

#[derive(Clone)]
pub struct ServerState {
    pub student_svc: Arc<StudentService>,
}

impl ServerState {
    /// State backed by the given repository.
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { student_svc: Arc::new(StudentService::from_dyn(repo)) }
    }

    pub fn with_db(db: sea_orm::DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmStudentRepository { db }))
    }
}
