use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection};

use models::student::{self as student_model, NewRow};

use crate::errors::ServiceError;
use crate::student::domain::{NewStudent, Student};
use crate::student::repository::StudentRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(student_model::find_all(&self.db).await?)
    }

    async fn find_by_key(&self, student_id: &str) -> Result<Option<Student>, ServiceError> {
        Ok(student_model::find_by_student_id(&self.db, student_id).await?)
    }

    async fn insert(&self, input: NewStudent, date_stamp: DateTimeWithTimeZone) -> Result<Student, ServiceError> {
        let row = NewRow {
            student_id: &input.student_id,
            first_name: &input.first_name,
            last_name: &input.last_name,
            email_address: &input.email_address,
            year_level: input.year_level,
            password: &input.password,
            date_stamp,
        };
        Ok(student_model::create(&self.db, row).await?)
    }

    async fn update(&self, student: Student) -> Result<Student, ServiceError> {
        Ok(student_model::update(&self.db, student).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(student_model::hard_delete(&self.db, id).await?)
    }
}
