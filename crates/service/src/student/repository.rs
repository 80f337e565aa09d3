use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::domain::{NewStudent, Student};
use crate::errors::ServiceError;

/// Repository abstraction for student persistence.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All rows in store order.
    async fn find_all(&self) -> Result<Vec<Student>, ServiceError>;
    async fn find_by_key(&self, student_id: &str) -> Result<Option<Student>, ServiceError>;
    async fn insert(&self, input: NewStudent, date_stamp: DateTimeWithTimeZone) -> Result<Student, ServiceError>;
    /// Persist the mutable fields of `student`, matched by surrogate id.
    async fn update(&self, student: Student) -> Result<Student, ServiceError>;
    /// `Ok(false)` when no row had that id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Table {
        rows: Vec<Student>,
        next_id: i32,
    }

    #[derive(Default)]
    pub struct MockStudentRepository {
        table: Mutex<Table>,
        fail_writes: AtomicBool,
    }

    impl MockStudentRepository {
        /// Make every insert/update/delete fail with `ServiceError::Persistence`.
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.table.lock().unwrap().rows.len()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn check_writable(&self) -> Result<(), ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Persistence("store unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
            Ok(self.table.lock().unwrap().rows.clone())
        }

        async fn find_by_key(&self, student_id: &str) -> Result<Option<Student>, ServiceError> {
            let table = self.table.lock().unwrap();
            Ok(table.rows.iter().find(|s| s.student_id == student_id).cloned())
        }

        async fn insert(&self, input: NewStudent, date_stamp: DateTimeWithTimeZone) -> Result<Student, ServiceError> {
            self.check_writable()?;
            let mut table = self.table.lock().unwrap();
            if table.rows.iter().any(|s| s.student_id == input.student_id) {
                return Err(ServiceError::Persistence(format!(
                    "duplicate key value violates unique constraint on student_id '{}'",
                    input.student_id
                )));
            }
            table.next_id += 1;
            let student = Student {
                id: table.next_id,
                student_id: input.student_id,
                first_name: input.first_name,
                last_name: input.last_name,
                email_address: input.email_address,
                year_level: input.year_level,
                password: input.password,
                date_stamp,
            };
            table.rows.push(student.clone());
            Ok(student)
        }

        async fn update(&self, student: Student) -> Result<Student, ServiceError> {
            self.check_writable()?;
            let mut table = self.table.lock().unwrap();
            let row = table
                .rows
                .iter_mut()
                .find(|s| s.id == student.id)
                .ok_or_else(|| ServiceError::NotFound("record not found".into()))?;
            let student_id = row.student_id.clone();
            *row = Student { student_id, ..student };
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.check_writable()?;
            let mut table = self.table.lock().unwrap();
            let before = table.rows.len();
            table.rows.retain(|s| s.id != id);
            Ok(table.rows.len() != before)
        }
    }
}
