use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use super::domain::{NewStudent, Student, StudentChanges};
use super::repository::StudentRepository;
use crate::errors::ServiceError;

/// Student business service independent of web framework
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

fn is_blank(s: &str) -> bool { s.trim().is_empty() }

impl StudentService {
    pub fn new<R: StudentRepository + 'static>(repo: Arc<R>) -> Self { Self { repo } }

    pub fn from_dyn(repo: Arc<dyn StudentRepository>) -> Self { Self { repo } }

    /// Every student in store order.
    pub async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        self.repo.find_all().await
    }

    /// Look a student up by business key.
    #[instrument(skip(self))]
    pub async fn get_by_key(&self, student_id: &str) -> Result<Student, ServiceError> {
        self.repo
            .find_by_key(student_id)
            .await?
            .ok_or_else(|| ServiceError::student_not_found(student_id))
    }

    /// Persist a new student, stamping `date_stamp` with the current time.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, NewStudent, repository::mock::MockStudentRepository};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let input = NewStudent {
    ///     student_id: "S1".into(), first_name: "A".into(), last_name: "B".into(),
    ///     email_address: "a@example.com".into(), year_level: 1, password: "pw".into(),
    /// };
    /// let created = tokio_test::block_on(svc.create(Some(input))).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert!(tokio_test::block_on(svc.create(None)).is_err());
    /// ```
    #[instrument(skip(self, input), fields(student_id = input.as_ref().map(|s| s.student_id.as_str()).unwrap_or("")))]
    pub async fn create(&self, input: Option<NewStudent>) -> Result<Student, ServiceError> {
        let input = input.ok_or_else(|| ServiceError::invalid("Student data is null."))?;
        if is_blank(&input.student_id) {
            return Err(ServiceError::invalid("Student ID cannot be null or empty."));
        }
        let created = self.repo.insert(input, Utc::now().into()).await.inspect_err(|e| {
            warn!(error = %e, "student_create_failed");
        })?;
        info!(id = created.id, "student_created");
        Ok(created)
    }

    /// Overwrite the mutable fields of an existing student and refresh its `date_stamp`.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, StudentChanges, repository::mock::MockStudentRepository};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let changes = StudentChanges {
    ///     first_name: "A".into(), last_name: "B".into(), email_address: "a@example.com".into(),
    ///     year_level: 2, password: "pw".into(),
    /// };
    /// let res = tokio_test::block_on(svc.update("missing", Some(changes)));
    /// assert!(matches!(res, Err(ServiceError::NotFound(_))));
    /// ```
    #[instrument(skip(self, changes))]
    pub async fn update(&self, student_id: &str, changes: Option<StudentChanges>) -> Result<Student, ServiceError> {
        if is_blank(student_id) {
            return Err(ServiceError::invalid("Student ID cannot be null or empty."));
        }
        let changes = changes.ok_or_else(|| ServiceError::invalid("Student information is required."))?;

        let mut student = self.get_by_key(student_id).await?;
        changes.apply_to(&mut student);
        student.date_stamp = Utc::now().into();

        let updated = self.repo.update(student).await.map_err(|e| match e {
            // deleted between lookup and write
            ServiceError::NotFound(_) => ServiceError::student_not_found(student_id),
            other => other,
        })?;
        info!(id = updated.id, "student_updated");
        Ok(updated)
    }

    /// Hard-delete a student by business key.
    #[instrument(skip(self))]
    pub async fn delete(&self, student_id: &str) -> Result<(), ServiceError> {
        if is_blank(student_id) {
            return Err(ServiceError::invalid("Student ID cannot be null or empty."));
        }
        let student = self.get_by_key(student_id).await?;
        if !self.repo.delete(student.id).await? {
            return Err(ServiceError::student_not_found(student_id));
        }
        info!(id = student.id, "student_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::repository::mock::MockStudentRepository;
    use sea_orm::prelude::DateTimeWithTimeZone;

    fn new_student(key: &str) -> NewStudent {
        NewStudent {
            student_id: key.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: "ada@example.com".into(),
            year_level: 2,
            password: "secret".into(),
        }
    }

    fn changes() -> StudentChanges {
        StudentChanges {
            first_name: "Augusta".into(),
            last_name: "King".into(),
            email_address: "augusta@example.com".into(),
            year_level: 3,
            password: "new-secret".into(),
        }
    }

    fn service() -> (Arc<MockStudentRepository>, StudentService) {
        let repo = Arc::new(MockStudentRepository::default());
        (repo.clone(), StudentService::new(repo))
    }

    #[tokio::test]
    async fn create_then_get_returns_client_fields() {
        let (_, svc) = service();
        let input = new_student("S1");
        let created = svc.create(Some(input.clone())).await.unwrap();
        assert_eq!(created.id, 1);

        let got = svc.get_by_key("S1").await.unwrap();
        assert_eq!(got, created);
        assert_eq!(got.student_id, input.student_id);
        assert_eq!(got.first_name, input.first_name);
        assert_eq!(got.last_name, input.last_name);
        assert_eq!(got.email_address, input.email_address);
        assert_eq!(got.year_level, input.year_level);
        assert_eq!(got.password, input.password);
    }

    #[tokio::test]
    async fn create_rejects_missing_or_blank_payload() {
        let (repo, svc) = service();
        assert!(matches!(svc.create(None).await, Err(ServiceError::InvalidInput(_))));
        assert!(matches!(svc.create(Some(new_student("  "))).await, Err(ServiceError::InvalidInput(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn create_surfaces_store_failures() {
        let (repo, svc) = service();
        svc.create(Some(new_student("S1"))).await.unwrap();
        assert!(matches!(svc.create(Some(new_student("S1"))).await, Err(ServiceError::Persistence(_))));

        repo.fail_writes(true);
        assert!(matches!(svc.create(Some(new_student("S2"))).await, Err(ServiceError::Persistence(_))));
    }

    #[tokio::test]
    async fn list_preserves_store_order() {
        let (_, svc) = service();
        for key in ["S3", "S1", "S2"] {
            svc.create(Some(new_student(key))).await.unwrap();
        }
        let keys: Vec<_> = svc.list().await.unwrap().into_iter().map(|s| s.student_id).collect();
        assert_eq!(keys, ["S3", "S1", "S2"]);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_, svc) = service();
        let err = svc.get_by_key("nope").await.unwrap_err();
        assert_eq!(err, ServiceError::student_not_found("nope"));
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_refreshes_stamp() {
        let (_, svc) = service();
        let created = svc.create(Some(new_student("S1"))).await.unwrap();

        let before = Utc::now();
        let updated = svc.update("S1", Some(changes())).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.student_id, "S1");
        assert_eq!(updated.first_name, "Augusta");
        assert_eq!(updated.last_name, "King");
        assert_eq!(updated.email_address, "augusta@example.com");
        assert_eq!(updated.year_level, 3);
        assert_eq!(updated.password, "new-secret");
        assert!(updated.date_stamp.with_timezone(&Utc) >= before);
        assert_eq!(svc.get_by_key("S1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_missing_never_mutates_store() {
        let (_, svc) = service();
        let existing = svc.create(Some(new_student("S1"))).await.unwrap();

        let err = svc.update("S2", Some(changes())).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.list().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn update_validates_key_and_payload() {
        let (_, svc) = service();
        svc.create(Some(new_student("S1"))).await.unwrap();
        assert!(matches!(svc.update(" ", Some(changes())).await, Err(ServiceError::InvalidInput(_))));
        assert!(matches!(svc.update("S1", None).await, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn update_store_failure_is_persistence_error() {
        let (repo, svc) = service();
        svc.create(Some(new_student("S1"))).await.unwrap();
        repo.fail_writes(true);
        assert!(matches!(svc.update("S1", Some(changes())).await, Err(ServiceError::Persistence(_))));
    }

    #[tokio::test]
    async fn delete_twice_second_is_not_found() {
        let (repo, svc) = service();
        svc.create(Some(new_student("S1"))).await.unwrap();

        svc.delete("S1").await.unwrap();
        assert!(repo.is_empty());
        assert_eq!(svc.delete("S1").await.unwrap_err(), ServiceError::student_not_found("S1"));
        assert!(matches!(svc.delete("").await, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn delete_store_failure_is_persistence_error() {
        let (repo, svc) = service();
        svc.create(Some(new_student("S1"))).await.unwrap();
        repo.fail_writes(true);
        assert!(matches!(svc.delete("S1").await, Err(ServiceError::Persistence(_))));
        assert_eq!(repo.len(), 1);
    }

    /// Lookups see the row; a concurrent delete removes it before any write lands.
    struct VanishingRepo {
        inner: MockStudentRepository,
    }

    #[async_trait::async_trait]
    impl StudentRepository for VanishingRepo {
        async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
            self.inner.find_all().await
        }

        async fn find_by_key(&self, student_id: &str) -> Result<Option<Student>, ServiceError> {
            self.inner.find_by_key(student_id).await
        }

        async fn insert(&self, input: NewStudent, date_stamp: DateTimeWithTimeZone) -> Result<Student, ServiceError> {
            self.inner.insert(input, date_stamp).await
        }

        async fn update(&self, student: Student) -> Result<Student, ServiceError> {
            self.inner.delete(student.id).await?;
            self.inner.update(student).await
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.inner.delete(id).await?;
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn row_deleted_between_lookup_and_write_is_not_found() {
        let repo = Arc::new(VanishingRepo { inner: MockStudentRepository::default() });
        let svc = StudentService::new(repo.clone());

        svc.create(Some(new_student("S1"))).await.unwrap();
        let err = svc.update("S1", Some(changes())).await.unwrap_err();
        assert_eq!(err, ServiceError::student_not_found("S1"));

        svc.create(Some(new_student("S1"))).await.unwrap();
        let err = svc.delete("S1").await.unwrap_err();
        assert_eq!(err, ServiceError::student_not_found("S1"));
        assert!(repo.inner.is_empty());
    }

    #[tokio::test]
    async fn lifecycle_example() {
        let (_, svc) = service();
        let created = svc.create(Some(new_student("S1"))).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(svc.get_by_key("S1").await.unwrap().first_name, "Ada");
        svc.delete("S1").await.unwrap();
        assert!(matches!(svc.get_by_key("S1").await, Err(ServiceError::NotFound(_))));
    }
}
