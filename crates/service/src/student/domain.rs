use serde::{Deserialize, Serialize};

/// A persisted student row.
pub type Student = models::student::Model;

/// Payload for creating a student. `id` and `dateStamp` are assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub year_level: i32,
    pub password: String,
}

/// The mutable fields of a student. An update overwrites all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentChanges {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub year_level: i32,
    pub password: String,
}

impl StudentChanges {
    pub fn apply_to(self, student: &mut Student) {
        student.first_name = self.first_name;
        student.last_name = self.last_name;
        student.email_address = self.email_address;
        student.year_level = self.year_level;
        student.password = self.password;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_student_ignores_server_assigned_fields() {
        let body = serde_json::json!({
            "id": 99,
            "studentId": "S1",
            "firstName": "A",
            "lastName": "B",
            "emailAddress": "a@b.c",
            "yearLevel": 3,
            "password": "pw",
            "dateStamp": "2020-01-01T00:00:00Z"
        });
        let parsed: NewStudent = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.student_id, "S1");
        assert_eq!(parsed.year_level, 3);
    }

    #[test]
    fn changes_accept_full_student_body() {
        let body = serde_json::json!({
            "studentId": "ignored",
            "firstName": "C",
            "lastName": "D",
            "emailAddress": "c@d.e",
            "yearLevel": 1,
            "password": "x"
        });
        let parsed: StudentChanges = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.first_name, "C");
    }
}
