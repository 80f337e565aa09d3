use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use service::student::{NewStudent, Student, StudentChanges};
use tracing::info;

use crate::{errors::JsonApiError, metrics, state::ServerState};

fn observe<T>(operation: &str, res: Result<T, JsonApiError>) -> Result<T, JsonApiError> {
    metrics::record(operation, &res, |e| e.status);
    res
}

/// Bytes escaped when a student key is written as a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ').add(b'"').add(b'#').add(b'%').add(b'/').add(b'<').add(b'>')
    .add(b'?').add(b'`').add(b'{').add(b'}').add(b'\\').add(b'^').add(b'|');

fn student_path(student_id: &str) -> String {
    format!("/api/students/{}", utf8_percent_encode(student_id, PATH_SEGMENT))
}

fn location_for(student: &Student) -> HeaderMap {
    let mut headers = HeaderMap::new();
    // encoded output is visible ASCII, always a valid header value
    if let Ok(v) = HeaderValue::from_str(&student_path(&student.student_id)) {
        headers.insert(header::LOCATION, v);
    }
    headers
}

fn student_key(path: Result<Path<String>, PathRejection>) -> Result<String, JsonApiError> {
    path.map(|Path(student_id)| student_id).map_err(JsonApiError::from)
}

#[utoipa::path(
    get, path = "/api/students", tag = "students",
    responses(
        (status = 200, description = "All students", body = [crate::openapi::StudentDoc]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Student>>, JsonApiError> {
    let res = state.student_svc.list().await.map_err(JsonApiError::from);
    if let Ok(list) = &res {
        info!(count = list.len(), "list students");
    }
    observe("list", res).map(Json)
}

#[utoipa::path(
    get, path = "/api/students/{studentId}", tag = "students",
    params(("studentId" = String, Path, description = "Student business key")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentDoc),
        (status = 400, description = "Undecodable key"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let res = match student_key(path) {
        Ok(student_id) => state.student_svc.get_by_key(&student_id).await.map_err(JsonApiError::from),
        Err(e) => Err(e),
    };
    observe("get", res).map(Json)
}

#[utoipa::path(
    post, path = "/api/students/addStudent", tag = "students",
    request_body = crate::openapi::NewStudentDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::StudentDoc),
        (status = 400, description = "Missing or malformed body"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Option<NewStudent>>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<Student>), JsonApiError> {
    let res = match payload {
        Ok(Json(input)) => state.student_svc.create(input).await.map_err(JsonApiError::from),
        Err(rejection) => Err(rejection.into()),
    };
    let created = observe("create", res)?;
    info!(id = created.id, student_id = %created.student_id, "created student");
    Ok((StatusCode::CREATED, location_for(&created), Json(created)))
}

#[utoipa::path(
    put, path = "/api/students/update/{studentId}", tag = "students",
    params(("studentId" = String, Path, description = "Student business key")),
    request_body = crate::openapi::StudentChangesDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StudentDoc),
        (status = 400, description = "Blank key or missing body"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Option<StudentChanges>>, JsonRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let res = match (student_key(path), payload) {
        (Err(e), _) => Err(e),
        (Ok(_), Err(rejection)) => Err(rejection.into()),
        (Ok(student_id), Ok(Json(changes))) => {
            state.student_svc.update(&student_id, changes).await.map_err(JsonApiError::from)
        }
    };
    let updated = observe("update", res)?;
    info!(id = updated.id, student_id = %updated.student_id, "updated student");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/students/delete/{studentId}", tag = "students",
    params(("studentId" = String, Path, description = "Student business key")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Blank key"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let res = match student_key(path) {
        Ok(student_id) => state.student_svc.delete(&student_id).await.map(|()| student_id).map_err(JsonApiError::from),
        Err(e) => Err(e),
    };
    let student_id = observe("delete", res)?;
    info!(student_id = %student_id, "deleted student");
    Ok(StatusCode::NO_CONTENT)
}
