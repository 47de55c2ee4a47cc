use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use models::student::StudentStatus;
use serde::Deserialize;
use service::student::{validation, StudentDto};
use tracing::{info, warn};

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring matched against first and last names
    pub name: String,
}

/// Unwrap the JSON body and run field validation; nothing reaches the service on failure.
fn validated(payload: Result<Json<StudentDto>, JsonRejection>) -> Result<models::student::NewStudent, JsonApiError> {
    let Json(dto) = payload?;
    validation::validate(&dto).map_err(|errors| {
        warn!(fields = %errors, "student payload rejected");
        JsonApiError::validation(errors.into_inner())
    })
}

#[utoipa::path(
    get, path = "/api/students", tag = "students",
    responses(
        (status = 200, description = "Successfully retrieved all students", body = [crate::openapi::StudentDoc]),
        (status = 500, description = "Internal error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<StudentDto>>, JsonApiError> {
    let list = state.students.list_all().await?;
    info!(count = list.len(), "list students");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "ID of the student to retrieve", example = 1)),
    responses(
        (status = 200, description = "Student found", body = crate::openapi::StudentDoc),
        (status = 404, description = "Student not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudentDto>, JsonApiError> {
    let Path(id) = path?;
    Ok(Json(state.students.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/students", tag = "students",
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 201, description = "Student created successfully", body = crate::openapi::StudentDoc),
        (status = 400, description = "Invalid input data", body = crate::openapi::ValidationErrorResponseDoc),
        (status = 409, description = "Email already in use", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<StudentDto>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentDto>), JsonApiError> {
    let new = validated(payload)?;
    let created = state.students.create(new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "ID of the student to update", example = 1)),
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 200, description = "Student updated successfully", body = crate::openapi::StudentDoc),
        (status = 400, description = "Invalid input data", body = crate::openapi::ValidationErrorResponseDoc),
        (status = 404, description = "Student not found", body = crate::openapi::ErrorResponseDoc),
        (status = 409, description = "Email already in use", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentDto>, JsonRejection>,
) -> Result<Json<StudentDto>, JsonApiError> {
    let Path(id) = path?;
    let new = validated(payload)?;
    Ok(Json(state.students.update(id, new).await?))
}

#[utoipa::path(
    delete, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "ID of the student to delete", example = 1)),
    responses(
        (status = 204, description = "Student deleted successfully"),
        (status = 404, description = "Student not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = path?;
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/students/search", tag = "students",
    params(SearchQuery),
    responses(
        (status = 200, description = "Students whose first or last name contains the term", body = [crate::openapi::StudentDoc]),
        (status = 400, description = "Missing search term", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<StudentDto>>, JsonApiError> {
    let Query(q) = query?;
    Ok(Json(state.students.search_by_name(&q.name).await?))
}

#[utoipa::path(
    get, path = "/api/students/status/{status}", tag = "students",
    params(("status" = crate::openapi::StudentStatusDoc, Path, description = "Status to filter by")),
    responses(
        (status = 200, description = "Students with the given status", body = [crate::openapi::StudentDoc]),
        (status = 400, description = "Unknown status", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn by_status(
    State(state): State<ServerState>,
    path: Result<Path<StudentStatus>, PathRejection>,
) -> Result<Json<Vec<StudentDto>>, JsonApiError> {
    let Path(status) = path?;
    Ok(Json(state.students.list_by_status(status).await?))
}

#[utoipa::path(
    get, path = "/api/students/email/{email}", tag = "students",
    params(("email" = String, Path, description = "Email address", example = "john.doe@example.com")),
    responses(
        (status = 200, description = "Student found", body = crate::openapi::StudentDoc),
        (status = 404, description = "Student not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn by_email(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<StudentDto>, JsonApiError> {
    let Path(email) = path?;
    Ok(Json(state.students.find_by_email(&email).await?))
}

#[utoipa::path(
    get, path = "/api/students/student-id/{studentId}", tag = "students",
    params(("studentId" = String, Path, description = "Student ID number", example = "ST123456")),
    responses(
        (status = 200, description = "Students carrying the ID number (not unique)", body = [crate::openapi::StudentDoc])
    )
)]
pub async fn by_student_id(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<StudentDto>>, JsonApiError> {
    let Path(student_id) = path?;
    Ok(Json(state.students.find_by_student_id(&student_id).await?))
}
