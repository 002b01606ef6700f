use axum::{extract::{Path, State}, http::{header, HeaderName, StatusCode}, Json};
use service::student::Student;
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 200, description = "All students", body = [crate::openapi::StudentDoc]),
        (status = 404, description = "Student collection unavailable")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Student>>, JsonApiError> {
    let all = state.students.list().await?;
    info!(count = all.len(), "list students");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Student>, JsonApiError> {
    Ok(Json(state.students.get(id).await?))
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 201, description = "Created; `Location` points at the new record", body = crate::openapi::StudentDoc),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<Student>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Student>), JsonApiError> {
    let created = state.students.create(input).await?;
    let location = format!("/students/{}", created.id);
    info!(id = created.id, %location, "created student");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Path id and body id differ"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Unresolved concurrent modification")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<Student>,
) -> Result<StatusCode, JsonApiError> {
    state.students.update(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
