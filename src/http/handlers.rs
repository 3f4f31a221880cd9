//! Student API handlers.
//!
//! Each handler is a single read or mutation on the shared [`StudentStore`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::http::response::{ApiError, CreatedStudent, MessageBody};
use crate::http::server::AppState;
use crate::store::{Student, StudentId};

/// `?name=` query parameter of the name lookups.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

pub async fn index() -> Json<MessageBody> {
    Json(MessageBody::new("Hello World!"))
}

pub async fn list_students(State(state): State<AppState>) -> Json<BTreeMap<StudentId, Student>> {
    Json(state.store.list())
}

pub async fn get_student_by_id(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, ApiError> {
    state.store.get(id).map(Json).ok_or(ApiError::StudentNotFound)
}

pub async fn get_student_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Student>, ApiError> {
    state
        .store
        .find_by_name(&query.name)
        .map(Json)
        .ok_or(ApiError::StudentNotFound)
}

pub async fn get_student_by_name_and_age(
    State(state): State<AppState>,
    Path(age): Path<i64>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Student>, ApiError> {
    state
        .store
        .find_by_name_and_age(&query.name, age)
        .map(Json)
        .ok_or(ApiError::StudentNotFound)
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(student): Json<Student>,
) -> (StatusCode, Json<CreatedStudent>) {
    let (id, student) = state.store.create(student);
    tracing::info!(id, "Student created");
    (StatusCode::CREATED, Json(CreatedStudent { id, student }))
}

pub async fn replace_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    Json(student): Json<Student>,
) -> Result<Json<Student>, ApiError> {
    let student = state.store.replace(id, student).ok_or(ApiError::NoStudent { id })?;
    tracing::info!(id, "Student replaced");
    Ok(Json(student))
}

pub async fn patch_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    Json(patch): Json<Student>,
) -> Result<Json<Student>, ApiError> {
    let student = state.store.patch(id, patch).ok_or(ApiError::NoStudent { id })?;
    tracing::info!(id, "Student updated");
    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<MessageBody>, ApiError> {
    state.store.delete(id).ok_or(ApiError::NoStudent { id })?;
    tracing::info!(id, "Student deleted");
    Ok(Json(MessageBody::deleted(id)))
}
