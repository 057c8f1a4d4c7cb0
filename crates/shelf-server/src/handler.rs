use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use shelf_types::{Author, Book};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of a successful delete.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    #[serde(rename = "rowsAffected")]
    pub rows_affected: u64,
}

/// Query string accepted by `GET /books`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookQuery {
    pub title: String,
    #[serde(rename = "includeAuthor")]
    pub include_author: String,
}

/// Parse a path identifier. Range checks are left to the services.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::MissingParam("id"));
    }
    raw.parse().map_err(|_| ApiError::InvalidId(raw.to_string()))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

pub async fn create_author(
    State(state): State<AppState>,
    payload: Result<Json<Author>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    let author = state.authors.post(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Author>, JsonRejection>,
) -> Result<Json<Author>, ApiError> {
    let id = parse_id(&id)?;
    let author = state.authors.update(id, body(payload)?).await?;
    Ok(Json(author))
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let rows_affected = state.authors.delete(parse_id(&id)?).await?;
    Ok(Json(DeleteResponse { rows_affected }))
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.books.post(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state
        .books
        .get_all(&query.title, &query.include_author)
        .await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book = state.books.get_by_id(parse_id(&id)?).await?;
    Ok(Json(book))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&id)?;
    let book = state.books.update(id, body(payload)?).await?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let rows_affected = state.books.delete(parse_id(&id)?).await?;
    Ok(Json(DeleteResponse { rows_affected }))
}
